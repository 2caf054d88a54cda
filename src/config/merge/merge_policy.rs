//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("sources.repository", ".")?
        .set_default("variables.random_length", 6)?
        .set_default("variables.commit_length", 8)?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")
}
