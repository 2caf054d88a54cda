//! Config loading facade: merge policy and sources in precedence order.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::RunvarsConfig;
use config::{ConfigError, File};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global config file, workspace
    /// `config/config.toml`, workspace `config/{RUNVARS_ENV}.toml`.
    pub fn load(workspace_root: &Path) -> Result<RunvarsConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a single explicit file (defaults still apply).
    pub fn load_from_file(path: &Path) -> Result<RunvarsConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }
}
