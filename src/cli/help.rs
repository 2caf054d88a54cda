//! Command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "list", "get").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List { .. } => "list",
        Commands::Get { .. } => "get",
    }
}
