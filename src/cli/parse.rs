//! CLI parse: clap types for runvars. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// runvars - resolve predefined deployment variables
#[derive(Parser)]
#[command(name = "runvars")]
#[command(about = "Resolve predefined deployment variables from kube-context, cloud config and git")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Kube-context to resolve space variables against instead of the current one
    #[arg(long)]
    pub kube_context: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print every static predefined variable
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve and print the named variables (static or DEVSPACE_SPACE_DOMAIN<n>)
    Get {
        /// Variable names, case-insensitive
        #[arg(required = true)]
        names: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
