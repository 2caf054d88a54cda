//! Configuration System
//!
//! Hierarchical configuration for the variable engine: where the kube-config, the cloud
//! provider config and the git working tree live, built-in resolver tunables, and logging.
//! Layered with the `config` crate: defaults, then the global file, then workspace files.

use crate::error::AppError;
use crate::external::{CloudConfigFile, KubeConfigFile, Providers};
use crate::logging::LoggingConfig;
use crate::vars::BuiltinOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunvarsConfig {
    /// External stores the predefined variables read from
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Built-in variable tunables
    #[serde(default)]
    pub variables: VariablesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Kube-config file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,

    /// Cloud provider config file (defaults to ~/.devspace/clouds.yaml)
    #[serde(default)]
    pub cloud_config: Option<PathBuf>,

    /// Git working tree, relative to the workspace root
    #[serde(default = "default_repository")]
    pub repository: PathBuf,
}

fn default_repository() -> PathBuf {
    PathBuf::from(".")
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            cloud_config: None,
            repository: default_repository(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariablesConfig {
    /// Length of DEVSPACE_RANDOM
    #[serde(default = "default_random_length")]
    pub random_length: usize,

    /// Length of the abbreviated DEVSPACE_GIT_COMMIT hash
    #[serde(default = "default_commit_length")]
    pub commit_length: usize,
}

fn default_random_length() -> usize {
    6
}

fn default_commit_length() -> usize {
    8
}

impl Default for VariablesConfig {
    fn default() -> Self {
        Self {
            random_length: default_random_length(),
            commit_length: default_commit_length(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Sources(String),
    Variables(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Sources(msg) => write!(f, "Sources: {}", msg),
            ValidationError::Variables(msg) => write!(f, "Variables: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn resolve_path(workspace_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace_root.join(path)
    }
}

impl RunvarsConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.sources.repository.as_os_str().is_empty() {
            errors.push(ValidationError::Sources(
                "Repository path cannot be empty".to_string(),
            ));
        }
        for (key, path) in [
            ("kubeconfig", &self.sources.kubeconfig),
            ("cloud_config", &self.sources.cloud_config),
        ] {
            if matches!(path, Some(p) if p.as_os_str().is_empty()) {
                errors.push(ValidationError::Sources(format!(
                    "{} path cannot be empty",
                    key
                )));
            }
        }

        if self.variables.random_length == 0 {
            errors.push(ValidationError::Variables(
                "random_length must be at least 1".to_string(),
            ));
        }
        if self.variables.commit_length == 0 {
            errors.push(ValidationError::Variables(
                "commit_length must be at least 1".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all errors into one [`AppError::Config`].
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AppError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Built-in resolver options with the repository resolved against the workspace root.
    pub fn builtin_options(&self, workspace_root: &Path) -> BuiltinOptions {
        BuiltinOptions {
            repository: resolve_path(workspace_root, &self.sources.repository),
            random_length: self.variables.random_length,
            commit_length: self.variables.commit_length,
        }
    }

    /// File and process backed providers for the configured sources.
    pub fn providers(&self, workspace_root: &Path) -> Result<Providers, AppError> {
        let kubeconfig = match &self.sources.kubeconfig {
            Some(path) => resolve_path(workspace_root, path),
            None => KubeConfigFile::default_path().ok_or_else(|| {
                AppError::Config(
                    "Unable to locate a kube-config; set sources.kubeconfig".to_string(),
                )
            })?,
        };
        let cloud_config = match &self.sources.cloud_config {
            Some(path) => resolve_path(workspace_root, path),
            None => CloudConfigFile::default_path().ok_or_else(|| {
                AppError::Config(
                    "Unable to locate the cloud provider config; set sources.cloud_config"
                        .to_string(),
                )
            })?,
        };

        tracing::debug!(
            kubeconfig = %kubeconfig.display(),
            cloud_config = %cloud_config.display(),
            "Using external context sources"
        );

        Ok(Providers::from_files(
            KubeConfigFile::new(kubeconfig),
            CloudConfigFile::new(cloud_config),
        ))
    }
}
