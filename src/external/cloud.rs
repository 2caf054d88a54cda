//! Cloud provider configuration file store.

use super::{CloudConfig, CloudConfigStore};
use crate::error::ProviderError;
use std::path::PathBuf;

/// YAML backed [`CloudConfigStore`]. A missing file is an empty configuration.
#[derive(Debug, Clone)]
pub struct CloudConfigFile {
    path: PathBuf,
}

impl CloudConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.devspace/clouds.yaml`
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".devspace").join("clouds.yaml"))
    }
}

impl CloudConfigStore for CloudConfigFile {
    fn parse_provider_config(&self) -> Result<CloudConfig, ProviderError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Cloud config not found, using empty config");
            return Ok(CloudConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| ProviderError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(CloudConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ProviderError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }
}
