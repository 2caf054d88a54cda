//! Kube-config file store.
//!
//! A context belongs to a space when it carries the space id extension; the owning provider
//! is read from the provider extension.

use super::{ContextStore, SpaceId, DEFAULT_PROVIDER_NAME};
use crate::error::ProviderError;
use serde::Deserialize;
use std::path::PathBuf;

/// Context extension holding the space id.
pub const SPACE_ID_EXTENSION: &str = "devspace-space-id";

/// Context extension holding the provider name.
pub const SPACE_PROVIDER_EXTENSION: &str = "devspace-space-provider";

#[derive(Debug, Default, Deserialize)]
struct RawKubeConfig {
    #[serde(default, rename = "current-context")]
    current_context: String,

    #[serde(default)]
    contexts: Vec<NamedContext>,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,

    #[serde(default)]
    context: ContextEntry,
}

#[derive(Debug, Default, Deserialize)]
struct ContextEntry {
    #[serde(default)]
    extensions: Vec<NamedExtension>,
}

#[derive(Debug, Deserialize)]
struct NamedExtension {
    name: String,

    #[serde(default)]
    extension: serde_yaml::Value,
}

impl RawKubeConfig {
    fn context(&self, name: &str) -> Result<&ContextEntry, ProviderError> {
        self.contexts
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.context)
            .ok_or_else(|| ProviderError::ContextNotFound(name.to_string()))
    }
}

impl ContextEntry {
    fn extension(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.extensions
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.extension)
            .filter(|v| !v.is_null())
    }
}

/// Kube-config backed [`ContextStore`]. The file is re-read on every query.
#[derive(Debug, Clone)]
pub struct KubeConfigFile {
    path: PathBuf,
}

impl KubeConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// First entry of `$KUBECONFIG`, else `~/.kube/config`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(paths) = std::env::var_os("KUBECONFIG") {
            if let Some(first) = std::env::split_paths(&paths).find(|p| !p.as_os_str().is_empty())
            {
                return Some(first);
            }
        }
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".kube").join("config"))
    }

    /// A missing file reads as an empty kube-config, matching kubectl.
    fn load(&self) -> Result<RawKubeConfig, ProviderError> {
        if !self.path.exists() {
            return Ok(RawKubeConfig::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| ProviderError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(RawKubeConfig::default());
        }
        serde_yaml::from_str(&content).map_err(|e| ProviderError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl ContextStore for KubeConfigFile {
    fn current_context(&self) -> Result<String, ProviderError> {
        let config = self.load()?;
        if config.current_context.is_empty() {
            return Err(ProviderError::NoCurrentContext(
                self.path.display().to_string(),
            ));
        }
        Ok(config.current_context)
    }

    fn is_space_context(&self, context: &str) -> Result<bool, ProviderError> {
        let config = self.load()?;
        Ok(config.context(context)?.extension(SPACE_ID_EXTENSION).is_some())
    }

    fn space_id(&self, context: &str) -> Result<(SpaceId, String), ProviderError> {
        let config = self.load()?;
        let entry = config.context(context)?;
        let raw_id = entry
            .extension(SPACE_ID_EXTENSION)
            .ok_or_else(|| ProviderError::NotASpace(context.to_string()))?;
        let space_id = parse_space_id(raw_id).ok_or_else(|| ProviderError::InvalidSpaceId {
            context: context.to_string(),
            value: yaml_scalar(raw_id),
        })?;

        let provider = entry
            .extension(SPACE_PROVIDER_EXTENSION)
            .and_then(|v| v.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROVIDER_NAME)
            .to_string();

        Ok((space_id, provider))
    }
}

fn parse_space_id(value: &serde_yaml::Value) -> Option<SpaceId> {
    match value {
        serde_yaml::Value::Number(n) => n.as_u64(),
        serde_yaml::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
