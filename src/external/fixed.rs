//! In-memory collaborators.
//!
//! Useful for tests and for callers that already hold the context and cloud data.

use super::{
    AccountDirectory, CloudConfig, CloudConfigStore, ContextStore, Providers, RepositoryInspector,
    SpaceId, ValueSource,
};
use crate::error::ProviderError;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

const SOURCE: &str = "in-memory kube-config";

/// Kube-contexts held in memory.
#[derive(Debug, Clone, Default)]
pub struct FixedContexts {
    current: Option<String>,
    spaces: HashMap<String, (SpaceId, String)>,
    plain: HashSet<String>,
}

impl FixedContexts {
    /// Store whose current context is `current` (registered as a plain context).
    pub fn new(current: impl Into<String>) -> Self {
        let current = current.into();
        let mut plain = HashSet::new();
        plain.insert(current.clone());
        Self {
            current: Some(current),
            spaces: HashMap::new(),
            plain,
        }
    }

    /// Store without a current context.
    pub fn without_current() -> Self {
        Self::default()
    }

    /// Register a space-backed context.
    pub fn with_space(
        mut self,
        context: impl Into<String>,
        space_id: SpaceId,
        provider: impl Into<String>,
    ) -> Self {
        let context = context.into();
        self.plain.remove(&context);
        self.spaces.insert(context, (space_id, provider.into()));
        self
    }

    /// Register a context that is not backed by a space.
    pub fn with_plain(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.spaces.remove(&context);
        self.plain.insert(context);
        self
    }
}

impl ContextStore for FixedContexts {
    fn current_context(&self) -> Result<String, ProviderError> {
        self.current
            .clone()
            .ok_or_else(|| ProviderError::NoCurrentContext(SOURCE.to_string()))
    }

    fn is_space_context(&self, context: &str) -> Result<bool, ProviderError> {
        if self.spaces.contains_key(context) {
            Ok(true)
        } else if self.plain.contains(context) {
            Ok(false)
        } else {
            Err(ProviderError::ContextNotFound(context.to_string()))
        }
    }

    fn space_id(&self, context: &str) -> Result<(SpaceId, String), ProviderError> {
        if let Some((id, provider)) = self.spaces.get(context) {
            return Ok((*id, provider.clone()));
        }
        if self.plain.contains(context) {
            Err(ProviderError::NotASpace(context.to_string()))
        } else {
            Err(ProviderError::ContextNotFound(context.to_string()))
        }
    }
}

/// Cloud config held in memory; `None` makes parsing fail.
#[derive(Debug, Clone, Default)]
pub struct FixedCloudConfig {
    config: Option<CloudConfig>,
}

impl FixedCloudConfig {
    pub fn new(config: CloudConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    pub fn broken() -> Self {
        Self { config: None }
    }
}

impl CloudConfigStore for FixedCloudConfig {
    fn parse_provider_config(&self) -> Result<CloudConfig, ProviderError> {
        self.config
            .clone()
            .ok_or_else(|| ProviderError::Store("provider config is corrupt".to_string()))
    }
}

/// Token to account name table.
#[derive(Debug, Clone, Default)]
pub struct FixedAccounts {
    accounts: HashMap<String, String>,
}

impl FixedAccounts {
    pub fn with_account(mut self, token: impl Into<String>, name: impl Into<String>) -> Self {
        self.accounts.insert(token.into(), name.into());
        self
    }
}

impl AccountDirectory for FixedAccounts {
    fn account_name(&self, token: &str) -> Result<String, ProviderError> {
        self.accounts
            .get(token)
            .cloned()
            .ok_or_else(|| ProviderError::InvalidToken("unknown token".to_string()))
    }
}

/// Working tree with a fixed commit hash; `None` behaves like "not a repository".
#[derive(Debug, Clone, Default)]
pub struct FixedRepository {
    hash: Option<String>,
}

impl FixedRepository {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
        }
    }
}

impl RepositoryInspector for FixedRepository {
    fn repository_hash(&self, path: &Path) -> Result<String, ProviderError> {
        self.hash.clone().ok_or_else(|| {
            ProviderError::Git(format!("{} is not a git repository", path.display()))
        })
    }
}

/// Deterministic value generator; `None` token makes generation fail.
#[derive(Debug, Clone)]
pub struct FixedValues {
    token: Option<String>,
    timestamp: i64,
}

impl FixedValues {
    pub fn new(token: impl Into<String>, timestamp: i64) -> Self {
        Self {
            token: Some(token.into()),
            timestamp,
        }
    }

    pub fn failing(timestamp: i64) -> Self {
        Self {
            token: None,
            timestamp,
        }
    }
}

impl Default for FixedValues {
    fn default() -> Self {
        Self::new("abcdef", 0)
    }
}

impl ValueSource for FixedValues {
    fn random_token(&self, length: usize) -> Result<String, ProviderError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ProviderError::Random("entropy source exhausted".to_string()))?;
        Ok(token.chars().cycle().take(length).collect())
    }

    fn unix_timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Providers with no current context, an empty cloud config, no accounts, no repository and
/// deterministic values. Override individual fields with struct update syntax.
pub fn providers() -> Providers {
    Providers {
        contexts: Arc::new(FixedContexts::without_current()),
        cloud: Arc::new(FixedCloudConfig::new(CloudConfig::default())),
        accounts: Arc::new(FixedAccounts::default()),
        repository: Arc::new(FixedRepository::default()),
        values: Arc::new(FixedValues::default()),
    }
}
