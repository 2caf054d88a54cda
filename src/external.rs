//! External Context Providers
//!
//! Narrow interfaces to the stores predefined variables read from: the kube-context store,
//! the cloud provider configuration, account tokens, the git working tree and the value
//! generators. The variable engine only consumes these traits; file and process backed
//! implementations live in the submodules, in-memory ones in [`fixed`].

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub mod cloud;
pub mod fixed;
pub mod git;
pub mod kubeconfig;
pub mod system;
pub mod token;

pub use cloud::CloudConfigFile;
pub use git::GitCli;
pub use kubeconfig::KubeConfigFile;
pub use system::SystemValues;
pub use token::TokenAccounts;

/// Provider used when neither the kube-context nor the cloud config names one.
pub const DEFAULT_PROVIDER_NAME: &str = "app.devspace.cloud";

/// Numeric identifier of a space within a provider.
pub type SpaceId = u64;

/// Kube-context lookups.
pub trait ContextStore: Send + Sync {
    /// Name of the currently selected kube-context.
    fn current_context(&self) -> Result<String, ProviderError>;

    /// Whether the context is backed by a cloud space.
    fn is_space_context(&self, context: &str) -> Result<bool, ProviderError>;

    /// Space id and provider name the context belongs to.
    fn space_id(&self, context: &str) -> Result<(SpaceId, String), ProviderError>;
}

/// Cloud provider configuration store.
pub trait CloudConfigStore: Send + Sync {
    fn parse_provider_config(&self) -> Result<CloudConfig, ProviderError>;
}

/// Resolves the account name an authentication token belongs to.
pub trait AccountDirectory: Send + Sync {
    fn account_name(&self, token: &str) -> Result<String, ProviderError>;
}

/// Reads the commit hash of a working tree.
pub trait RepositoryInspector: Send + Sync {
    fn repository_hash(&self, path: &Path) -> Result<String, ProviderError>;
}

/// Random tokens and the clock.
pub trait ValueSource: Send + Sync {
    fn random_token(&self, length: usize) -> Result<String, ProviderError>;

    fn unix_timestamp(&self) -> i64;
}

/// Cloud provider configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Name of the default provider
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub providers: Vec<Provider>,
}

impl CloudConfig {
    /// Find a provider by name
    pub fn provider(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Configured default provider name, or [`DEFAULT_PROVIDER_NAME`].
    pub fn default_provider(&self) -> &str {
        match self.default.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_PROVIDER_NAME,
        }
    }
}

/// A cloud provider the user has (possibly) logged into
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Authentication token (empty when logged out)
    #[serde(default)]
    pub token: Option<String>,

    /// Cached spaces keyed by space id
    #[serde(default)]
    pub spaces: BTreeMap<SpaceId, SpaceCache>,
}

impl Provider {
    /// Non-empty authentication token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn space(&self, id: SpaceId) -> Option<&SpaceCache> {
        self.spaces.get(&id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceCache {
    pub space: Space,

    #[serde(default, rename = "serviceAccount")]
    pub service_account: ServiceAccount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub name: String,

    /// Ordered domain list; predefined domain variables index into it starting at 1
    #[serde(default)]
    pub domains: Vec<Domain>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    pub namespace: String,
}

/// Collaborators injected into the variable registry.
#[derive(Clone)]
pub struct Providers {
    pub contexts: Arc<dyn ContextStore>,
    pub cloud: Arc<dyn CloudConfigStore>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub repository: Arc<dyn RepositoryInspector>,
    pub values: Arc<dyn ValueSource>,
}

impl Providers {
    /// File and process backed providers.
    pub fn from_files(kubeconfig: KubeConfigFile, cloud_config: CloudConfigFile) -> Self {
        Self {
            contexts: Arc::new(kubeconfig),
            cloud: Arc::new(cloud_config),
            accounts: Arc::new(TokenAccounts),
            repository: Arc::new(GitCli),
            values: Arc::new(SystemValues),
        }
    }

    /// Resolve the effective kube-context: a non-empty override wins over the current one.
    pub fn effective_context(&self, context_override: Option<&str>) -> Result<String, ProviderError> {
        match context_override.filter(|c| !c.is_empty()) {
            Some(context) => Ok(context.to_string()),
            None => self.contexts.current_context(),
        }
    }
}
