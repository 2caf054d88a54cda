//! Built-in predefined variables.
//!
//! Several store failures are reported as [`Outcome::Unavailable`] rather than as errors:
//! a missing kube-context or an unreadable cloud config usually just means the user has not
//! set up a space yet, and the variable's message tells them how to do so.

use super::messages;
use super::{Outcome, Resolve};
use crate::error::ProviderError;
use crate::external::{Providers, SpaceCache};
use std::path::PathBuf;
use tracing::debug;

pub const RANDOM: &str = "DEVSPACE_RANDOM";
pub const TIMESTAMP: &str = "DEVSPACE_TIMESTAMP";
pub const GIT_COMMIT: &str = "DEVSPACE_GIT_COMMIT";
pub const SPACE: &str = "DEVSPACE_SPACE";
pub const SPACE_NAMESPACE: &str = "DEVSPACE_SPACE_NAMESPACE";
pub const USERNAME: &str = "DEVSPACE_USERNAME";

/// Tunables for the built-in resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinOptions {
    /// Working tree `DEVSPACE_GIT_COMMIT` reads from
    pub repository: PathBuf,
    pub random_length: usize,
    pub commit_length: usize,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            repository: PathBuf::from("."),
            random_length: 6,
            commit_length: 8,
        }
    }
}

/// One catalogue entry: name, resolver and unavailability message.
pub(crate) type BuiltinEntry = (&'static str, Box<dyn Resolve>, String);

/// The built-in catalogue.
pub(crate) fn catalogue(options: &BuiltinOptions) -> Vec<BuiltinEntry> {
    vec![
        (
            RANDOM,
            Box::new(RandomToken {
                length: options.random_length,
            }),
            messages::not_resolved(RANDOM),
        ),
        (
            TIMESTAMP,
            Box::new(Timestamp),
            messages::not_resolved(TIMESTAMP),
        ),
        (
            GIT_COMMIT,
            Box::new(GitCommit {
                repository: options.repository.clone(),
                length: options.commit_length,
            }),
            messages::no_git_repository(GIT_COMMIT),
        ),
        (
            SPACE,
            Box::new(SpaceVariable(SpaceField::Name)),
            messages::not_a_space(SPACE),
        ),
        (
            SPACE_NAMESPACE,
            Box::new(SpaceVariable(SpaceField::Namespace)),
            messages::not_a_space(SPACE_NAMESPACE),
        ),
        (USERNAME, Box::new(Username), messages::not_logged_in(USERNAME)),
    ]
}

/// Random lowercase alphanumeric token.
#[derive(Debug, Clone)]
pub struct RandomToken {
    pub length: usize,
}

impl Resolve for RandomToken {
    fn resolve(
        &self,
        providers: &Providers,
        _context_override: Option<&str>,
    ) -> Result<Outcome, ProviderError> {
        providers
            .values
            .random_token(self.length)
            .map(Outcome::Resolved)
    }
}

/// Unix timestamp in seconds.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp;

impl Resolve for Timestamp {
    fn resolve(
        &self,
        providers: &Providers,
        _context_override: Option<&str>,
    ) -> Result<Outcome, ProviderError> {
        Ok(Outcome::Resolved(providers.values.unix_timestamp().to_string()))
    }
}

/// Abbreviated commit hash of the working tree.
#[derive(Debug, Clone)]
pub struct GitCommit {
    pub repository: PathBuf,
    pub length: usize,
}

impl Resolve for GitCommit {
    fn resolve(
        &self,
        providers: &Providers,
        _context_override: Option<&str>,
    ) -> Result<Outcome, ProviderError> {
        match providers.repository.repository_hash(&self.repository) {
            Ok(hash) => Ok(Outcome::Resolved(hash.chars().take(self.length).collect())),
            Err(e) => {
                debug!(repository = %self.repository.display(), error = %e, "No commit hash available");
                Ok(Outcome::Unavailable)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceField {
    Name,
    Namespace,
}

/// A field of the space the (possibly overridden) kube-context points at.
#[derive(Debug, Clone, Copy)]
pub struct SpaceVariable(pub SpaceField);

impl Resolve for SpaceVariable {
    fn resolve(
        &self,
        providers: &Providers,
        context_override: Option<&str>,
    ) -> Result<Outcome, ProviderError> {
        let Some(cache) = current_space(providers, context_override)? else {
            return Ok(Outcome::Unavailable);
        };
        Ok(Outcome::Resolved(match self.0 {
            SpaceField::Name => cache.space.name,
            SpaceField::Namespace => cache.service_account.namespace,
        }))
    }
}

/// Cached space for the effective context. Only a malformed space id is a hard error.
fn current_space(
    providers: &Providers,
    context_override: Option<&str>,
) -> Result<Option<SpaceCache>, ProviderError> {
    let context = match providers.effective_context(context_override) {
        Ok(context) => context,
        Err(e) => {
            debug!(error = %e, "No kube-context available");
            return Ok(None);
        }
    };

    match providers.contexts.is_space_context(&context) {
        Ok(true) => {}
        Ok(false) => return Ok(None),
        Err(e) => {
            debug!(context = %context, error = %e, "Unable to inspect kube-context");
            return Ok(None);
        }
    }

    let (space_id, provider_name) = providers.contexts.space_id(&context)?;

    let config = match providers.cloud.parse_provider_config() {
        Ok(config) => config,
        Err(e) => {
            debug!(error = %e, "Unable to parse provider config");
            return Ok(None);
        }
    };

    Ok(config
        .provider(&provider_name)
        .and_then(|provider| provider.space(space_id))
        .cloned())
}

/// Account name of the provider the context belongs to, or of the default provider.
#[derive(Debug, Clone, Copy)]
pub struct Username;

impl Resolve for Username {
    fn resolve(
        &self,
        providers: &Providers,
        context_override: Option<&str>,
    ) -> Result<Outcome, ProviderError> {
        let context = match providers.effective_context(context_override) {
            Ok(context) => Some(context),
            Err(ProviderError::NoCurrentContext(_)) => None,
            Err(e) => return Err(e),
        };

        let config = providers.cloud.parse_provider_config()?;

        let provider_name = context
            .and_then(|c| providers.contexts.space_id(&c).ok())
            .map(|(_, name)| name)
            .unwrap_or_else(|| config.default_provider().to_string());

        let Some(token) = config.provider(&provider_name).and_then(|p| p.token()) else {
            return Ok(Outcome::Unavailable);
        };

        match providers.accounts.account_name(token) {
            Ok(name) => Ok(Outcome::Resolved(name)),
            Err(e) => {
                debug!(provider = %provider_name, error = %e, "Unable to read account name");
                Ok(Outcome::Unavailable)
            }
        }
    }
}
