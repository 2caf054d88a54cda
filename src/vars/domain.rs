//! Lazy resolution of `DEVSPACE_SPACE_DOMAIN<n>`.

use super::messages;
use super::pattern::ParametricName;
use crate::error::{ProviderError, VarError};
use crate::external::Providers;
use tracing::debug;

/// Walk context → space → provider config → domain list and pick the requested entry.
/// Every missing link is reported with its own error; nothing is cached. No selected
/// kube-context counts as "no space"; only store failures surface as `CurrentContext`.
pub(crate) fn resolve_domain(
    providers: &Providers,
    name: &str,
    request: &ParametricName,
    context_override: Option<&str>,
) -> Result<String, VarError> {
    let no_space = || VarError::NoSpace {
        name: name.to_string(),
        remediation: messages::space_remediation(),
    };

    let context = match providers.effective_context(context_override) {
        Ok(context) => context,
        Err(ProviderError::NoCurrentContext(source)) => {
            debug!(source = %source, "No kube-context selected");
            return Err(no_space());
        }
        Err(e) => return Err(VarError::CurrentContext(e)),
    };

    let (space_id, provider_name) = providers.contexts.space_id(&context).map_err(|e| {
        debug!(context = %context, error = %e, "Kube-context has no space");
        no_space()
    })?;

    let config = providers
        .cloud
        .parse_provider_config()
        .map_err(VarError::ProviderConfig)?;

    let provider = config
        .provider(&provider_name)
        .ok_or_else(|| VarError::ProviderNotFound {
            provider: provider_name.clone(),
            remediation: messages::provider_remediation(),
        })?;

    let cache = provider.space(space_id).ok_or_else(no_space)?;
    let domains = &cache.space.domains;

    domains
        .get(request.position())
        .map(|domain| domain.url.clone())
        .ok_or_else(|| VarError::DomainOutOfRange {
            name: name.to_string(),
            requested: request.index,
            available: domains.len(),
        })
}
