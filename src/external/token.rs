//! Account names from authentication tokens.

use super::AccountDirectory;
use crate::error::ProviderError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    name: Option<String>,
}

/// Reads the `name` claim from a JWT payload. The signature is not verified; the token
/// only serves as a local record of who is logged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAccounts;

impl AccountDirectory for TokenAccounts {
    fn account_name(&self, token: &str) -> Result<String, ProviderError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
            _ => {
                return Err(ProviderError::InvalidToken(
                    "expected three dot-separated segments".to_string(),
                ))
            }
        };

        let decoded = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ProviderError::InvalidToken(format!("payload is not base64: {}", e)))?;
        let claims: Claims = serde_json::from_slice(&decoded)
            .map_err(|e| ProviderError::InvalidToken(format!("payload is not JSON: {}", e)))?;

        claims
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ProviderError::InvalidToken("missing name claim".to_string()))
    }
}
