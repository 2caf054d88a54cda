//! Random tokens and wall-clock time.

use super::ValueSource;
use crate::error::ProviderError;
use chrono::Utc;
use rand::Rng;

/// Lowercase so generated tokens are valid in kubernetes resource names.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemValues;

impl ValueSource for SystemValues {
    fn random_token(&self, length: usize) -> Result<String, ProviderError> {
        if length == 0 {
            return Err(ProviderError::Random("token length must be positive".to_string()));
        }
        let mut rng = rand::rng();
        Ok((0..length)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect())
    }

    fn unix_timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}
