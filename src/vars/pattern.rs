//! Parametric variable names: a reserved prefix followed by a 1-based decimal index.
//!
//! The suffix must be one or more ASCII digits with a value of at least 1. Leading zeros are
//! accepted (`DEVSPACE_SPACE_DOMAIN01` is index 1); signs, whitespace and an empty suffix are
//! malformed.

use crate::error::VarError;

/// Prefix of the space domain family (`DEVSPACE_SPACE_DOMAIN1`, `DEVSPACE_SPACE_DOMAIN2`, ...).
pub const DOMAIN_PREFIX: &str = "DEVSPACE_SPACE_DOMAIN";

/// A parsed parametric variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParametricName {
    pub prefix: &'static str,
    /// 1-based index
    pub index: usize,
}

impl ParametricName {
    /// Match `name` (case-insensitive) against the parametric family.
    ///
    /// `Ok(None)` when the prefix does not match, an error when it matches but the index
    /// suffix is malformed.
    pub fn parse(name: &str) -> Result<Option<Self>, VarError> {
        let upper = name.to_ascii_uppercase();
        let Some(suffix) = upper.strip_prefix(DOMAIN_PREFIX) else {
            return Ok(None);
        };

        let index = parse_index(suffix).map_err(|reason| VarError::MalformedIndex {
            name: name.to_string(),
            reason,
        })?;

        Ok(Some(Self {
            prefix: DOMAIN_PREFIX,
            index,
        }))
    }

    /// 0-based position in the underlying list.
    pub fn position(&self) -> usize {
        self.index - 1
    }
}

fn parse_index(suffix: &str) -> Result<usize, String> {
    if suffix.is_empty() {
        return Err("missing numeric index".to_string());
    }
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("index '{}' is not a number", suffix));
    }
    let index: usize = suffix
        .parse()
        .map_err(|_| format!("index '{}' is too large", suffix))?;
    if index == 0 {
        return Err("index must be 1 or greater".to_string());
    }
    Ok(index)
}
