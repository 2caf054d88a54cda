//! Commit hash of a working tree via the `git` binary.

use super::RepositoryInspector;
use crate::error::ProviderError;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl RepositoryInspector for GitCli {
    fn repository_hash(&self, path: &Path) -> Result<String, ProviderError> {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(path)
            .output()
            .map_err(|e| ProviderError::Git(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            return Err(ProviderError::Git(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if hash.is_empty() {
            return Err(ProviderError::Git("empty commit hash".to_string()));
        }
        Ok(hash)
    }
}
