//! Error types for predefined variable resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by the external context providers (kube-config, cloud config,
/// account tokens, git, value generators).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No current kube-context set in {0}")]
    NoCurrentContext(String),

    #[error("Unable to find kube-context '{0}' in kube-config file")]
    ContextNotFound(String),

    #[error("Kube-context '{0}' is not a space")]
    NotASpace(String),

    #[error("Invalid space id '{value}' in kube-context '{context}'")]
    InvalidSpaceId { context: String, value: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid account token: {0}")]
    InvalidToken(String),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Failed to generate random token: {0}")]
    Random(String),

    #[error("Store unavailable: {0}")]
    Store(String),
}

/// Errors produced by the variable registry, its resolution pass and lookups.
#[derive(Debug, Error)]
pub enum VarError {
    #[error("fill predefined var {name}: {source}")]
    Fill {
        name: String,
        #[source]
        source: ProviderError,
    },

    #[error("{message}")]
    Unavailable { name: String, message: String },

    #[error("Error parsing variable {name}: {reason}")]
    MalformedIndex { name: String, reason: String },

    #[error("get current context: {0}")]
    CurrentContext(#[source] ProviderError),

    #[error("parse provider config: {0}")]
    ProviderConfig(#[source] ProviderError),

    #[error("Couldn't find space provider: {provider}.{remediation}")]
    ProviderNotFound {
        provider: String,
        remediation: String,
    },

    #[error("No space configured, but predefined var {name} is used.{remediation}")]
    NoSpace { name: String, remediation: String },

    #[error("Error loading {name}: requested {requested}, available {available} (the space has fewer domains than requested)")]
    DomainOutOfRange {
        name: String,
        requested: usize,
        available: usize,
    },

    #[error("Predefined var {0} is already defined")]
    Duplicate(String),
}

impl VarError {
    /// Whether the looked-up name was recognized as a predefined variable.
    ///
    /// Unresolved static variables and failures inside a well-formed parametric name count
    /// as recognized; malformed parametric indexes do not.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, VarError::MalformedIndex { .. } | VarError::Duplicate(_))
    }
}

/// Errors surfaced by the CLI and configuration layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Var(#[from] VarError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
