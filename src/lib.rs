//! runvars: predefined deployment variables resolved from the local environment.
//!
//! A [`vars::VariableRegistry`] holds the static predefined variables (`DEVSPACE_RANDOM`,
//! `DEVSPACE_SPACE`, ...). One resolution pass fills them from the kube-context store, the
//! cloud provider config, the git working tree and the system clock; lookups then read the
//! cache or, for `DEVSPACE_SPACE_DOMAIN<n>`, resolve on demand.

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logging;
pub mod vars;
