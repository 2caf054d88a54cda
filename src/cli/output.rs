//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{AppError, VarError};
use std::error::Error;

/// Map domain errors to a string for CLI output.
///
/// Unavailable variables print their name and remediation text; everything else keeps the
/// error chain flattened into one line.
pub fn map_error(e: &AppError) -> String {
    match e {
        AppError::Var(VarError::Unavailable { name, message }) => {
            format!("{} is not available: {}", name, message)
        }
        other => {
            let mut message = other.to_string();
            let mut source = other.source();
            while let Some(cause) = source {
                let text = cause.to_string();
                if !message.contains(&text) {
                    message.push_str(": ");
                    message.push_str(&text);
                }
                source = cause.source();
            }
            message
        }
    }
}
