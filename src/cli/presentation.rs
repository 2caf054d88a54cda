//! CLI presentation: text and json formatters for resolved variables.

use crate::error::AppError;
use serde::Serialize;

const UNAVAILABLE: &str = "<unavailable>";

/// One static variable after a resolution pass.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VariableView {
    pub name: String,
    pub value: Option<String>,
}

/// One requested name after lookup; `value` is `None` for names that are not predefined.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LookupView {
    pub name: String,
    pub value: Option<String>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Output(e.to_string()))
}

fn unsupported(format: &str) -> AppError {
    AppError::Output(format!(
        "Unsupported format: {} (must be 'text' or 'json')",
        format
    ))
}

pub fn format_list_result(variables: &[VariableView], format: &str) -> Result<String, AppError> {
    match format {
        "json" => to_json(&serde_json::json!({ "variables": variables })),
        "text" => Ok(variables
            .iter()
            .map(|v| format!("{}={}", v.name, v.value.as_deref().unwrap_or(UNAVAILABLE)))
            .collect::<Vec<_>>()
            .join("\n")),
        other => Err(unsupported(other)),
    }
}

pub fn format_get_result(lookups: &[LookupView], format: &str) -> Result<String, AppError> {
    match format {
        "json" => to_json(&serde_json::json!({ "variables": lookups })),
        "text" => Ok(lookups
            .iter()
            .map(|l| match &l.value {
                Some(value) => format!("{}={}", l.name, value),
                None => format!("{}: not a predefined variable", l.name),
            })
            .collect::<Vec<_>>()
            .join("\n")),
        other => Err(unsupported(other)),
    }
}
