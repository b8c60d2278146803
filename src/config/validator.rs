//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Every command descriptor must name a program

use crate::config::schema::ParexecConfig;
use crate::error::{ParexecError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Group label the error belongs to
    pub group: String,
    /// Position of the offending command within its group (0-based)
    pub function: Option<usize>,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &ParexecConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, group) in config.functions.iter().enumerate() {
        let label = group.label(index);
        for (position, function) in group.execdata.iter().enumerate() {
            if function.cmd.trim().is_empty() {
                let display = function
                    .name
                    .as_deref()
                    .map(|n| format!(" ('{}')", n))
                    .unwrap_or_default();
                errors.push(ValidationError {
                    rule: "empty-command".to_string(),
                    message: format!(
                        "Command {}{} in '{}' has an empty 'cmd'",
                        position + 1,
                        display,
                        label
                    ),
                    group: label.clone(),
                    function: Some(position),
                });
            }
        }
    }

    errors
}

/// Validate a configuration and fail on the first batch of errors.
pub fn validate(config: &ParexecConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(ParexecError::ConfigValidationError { message })
}
