//! Error types for the PLAT SKILL task generator.
//!
//! This module defines a unified error enum covering configuration,
//! validation, transport, I/O and serialization failures. Parse degradation
//! is not represented here: the response parser never fails.

use thiserror::Error;

/// Unified error type for the PLAT SKILL task generator.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing credential, missing template or an unreadable config file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any external call was made
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The external call failed or returned a non-success status
    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Template store errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Transport error (status {}): {}", code, message),
        None => format!("Transport error: {}", message),
    }
}

impl AppError {
    /// Build a transport error without an upstream status.
    pub fn transport(message: impl Into<String>) -> Self {
        AppError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Build a transport error carrying the upstream HTTP status.
    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        AppError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Reasons an operation is refused before it reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required placeholders: {}", .0.join(", "))]
    MissingPlaceholders(Vec<String>),

    #[error("Missing required data: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Prompt too short ({length} characters). Minimum {min} characters required")]
    TemplateTooShort { length: usize, min: usize },

    #[error("Prompt too long ({length} characters). Maximum {max} characters allowed")]
    TemplateTooLong { length: usize, max: usize },

    #[error("Prompt template cannot be empty")]
    EmptyTemplate,

    #[error("Please select at least one column to export")]
    NoColumnsSelected,

    #[error("Unsupported language: {0}")]
    UnknownLanguage(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_placeholders_lists_every_name() {
        let err = ValidationError::MissingPlaceholders(vec![
            "{{semester}}".to_string(),
            "{{task-count}}".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required placeholders: {{semester}}, {{task-count}}"
        );
    }

    #[test]
    fn test_transport_message_includes_status() {
        let err = AppError::transport_status(403, "API key not valid");
        assert_eq!(
            err.to_string(),
            "Transport error (status 403): API key not valid"
        );

        let err = AppError::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_validation_converts_into_app_error() {
        let err: AppError = ValidationError::EmptyTemplate.into();
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyTemplate)));
    }
}
