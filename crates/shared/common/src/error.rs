//! Application error handling for the layers around the entities.
//!
//! Domain validation failures become form errors naming the offending field;
//! everything else is hidden behind a generic message.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // Validation
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    // Startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field a form should highlight, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation { field, message } => {
                format!("{} {}", humanize(field), message)
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "The service is misconfigured".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

/// `display_name` -> `Display name`
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput { field, reason } => AppError::Validation {
                field,
                message: reason,
            },
            DomainError::Hashing(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
