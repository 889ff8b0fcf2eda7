//! Domain-level errors.
//!
//! These errors represent rule violations raised by entity constructors and
//! setters. They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An argument violated its type, emptiness or range rule
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The password hashing primitive failed
    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl DomainError {
    /// Create an invalid input error for a field
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a hashing error
    pub fn hashing(msg: impl Into<String>) -> Self {
        DomainError::Hashing(msg.into())
    }

    /// Check if this error is a validation failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DomainError::InvalidInput { .. })
    }

    /// Name of the offending field, for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            DomainError::InvalidInput { field, .. } => Some(field),
            DomainError::Hashing(_) => None,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = DomainError::invalid("email", "must not be empty");
        assert_eq!(err.to_string(), "Invalid input for email: must not be empty");
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("email"));
    }

    #[test]
    fn test_hashing_error_has_no_field() {
        let err = DomainError::hashing("rng unavailable");
        assert!(!err.is_invalid_input());
        assert_eq!(err.field(), None);
    }
}
