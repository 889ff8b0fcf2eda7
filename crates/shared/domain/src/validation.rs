//! Field validation rules shared by the entities.

use validator::{ValidateLength, ValidationErrors};

use crate::constants::{MIN_LENGTH_DISPLAY_NAME, MIN_LENGTH_EMAIL, MIN_LENGTH_LOCATION_NAME};
use crate::error::{DomainError, DomainResult};

/// Minimum character count rule for text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLength {
    min: u64,
}

impl StringLength {
    pub const fn min(min: u64) -> Self {
        Self { min }
    }

    /// Check a value against the rule, counting characters rather than bytes.
    pub fn is_valid(&self, value: &str) -> bool {
        value.validate_length(Some(self.min), None, None)
    }

    /// Check a value, naming the field in the error.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the value is too short.
    pub fn check(&self, field: &str, value: &str) -> DomainResult<()> {
        if self.is_valid(value) {
            Ok(())
        } else if value.is_empty() {
            Err(DomainError::invalid(field, "must not be empty"))
        } else {
            Err(DomainError::invalid(
                field,
                format!("must be at least {} characters", self.min),
            ))
        }
    }
}

pub const DISPLAY_NAME: StringLength = StringLength::min(MIN_LENGTH_DISPLAY_NAME);
pub const EMAIL: StringLength = StringLength::min(MIN_LENGTH_EMAIL);
pub const LOCATION_NAME: StringLength = StringLength::min(MIN_LENGTH_LOCATION_NAME);

/// Convert derive-based validation errors into the first offending field.
///
/// Fields are visited in name order so the reported field is stable.
pub(crate) fn first_violation(errors: &ValidationErrors) -> DomainError {
    let mut violations: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let reason = field_errors
                .first()
                .and_then(|error| error.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            (field.to_string(), reason)
        })
        .collect();
    violations.sort();

    match violations.into_iter().next() {
        Some((field, reason)) => DomainError::invalid(field, reason),
        None => DomainError::invalid("input", "validation failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_one_rejects_empty() {
        assert!(!DISPLAY_NAME.is_valid(""));
        assert!(DISPLAY_NAME.is_valid("a"));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let rule = StringLength::min(2);
        assert!(!rule.is_valid("é"));
        assert!(rule.is_valid("éé"));
    }

    #[test]
    fn test_check_names_field() {
        let err = LOCATION_NAME.check("name", "").unwrap_err();
        assert_eq!(err, DomainError::invalid("name", "must not be empty"));
    }

    #[test]
    fn test_check_reports_minimum() {
        let err = StringLength::min(3).check("code", "ab").unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid("code", "must be at least 3 characters")
        );
    }

    #[test]
    fn test_whitespace_counts_as_content() {
        assert!(EMAIL.check("email", " ").is_ok());
    }
}
