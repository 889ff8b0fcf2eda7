//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum number of characters in a user's display name
pub const MIN_LENGTH_DISPLAY_NAME: u64 = 1;

/// Minimum number of characters in an email address
pub const MIN_LENGTH_EMAIL: u64 = 1;

/// Minimum number of characters in a location name
pub const MIN_LENGTH_LOCATION_NAME: u64 = 1;

/// Recommended minimum password length for registration forms.
///
/// Advisory only: the entity layer accepts any non-empty password.
pub const MIN_LENGTH_PASSWORD: u64 = 8;

/// Recommended minimum number of digits for a phone number.
///
/// Seven digits allows numbers without an area code (e.g. 5551234).
/// Advisory only: the entity layer accepts any whole number.
pub const MIN_LENGTH_PHONE_NUMBER: u64 = 7;

// =============================================================================
// Profile codes
// =============================================================================

/// Stored code for a male user
pub const SEX_MALE: &str = "M";

/// Stored code for a female user
pub const SEX_FEMALE: &str = "F";
