//! Flat persistence rows for the entities.
//!
//! Storage reads and writes these records; converting a record back into an
//! entity re-runs every field rule, so a corrupt row never becomes an entity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::location::Location;
use crate::password::Password;
use crate::user::{Sex, User};
use crate::validation::{DISPLAY_NAME, EMAIL, LOCATION_NAME};

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Option<i64>,
    pub display_name: String,
    pub email: String,
    /// PHC hash string, never plaintext
    pub password: String,
    pub phone: Option<i64>,
    pub therapist: bool,
    /// One-character code, NULL when undisclosed
    pub sex: Option<String>,
    pub aba_course: bool,
    pub certificate_of_conduct: bool,
    pub verified: bool,
    pub moderator: bool,
}

/// Row of the `locations` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: Option<i64>,
    pub name: String,
    pub enabled: bool,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            password: user.password.as_str().to_string(),
            phone: user.phone,
            therapist: user.therapist,
            sex: user.sex.map(|sex| sex.code().to_string()),
            aba_course: user.aba_course,
            certificate_of_conduct: user.certificate_of_conduct,
            verified: user.verified,
            moderator: user.moderator,
        }
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        UserRecord::from(&user)
    }
}

/// Convert a stored row back into a domain entity
impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> DomainResult<Self> {
        DISPLAY_NAME.check("display_name", &record.display_name)?;
        EMAIL.check("email", &record.email)?;
        let sex = Sex::parse_code(record.sex.as_deref())?;
        let password = Password::from_hash(record.password)?;

        tracing::debug!(id = ?record.id, "user restored from record");
        Ok(User {
            id: record.id,
            display_name: record.display_name,
            email: record.email,
            password,
            phone: record.phone,
            therapist: record.therapist,
            sex,
            aba_course: record.aba_course,
            certificate_of_conduct: record.certificate_of_conduct,
            verified: record.verified,
            moderator: record.moderator,
        })
    }
}

impl From<&Location> for LocationRecord {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            enabled: location.enabled,
        }
    }
}

impl From<Location> for LocationRecord {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            enabled: location.enabled,
        }
    }
}

impl TryFrom<LocationRecord> for Location {
    type Error = DomainError;

    fn try_from(record: LocationRecord) -> DomainResult<Self> {
        LOCATION_NAME.check("name", &record.name)?;

        tracing::debug!(id = ?record.id, "location restored from record");
        Ok(Location {
            id: record.id,
            name: record.name,
            enabled: record.enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::HashingConfig;
    use crate::user::NewUser;

    fn create_test_user() -> User {
        let input = NewUser::new("Jane", "jane@email.com", "password", true)
            .with_sex(Some(Sex::Female));
        User::new(input, &HashingConfig::low_cost()).unwrap()
    }

    #[test]
    fn test_user_record_keeps_hash() {
        let user = create_test_user();
        let record = UserRecord::from(&user);

        assert_eq!(record.password, user.password_hash());
        assert_eq!(record.sex.as_deref(), Some("F"));
        assert_eq!(record.phone, None);
    }

    #[test]
    fn test_user_restored_from_record() {
        let mut user = create_test_user();
        user.assign_id(12).unwrap();
        user.set_phone(5551234).set_moderator(true);

        let restored = User::try_from(UserRecord::from(&user)).unwrap();

        assert_eq!(restored, user);
        assert!(restored.verify_password("password").unwrap());
    }

    #[test]
    fn test_user_record_with_bad_sex() {
        let mut record = UserRecord::from(create_test_user());
        record.sex = Some("X".to_string());

        let err = User::try_from(record).unwrap_err();
        assert_eq!(err.field(), Some("sex"));
    }

    #[test]
    fn test_user_record_with_plaintext_password() {
        let mut record = UserRecord::from(create_test_user());
        record.password = "password".to_string();

        let err = User::try_from(record).unwrap_err();
        assert_eq!(err.field(), Some("password"));
    }

    #[test]
    fn test_user_record_with_bare_phc_identifier() {
        let mut record = UserRecord::from(create_test_user());
        record.password = "$hunter2".to_string();

        let err = User::try_from(record).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("password"));
    }

    #[test]
    fn test_user_record_with_empty_email() {
        let mut record = UserRecord::from(create_test_user());
        record.email = String::new();

        assert!(User::try_from(record).is_err());
    }

    #[test]
    fn test_location_record_roundtrip() {
        let mut location = Location::new("Clinic A").unwrap();
        location.assign_id(3).unwrap();
        location.disable();

        let record = LocationRecord::from(&location);
        assert_eq!(record.id, Some(3));
        assert!(!record.enabled);

        assert_eq!(Location::try_from(record).unwrap(), location);
    }

    #[test]
    fn test_location_record_with_empty_name() {
        let record = LocationRecord {
            id: Some(1),
            name: String::new(),
            enabled: true,
        };

        assert!(Location::try_from(record).unwrap_err().is_invalid_input());
    }
}
