//! User domain entity and related types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{SEX_FEMALE, SEX_MALE};
use crate::error::{DomainError, DomainResult};
use crate::hashing::HashingConfig;
use crate::password::Password;
use crate::validation::{self, DISPLAY_NAME, EMAIL};

/// Disclosed sex of a user. Undisclosed is `None` at the use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Single-character storage code
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => SEX_MALE,
            Sex::Female => SEX_FEMALE,
        }
    }

    /// Parse an optional storage code; `None` means undisclosed.
    ///
    /// # Errors
    /// Returns `InvalidInput` for any code other than `M` or `F`.
    pub fn parse_code(code: Option<&str>) -> DomainResult<Option<Sex>> {
        code.map(Sex::from_str).transpose()
    }
}

impl FromStr for Sex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SEX_MALE => Ok(Sex::Male),
            SEX_FEMALE => Ok(Sex::Female),
            other => Err(DomainError::invalid(
                "sex",
                format!("expected M, F or nothing, got {:?}", other),
            )),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Parse a phone number entered as text.
///
/// # Errors
/// Returns `InvalidInput` for empty text or anything that is not a whole number.
pub fn parse_phone(input: &str) -> DomainResult<i64> {
    if input.is_empty() {
        return Err(DomainError::invalid("phone", "must not be empty"));
    }
    input
        .parse()
        .map_err(|_| DomainError::invalid("phone", "must be a whole number"))
}

/// Registration input for a new user.
#[derive(Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub display_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub email: String,
    /// Plaintext; hashed by [`User::new`]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
    pub therapist: bool,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub aba_course: bool,
    #[serde(default)]
    pub certificate_of_conduct: bool,
}

// Never print the plaintext password
impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("therapist", &self.therapist)
            .field("sex", &self.sex)
            .field("aba_course", &self.aba_course)
            .field("certificate_of_conduct", &self.certificate_of_conduct)
            .finish()
    }
}

impl NewUser {
    /// Required fields; the optional ones start undisclosed / false.
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        therapist: bool,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password: password.into(),
            therapist,
            sex: None,
            aba_course: false,
            certificate_of_conduct: false,
        }
    }

    pub fn with_sex(mut self, sex: Option<Sex>) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_aba_course(mut self, aba_course: bool) -> Self {
        self.aba_course = aba_course;
        self
    }

    pub fn with_certificate_of_conduct(mut self, certificate_of_conduct: bool) -> Self {
        self.certificate_of_conduct = certificate_of_conduct;
        self
    }
}

/// A registered account.
///
/// Fields are only reachable through validating setters, so a `User` value
/// always satisfies its invariants. `Debug` output never shows the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub(crate) id: Option<i64>,
    pub(crate) display_name: String,
    pub(crate) email: String,
    pub(crate) password: Password,
    pub(crate) phone: Option<i64>,
    pub(crate) therapist: bool,
    pub(crate) sex: Option<Sex>,
    pub(crate) aba_course: bool,
    pub(crate) certificate_of_conduct: bool,
    pub(crate) verified: bool,
    pub(crate) moderator: bool,
}

impl User {
    /// Create a new, unverified, non-moderator user.
    ///
    /// The plaintext password is hashed with `hashing` before the user exists.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the display name, email or password is
    /// empty, or `Hashing` if the password could not be hashed.
    pub fn new(input: NewUser, hashing: &HashingConfig) -> DomainResult<Self> {
        input
            .validate()
            .map_err(|errors| validation::first_violation(&errors))?;

        let password = Password::new(&input.password, hashing)?;

        Ok(Self {
            id: None,
            display_name: input.display_name,
            email: input.email,
            password,
            phone: None,
            therapist: input.therapist,
            sex: input.sex,
            aba_course: input.aba_course,
            certificate_of_conduct: input.certificate_of_conduct,
            verified: false,
            moderator: false,
        })
    }

    /// Record the id handed out by storage after the first save.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the user already has an id.
    pub fn assign_id(&mut self, id: i64) -> DomainResult<&mut Self> {
        if self.id.is_some() {
            return Err(DomainError::invalid("id", "already assigned"));
        }
        self.id = Some(id);
        Ok(self)
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) -> DomainResult<&mut Self> {
        let display_name = display_name.into();
        DISPLAY_NAME.check("display_name", &display_name)?;
        self.display_name = display_name;
        Ok(self)
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> DomainResult<&mut Self> {
        let email = email.into();
        EMAIL.check("email", &email)?;
        self.email = email;
        Ok(self)
    }

    /// Replace the password. `password` must be plaintext; it is hashed here.
    pub fn set_password(
        &mut self,
        password: &str,
        hashing: &HashingConfig,
    ) -> DomainResult<&mut Self> {
        self.password = Password::new(password, hashing)?;
        Ok(self)
    }

    pub fn set_phone(&mut self, phone: i64) -> &mut Self {
        self.phone = Some(phone);
        self
    }

    /// Set the phone number from form text.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless the text is a whole number.
    pub fn set_phone_text(&mut self, phone: &str) -> DomainResult<&mut Self> {
        let phone = parse_phone(phone)?;
        Ok(self.set_phone(phone))
    }

    pub fn set_therapist(&mut self, therapist: bool) -> &mut Self {
        self.therapist = therapist;
        self
    }

    /// Set the sex; `None` means undisclosed.
    pub fn set_sex(&mut self, sex: Option<Sex>) -> &mut Self {
        self.sex = sex;
        self
    }

    /// Set the sex from its storage code.
    ///
    /// # Errors
    /// Returns `InvalidInput` for any code other than `M`, `F` or `None`.
    pub fn set_sex_code(&mut self, code: Option<&str>) -> DomainResult<&mut Self> {
        let sex = Sex::parse_code(code)?;
        Ok(self.set_sex(sex))
    }

    pub fn set_aba_course(&mut self, aba_course: bool) -> &mut Self {
        self.aba_course = aba_course;
        self
    }

    pub fn set_certificate_of_conduct(&mut self, certificate_of_conduct: bool) -> &mut Self {
        self.certificate_of_conduct = certificate_of_conduct;
        self
    }

    pub fn set_verified(&mut self, verified: bool) -> &mut Self {
        self.verified = verified;
        self
    }

    pub fn set_moderator(&mut self, moderator: bool) -> &mut Self {
        self.moderator = moderator;
        self
    }

    /// Check a plaintext password against the stored hash.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `password` is empty.
    pub fn verify_password(&self, password: &str) -> DomainResult<bool> {
        if password.is_empty() {
            return Err(DomainError::invalid("password", "must not be empty"));
        }
        Ok(self.password.verify(password))
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored password hash, for persistence
    pub fn password_hash(&self) -> &str {
        self.password.as_str()
    }

    pub fn phone(&self) -> Option<i64> {
        self.phone
    }

    pub fn is_therapist(&self) -> bool {
        self.therapist
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    pub fn aba_course(&self) -> bool {
        self.aba_course
    }

    pub fn has_certificate_of_conduct(&self) -> bool {
        self.certificate_of_conduct
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn is_moderator(&self) -> bool {
        self.moderator
    }
}
