//! Domain layer - validated entities for the AbaLookup service.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! `User` and `Location` can only be built and changed through validating
//! constructors and setters; persistence goes through the flat records in
//! [`record`].

pub mod constants;
pub mod error;
pub mod hashing;
pub mod location;
pub mod password;
pub mod record;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use hashing::HashingConfig;
pub use location::Location;
pub use password::Password;
pub use record::{LocationRecord, UserRecord};
pub use user::{parse_phone, NewUser, Sex, User};
pub use validation::StringLength;
