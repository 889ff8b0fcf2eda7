//! Password value object - hashing and verification.
//!
//! A `Password` only ever holds an Argon2id PHC string. The plaintext is
//! hashed on construction and dropped.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2,
};

use crate::error::{DomainError, DomainResult};
use crate::hashing::HashingConfig;

/// Hashed password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with the given cost parameters.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the plaintext is empty, or `Hashing` if the
    /// hashing primitive fails.
    pub fn new(plain_text: &str, config: &HashingConfig) -> DomainResult<Self> {
        if plain_text.is_empty() {
            return Err(DomainError::invalid("password", "must not be empty"));
        }

        let hash = Self::hash(plain_text, config)?;
        Ok(Self { hash })
    }

    /// Restore a Password from a stored hash.
    ///
    /// The hash is parsed but never re-derived.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless the string is an argon2 PHC hash with
    /// both a salt and a hash output.
    pub fn from_hash(hash: impl Into<String>) -> DomainResult<Self> {
        let hash = hash.into();
        Self::check_hash(&hash)?;
        Ok(Self { hash })
    }

    // A bare `$ident` parses as PHC, so the algorithm, salt and output are
    // all required before a string counts as a hash.
    fn check_hash(hash: &str) -> DomainResult<()> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::invalid("password", format!("not a password hash: {}", e)))?;

        Algorithm::try_from(parsed.algorithm).map_err(|e| {
            DomainError::invalid("password", format!("not an argon2 hash: {}", e))
        })?;

        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(DomainError::invalid(
                "password",
                "hash is missing its salt or output",
            ));
        }
        Ok(())
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Cost parameters and salt are read from the stored hash, and the
    /// comparison is constant-time.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn hash(plain_text: &str, config: &HashingConfig) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = config
            .hasher()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(format!("Password hash failed: {}", e)))?;

        tracing::debug!(
            memory_cost_kib = config.memory_cost_kib(),
            iterations = config.iterations(),
            parallelism = config.parallelism(),
            "password hashed"
        );
        Ok(hash.to_string())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
