//! Password hashing configuration.
//!
//! The work factor is an explicit, immutable value handed to every operation
//! that derives a hash. Deployments pick it at startup; tests use
//! [`HashingConfig::low_cost`].

use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{DomainError, DomainResult};

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    memory_cost_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl HashingConfig {
    /// Build a configuration, rejecting parameters argon2 cannot use.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the memory, iteration or lane count is out
    /// of range (e.g. less than 8 KiB of memory per lane).
    pub fn new(memory_cost_kib: u32, iterations: u32, parallelism: u32) -> DomainResult<Self> {
        Params::new(memory_cost_kib, iterations, parallelism, None)
            .map_err(|e| DomainError::invalid("hashing", e.to_string()))?;

        Ok(Self {
            memory_cost_kib,
            iterations,
            parallelism,
        })
    }

    /// Cheapest parameters argon2 accepts.
    ///
    /// Only suitable for tests: hashes made with it are fast to brute-force.
    pub const fn low_cost() -> Self {
        Self {
            memory_cost_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    pub fn memory_cost_kib(&self) -> u32 {
        self.memory_cost_kib
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    /// Argon2id instance for deriving new hashes.
    pub(crate) fn hasher(&self) -> DomainResult<Argon2<'static>> {
        let params = Params::new(self.memory_cost_kib, self.iterations, self.parallelism, None)
            .map_err(|e| DomainError::hashing(format!("Invalid argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Production-strength parameters (argon2 crate defaults).
impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stronger_than_low_cost() {
        let production = HashingConfig::default();
        let test = HashingConfig::low_cost();

        assert!(production.memory_cost_kib() > test.memory_cost_kib());
        assert!(production.iterations() >= test.iterations());
    }

    #[test]
    fn test_new_accepts_valid_parameters() {
        let config = HashingConfig::new(4096, 3, 1).unwrap();
        assert_eq!(config.memory_cost_kib(), 4096);
        assert_eq!(config.iterations(), 3);
        assert_eq!(config.parallelism(), 1);
    }

    #[test]
    fn test_new_rejects_zero_iterations() {
        let err = HashingConfig::new(4096, 0, 1).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.field(), Some("hashing"));
    }

    #[test]
    fn test_new_rejects_too_little_memory() {
        assert!(HashingConfig::new(1, 1, 1).is_err());
    }

    #[test]
    fn test_low_cost_builds_hasher() {
        assert!(HashingConfig::low_cost().hasher().is_ok());
    }
}
