//! Shared configuration structures.
//!
//! Values come from the environment (optionally a `.env` file). Lookups go
//! through a closure so tests never touch the process environment.

use domain::HashingConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Memory per hash in KiB
pub const ENV_HASH_MEMORY_KIB: &str = "PASSWORD_HASH_MEMORY_KIB";

/// Argon2 passes per hash
pub const ENV_HASH_ITERATIONS: &str = "PASSWORD_HASH_ITERATIONS";

/// Argon2 lanes per hash
pub const ENV_HASH_PARALLELISM: &str = "PASSWORD_HASH_PARALLELISM";

pub const ENV_SERVICE_NAME: &str = "SERVICE_NAME";

pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

/// Base service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log filter directive
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "abalookup".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup(ENV_SERVICE_NAME).unwrap_or(defaults.service_name),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
        }
    }
}

/// Password hashing cost, as configured by the deployment.
///
/// Unset variables fall back to production-strength defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HashingSettings {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingSettings {
    fn default() -> Self {
        let production = HashingConfig::default();
        Self {
            memory_cost_kib: production.memory_cost_kib(),
            iterations: production.iterations(),
            parallelism: production.parallelism(),
        }
    }
}

impl HashingSettings {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns a configuration error if a variable is set but not a number.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load using an explicit variable lookup.
    ///
    /// # Errors
    /// Returns a configuration error if a variable is set but not a number.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            memory_cost_kib: read_u32(&lookup, ENV_HASH_MEMORY_KIB, defaults.memory_cost_kib)?,
            iterations: read_u32(&lookup, ENV_HASH_ITERATIONS, defaults.iterations)?,
            parallelism: read_u32(&lookup, ENV_HASH_PARALLELISM, defaults.parallelism)?,
        })
    }

    /// Validate into the value the entities hash with.
    ///
    /// # Errors
    /// Returns a configuration error if argon2 rejects the parameters.
    pub fn into_hashing_config(self) -> AppResult<HashingConfig> {
        let config = HashingConfig::new(self.memory_cost_kib, self.iterations, self.parallelism)
            .map_err(|e| AppError::configuration(e.to_string()))?;

        if is_below_production(&config) {
            tracing::warn!(
                memory_cost_kib = config.memory_cost_kib(),
                iterations = config.iterations(),
                "password hashing cost is below the production default"
            );
        }
        Ok(config)
    }
}

fn is_below_production(config: &HashingConfig) -> bool {
    let production = HashingConfig::default();
    config.memory_cost_kib() < production.memory_cost_kib()
        || config.iterations() < production.iterations()
}

fn read_u32(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> AppResult<u32> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("{} must be a whole number, got {:?}", key, value))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_hashing_defaults_are_production() {
        let settings = HashingSettings::from_vars(vars(&[])).unwrap();
        let config = settings.into_hashing_config().unwrap();

        assert_eq!(config, HashingConfig::default());
    }

    #[test]
    fn test_hashing_from_vars() {
        let settings = HashingSettings::from_vars(vars(&[
            (ENV_HASH_MEMORY_KIB, "65536"),
            (ENV_HASH_ITERATIONS, " 3 "),
            (ENV_HASH_PARALLELISM, "4"),
        ]))
        .unwrap();

        assert_eq!(
            settings,
            HashingSettings {
                memory_cost_kib: 65536,
                iterations: 3,
                parallelism: 4,
            }
        );
        assert!(settings.into_hashing_config().is_ok());
    }

    #[test]
    fn test_hashing_rejects_non_numeric() {
        let err = HashingSettings::from_vars(vars(&[(ENV_HASH_ITERATIONS, "many")])).unwrap_err();

        assert_eq!(err.code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains(ENV_HASH_ITERATIONS));
        assert!(err.to_string().contains("must be a whole number"));
    }

    #[test]
    fn test_hashing_zero_parses_then_fails_validation() {
        let settings = HashingSettings::from_vars(vars(&[(ENV_HASH_ITERATIONS, "0")])).unwrap();
        assert_eq!(settings.iterations, 0);

        assert!(settings.into_hashing_config().is_err());
    }

    #[test]
    fn test_below_production_checks_iterations() {
        let production = HashingConfig::default();
        let fewer_passes = HashingConfig::new(
            production.memory_cost_kib(),
            production.iterations() - 1,
            production.parallelism(),
        )
        .unwrap();

        assert!(!is_below_production(&production));
        assert!(is_below_production(&fewer_passes));
        assert!(is_below_production(&HashingConfig::low_cost()));
    }

    #[test]
    fn test_hashing_rejects_unusable_parameters() {
        let settings = HashingSettings {
            memory_cost_kib: 8,
            iterations: 0,
            parallelism: 1,
        };

        let err = settings.into_hashing_config().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_low_cost_settings_are_allowed() {
        let settings = HashingSettings {
            memory_cost_kib: 8,
            iterations: 1,
            parallelism: 1,
        };

        assert_eq!(
            settings.into_hashing_config().unwrap(),
            HashingConfig::low_cost()
        );
    }

    #[test]
    fn test_hashing_settings_deserialize_partial() {
        let settings: HashingSettings = serde_json::from_str(r#"{"iterations": 4}"#).unwrap();

        assert_eq!(settings.iterations, 4);
        assert_eq!(settings.memory_cost_kib, HashingSettings::default().memory_cost_kib);
    }

    #[test]
    fn test_service_config_from_vars() {
        let config = ServiceConfig::from_vars(vars(&[(ENV_LOG_LEVEL, "debug")]));

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.service_name, "abalookup");
    }
}
