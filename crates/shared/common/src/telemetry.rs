//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServiceConfig;
use crate::error::{AppError, AppResult};

/// Install the global subscriber (verbose mode sets debug level).
///
/// # Errors
/// Returns a configuration error if the filter does not parse or a global
/// subscriber is already installed.
pub fn init_tracing(config: &ServiceConfig, verbose: bool) -> AppResult<()> {
    let filter = build_filter(config, verbose)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|e| AppError::configuration(format!("tracing already initialised: {}", e)))?;

    tracing::debug!(service = %config.service_name, "tracing initialised");
    Ok(())
}

fn build_filter(config: &ServiceConfig, verbose: bool) -> AppResult<EnvFilter> {
    let directive = if verbose { "debug" } else { config.log_level.as_str() };
    EnvFilter::try_new(directive)
        .map_err(|e| AppError::configuration(format!("invalid log filter {:?}: {}", directive, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_level() {
        let config = ServiceConfig {
            log_level: "abalookup=loud".to_string(),
            ..ServiceConfig::default()
        };

        assert!(build_filter(&config, true).is_ok());
        assert!(build_filter(&config, false).is_err());
    }

    #[test]
    fn test_init_twice_fails() {
        let config = ServiceConfig::default();

        // The first call may already fail if another test installed one
        let _ = init_tracing(&config, false);
        assert!(init_tracing(&config, false).is_err());
    }
}
