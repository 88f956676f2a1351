//! Tracing setup for hosts embedding the engine.
//!
//! The engine itself only emits `tracing` events; installing a subscriber is
//! the host's call, usually once at startup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LoggingConfig;
use crate::error::AppError;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured filter. Returns `Ok(false)` when a
/// global subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<bool, AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| AppError::Config(format!("Invalid log filter {:?}: {}", config.filter, e)))?,
    };

    let result = if config.json {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()
    };

    Ok(result.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();

        // Another test may have installed a subscriber first; either way the
        // second call must not succeed.
        init_logging(&config).unwrap();
        assert!(!init_logging(&config).unwrap());
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        let config = LoggingConfig {
            filter: "daychat=loud".to_string(),
            json: false,
        };

        temp_env::with_var_unset("RUST_LOG", || {
            let err = init_logging(&config).unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        });
    }
}
