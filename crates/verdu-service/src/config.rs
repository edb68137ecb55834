//! # Runtime Configuration
//!
//! Environment-driven settings for the engine. Every knob has a default
//! suited to a single-register deployment, so an empty environment is a
//! valid one.
//!
//! | Variable                   | Default                        |
//! |----------------------------|--------------------------------|
//! | `VERDU_DATABASE_PATH`      | `verdu.db`                     |
//! | `VERDU_PRINTER_URL`        | `http://localhost:3002/print`  |
//! | `VERDU_PRINTER_TIMEOUT_MS` | `2000`                         |
//! | `VERDU_STORE_NAME`         | `VERDULERIA`                   |

use std::time::Duration;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Runtime settings for the sale engine.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path to the SQLite database file.
    pub database_path: String,
    /// Endpoint of the thermal printer bridge.
    pub printer_url: String,
    /// Per-request timeout for the printer bridge.
    pub printer_timeout: Duration,
    /// First line of every printed receipt.
    pub store_name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            database_path: "verdu.db".to_string(),
            printer_url: "http://localhost:3002/print".to_string(),
            printer_timeout: Duration::from_millis(2000),
            store_name: "VERDULERIA".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Loads settings from the environment, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();

        let printer_timeout = match std::env::var("VERDU_PRINTER_TIMEOUT_MS") {
            Ok(value) => {
                let ms: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "VERDU_PRINTER_TIMEOUT_MS",
                    value,
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => defaults.printer_timeout,
        };

        Ok(ServiceConfig {
            database_path: std::env::var("VERDU_DATABASE_PATH")
                .unwrap_or(defaults.database_path),
            printer_url: std::env::var("VERDU_PRINTER_URL").unwrap_or(defaults.printer_url),
            printer_timeout,
            store_name: std::env::var("VERDU_STORE_NAME").unwrap_or(defaults.store_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.database_path, "verdu.db");
        assert_eq!(config.printer_url, "http://localhost:3002/print");
        assert_eq!(config.printer_timeout, Duration::from_millis(2000));
        assert_eq!(config.store_name, "VERDULERIA");
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        // Set/unset env vars race across test threads, so this test owns
        // a variable no other test touches
        std::env::set_var("VERDU_PRINTER_TIMEOUT_MS", "soon");
        let err = ServiceConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "VERDU_PRINTER_TIMEOUT_MS",
                ..
            }
        ));
        std::env::remove_var("VERDU_PRINTER_TIMEOUT_MS");
    }
}
