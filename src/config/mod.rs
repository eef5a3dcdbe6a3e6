//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DASHBOARD_PREFS` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working
//! development configuration.
//!
//! # Example
//!
//! ```no_run
//! use dashboard_prefs::config::AppConfig;
//!
//! # fn main() -> Result<(), dashboard_prefs::config::ConfigError> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! println!("Auth service at {}", config.auth.api_base_url);
//! # Ok(())
//! # }
//! ```

mod auth;
mod error;
mod logging;
mod storage;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{Environment, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Authentication service (base URL, timeout, resumed session)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Entry storage (backend, file path, time-to-live windows)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging (filter, format, environment)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DASHBOARD_PREFS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DASHBOARD_PREFS__AUTH__API_BASE_URL=...` -> `auth.api_base_url = ...`
    /// - `DASHBOARD_PREFS__STORAGE__BACKEND=memory` -> `storage.backend = memory`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DASHBOARD_PREFS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.auth.validate(&self.logging.environment)?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.logging.is_production()
    }
}
