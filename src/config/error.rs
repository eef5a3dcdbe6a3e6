//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Auth API base URL must start with http:// or https://")]
    InvalidApiBaseUrl,

    #[error("Auth API base URL must use HTTPS in production")]
    ApiBaseUrlMustBeHttps,

    #[error("Session cookie must have the form name=value")]
    InvalidSessionCookie,

    #[error("Entry time-to-live must be at least one day: {0}")]
    InvalidTtl(&'static str),
}
