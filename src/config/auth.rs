//! Authentication service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::logging::Environment;

/// Authentication service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the authentication service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Existing session cookie (`name=value`) to resume a signed-in session
    #[serde(default)]
    pub session_cookie: Option<SecretString>,
}

impl AuthConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the service URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__API_BASE_URL"));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if *environment == Environment::Production && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::ApiBaseUrlMustBeHttps);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(cookie) = &self.session_cookie {
            let has_name = cookie
                .expose_secret()
                .split_once('=')
                .is_some_and(|(name, _)| !name.trim().is_empty());
            if !has_name {
                return Err(ValidationError::InvalidSessionCookie);
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            session_cookie: None,
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.session_cookie.is_none());
    }

    #[test]
    fn test_validation_defaults_ok_in_development() {
        assert!(AuthConfig::default().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = AuthConfig {
            api_base_url: "localhost:5000".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidApiBaseUrl)
        );
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            api_base_url: "http://auth.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::ApiBaseUrlMustBeHttps)
        );
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = AuthConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());

        let config = AuthConfig {
            request_timeout_secs: 121,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_session_cookie_shape() {
        let config = AuthConfig {
            session_cookie: Some(SecretString::new("token".to_string())),
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidSessionCookie)
        );

        let config = AuthConfig {
            session_cookie: Some(SecretString::new("token=abc".to_string())),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_session_cookie_is_redacted_in_debug() {
        let config = AuthConfig {
            session_cookie: Some(SecretString::new("token=abc".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("abc"));
    }
}
