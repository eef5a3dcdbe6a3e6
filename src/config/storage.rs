//! Entry storage configuration

use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where consent and preference entries are kept
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; entries vanish on exit
    Memory,
    /// YAML file on disk
    #[default]
    File,
}

/// Entry storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// File used by the `file` backend
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Lifetime of consent entries in days
    #[serde(default = "default_consent_ttl_days")]
    pub consent_ttl_days: i64,

    /// Lifetime of preference entries in days
    #[serde(default = "default_preferences_ttl_days")]
    pub preferences_ttl_days: i64,
}

impl StorageConfig {
    pub fn consent_ttl(&self) -> Duration {
        Duration::days(self.consent_ttl_days)
    }

    pub fn preferences_ttl(&self) -> Duration {
        Duration::days(self.preferences_ttl_days)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__PATH"));
        }
        if self.consent_ttl_days < 1 {
            return Err(ValidationError::InvalidTtl("consent_ttl_days"));
        }
        if self.preferences_ttl_days < 1 {
            return Err(ValidationError::InvalidTtl("preferences_ttl_days"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            consent_ttl_days: default_consent_ttl_days(),
            preferences_ttl_days: default_preferences_ttl_days(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("./data/dashboard-entries.yaml")
}

fn default_consent_ttl_days() -> i64 {
    365
}

fn default_preferences_ttl_days() -> i64 {
    30
}
