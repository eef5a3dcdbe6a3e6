//! PreferenceStore - per-user preference record with a shorter expiry.
//!
//! The store does not check consent. Deciding whether a write may happen is
//! the gate's job.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::foundation::UserId;
use crate::domain::preferences::PreferenceRecord;
use crate::ports::{Clock, EntryStorage, StorageKey};

/// Default lifetime of a preference entry.
pub const DEFAULT_PREFERENCES_TTL_DAYS: i64 = 30;

/// Reads and writes the stored preference record for a user.
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn EntryStorage>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn EntryStorage>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            storage,
            clock,
            ttl,
        }
    }

    /// The stored record, or the default one when it is missing, expired,
    /// unreadable or cannot be decoded.
    pub async fn get_preferences(&self, user: &UserId) -> PreferenceRecord {
        let key = StorageKey::preferences(user);

        let payload = match self.storage.get(&key, self.clock.now()).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return PreferenceRecord::default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read preferences, using defaults");
                return PreferenceRecord::default();
            }
        };

        match PreferenceRecord::decode(&payload) {
            Ok(record) => {
                tracing::debug!(key = %key, "Loaded stored preferences");
                record
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Error parsing preferences, using defaults");
                PreferenceRecord::default()
            }
        }
    }

    pub async fn save_preferences(&self, user: &UserId, record: &PreferenceRecord) {
        let key = StorageKey::preferences(user);

        let payload = match record.encode() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to encode preferences");
                return;
            }
        };

        let expires_at = self.clock.now().plus(self.ttl);
        match self.storage.set(&key, &payload, expires_at).await {
            Ok(()) => tracing::debug!(key = %key, "Preferences stored"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to store preferences"),
        }
    }

    /// Full reset: removes the preference entry and the consent entry.
    pub async fn clear_preferences(&self, user: &UserId) {
        for key in [StorageKey::preferences(user), StorageKey::consent(user)] {
            if let Err(e) = self.storage.remove(&key).await {
                tracing::warn!(key = %key, error = %e, "Failed to remove entry");
            }
        }
    }
}
