//! ConsentStore - per-user consent flag with a long-lived expiry.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::consent::ConsentState;
use crate::domain::foundation::UserId;
use crate::ports::{Clock, EntryStorage, StorageKey};

/// Default lifetime of a consent entry.
pub const DEFAULT_CONSENT_TTL_DAYS: i64 = 365;

/// Reads and writes the consent decision for a user.
///
/// Never surfaces storage failures. A read that fails, finds nothing, or
/// finds an unrecognised value reports `Unset`, so the user is prompted
/// again rather than silently treated as having consented.
#[derive(Clone)]
pub struct ConsentStore {
    storage: Arc<dyn EntryStorage>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl ConsentStore {
    pub fn new(storage: Arc<dyn EntryStorage>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            storage,
            clock,
            ttl,
        }
    }

    pub async fn get_consent(&self, user: &UserId) -> ConsentState {
        let key = StorageKey::consent(user);

        match self.storage.get(&key, self.clock.now()).await {
            Ok(Some(value)) => ConsentState::from_stored(&value).unwrap_or_else(|| {
                tracing::warn!(key = %key, value = %value, "Unrecognised consent value, treating as unset");
                ConsentState::Unset
            }),
            Ok(None) => ConsentState::Unset,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read consent, treating as unset");
                ConsentState::Unset
            }
        }
    }

    /// Records a decision, replacing any earlier one.
    ///
    /// Returns whether the entry was written.
    pub async fn set_consent(&self, user: &UserId, granted: bool) -> bool {
        let key = StorageKey::consent(user);
        let expires_at = self.clock.now().plus(self.ttl);

        match self
            .storage
            .set(&key, ConsentState::stored_value(granted), expires_at)
            .await
        {
            Ok(()) => {
                tracing::debug!(key = %key, granted, "Consent stored");
                true
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to store consent");
                false
            }
        }
    }

    pub async fn clear_consent(&self, user: &UserId) {
        let key = StorageKey::consent(user);
        if let Err(e) = self.storage.remove(&key).await {
            tracing::warn!(key = %key, error = %e, "Failed to clear consent");
        }
    }
}
