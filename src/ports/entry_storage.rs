//! Entry Storage Port - Interface for client-side key-value storage.
//!
//! Models the browser cookie jar the dashboard persists into: small string
//! values, each with its own expiry, namespaced per user. Adapters exist for
//! in-memory and file-backed storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

/// Errors that can occur during entry storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize entries: {0}")]
    SerializationFailed(String),

    #[error("Stored entries are corrupt: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Kind of entry, i.e. the base key of the legacy flat cookie name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// `cookies_accepted`
    Consent,
    /// `user_preferences`
    Preferences,
}

impl EntryKind {
    pub fn base_key(&self) -> &'static str {
        match self {
            EntryKind::Consent => "cookies_accepted",
            EntryKind::Preferences => "user_preferences",
        }
    }
}

/// Key of a stored entry: the pair `(kind, user)`.
///
/// Adapters key on the pair itself, so a user id containing `_` can never
/// collide with another user's entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StorageKey {
    pub kind: EntryKind,
    pub user: UserId,
}

impl StorageKey {
    pub fn new(kind: EntryKind, user: &UserId) -> Self {
        Self {
            kind,
            user: user.clone(),
        }
    }

    pub fn consent(user: &UserId) -> Self {
        Self::new(EntryKind::Consent, user)
    }

    pub fn preferences(user: &UserId) -> Self {
        Self::new(EntryKind::Preferences, user)
    }
}

impl fmt::Display for StorageKey {
    /// Legacy flat name, for log lines only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.base_key(), self.user)
    }
}

/// A stored value and the moment it stops being readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    pub expires_at: Timestamp,
}

impl StoredEntry {
    pub fn new(value: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// An entry is live strictly before its expiry.
    pub fn is_live_at(&self, now: &Timestamp) -> bool {
        now.is_before(&self.expires_at)
    }
}

/// Port for reading and writing expiring entries
#[async_trait]
pub trait EntryStorage: Send + Sync {
    /// Read a live entry
    ///
    /// # Returns
    /// `None` if the entry is absent or expired at `now`. Expired entries
    /// are purged.
    async fn get(&self, key: &StorageKey, now: Timestamp)
        -> Result<Option<String>, StorageError>;

    /// Write an entry, replacing any prior value for the key
    async fn set(
        &self,
        key: &StorageKey,
        value: &str,
        expires_at: Timestamp,
    ) -> Result<(), StorageError>;

    /// Remove an entry. Removing an absent key succeeds.
    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError>;
}
