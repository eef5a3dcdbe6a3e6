//! In-Memory Entry Storage Adapter
//!
//! Keeps entries in a process-local map. Used by tests and by sessions that
//! should not outlive the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{EntryStorage, StorageError, StorageKey, StoredEntry};

/// In-memory storage for expiring entries
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntryStorage {
    entries: Arc<RwLock<HashMap<StorageKey, StoredEntry>>>,
    /// When set, every write fails (exercises best-effort paths)
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryEntryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail, like a full or disabled jar.
    pub fn with_failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Get the number of stored entries, expired ones included
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Raw entry for a key, ignoring expiry
    pub async fn peek(&self, key: &StorageKey) -> Option<StoredEntry> {
        self.entries.read().await.get(key).cloned()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStorage for InMemoryEntryStorage {
    async fn get(
        &self,
        key: &StorageKey,
        now: Timestamp,
    ) -> Result<Option<String>, StorageError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.is_live_at(&now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: purge under the write lock
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_live_at(&now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &StorageKey,
        value: &str,
        expires_at: Timestamp,
    ) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut entries = self.entries.write().await;
        entries.insert(key.clone(), StoredEntry::new(value, expires_at));
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        self.check_writable()?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}
