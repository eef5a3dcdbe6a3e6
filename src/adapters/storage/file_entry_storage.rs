//! File-based Entry Storage Adapter
//!
//! Stores every entry in a single YAML document on disk, so preferences and
//! consent survive restarts the way a browser cookie jar does.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{EntryKind, EntryStorage, StorageError, StorageKey, StoredEntry};

/// One persisted entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JarEntry {
    kind: EntryKind,
    user: UserId,
    value: String,
    expires_at: Timestamp,
}

/// On-disk document
#[derive(Debug, Default, Serialize, Deserialize)]
struct JarFile {
    #[serde(default)]
    entries: Vec<JarEntry>,
}

type Jar = BTreeMap<StorageKey, StoredEntry>;

/// File-backed storage for expiring entries
#[derive(Debug, Clone)]
pub struct FileEntryStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file
    lock: Arc<Mutex<()>>,
}

impl FileEntryStorage {
    /// Create a file storage backed by `path`
    ///
    /// The file and its parent directory are created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileEntryStorage::new("./data/dashboard-entries.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Jar, StorageError> {
        if !self.path.exists() {
            return Ok(Jar::new());
        }

        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        if yaml.trim().is_empty() {
            return Ok(Jar::new());
        }

        let file: JarFile =
            serde_yaml::from_str(&yaml).map_err(|e| StorageError::Corrupt(e.to_string()))?;

        Ok(file
            .entries
            .into_iter()
            .map(|entry| {
                (
                    StorageKey::new(entry.kind, &entry.user),
                    StoredEntry::new(entry.value, entry.expires_at),
                )
            })
            .collect())
    }

    async fn store(&self, jar: &Jar) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        let file = JarFile {
            entries: jar
                .iter()
                .map(|(key, entry)| JarEntry {
                    kind: key.kind,
                    user: key.user.clone(),
                    value: entry.value.clone(),
                    expires_at: entry.expires_at,
                })
                .collect(),
        };

        let yaml = serde_yaml::to_string(&file)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        // Write then rename so a crash never leaves a half-written jar
        let tmp = self.path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl EntryStorage for FileEntryStorage {
    async fn get(
        &self,
        key: &StorageKey,
        now: Timestamp,
    ) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut jar = self.load().await?;

        match jar.get(key) {
            None => Ok(None),
            Some(entry) if entry.is_live_at(&now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                jar.remove(key);
                self.store(&jar).await?;
                Ok(None)
            }
        }
    }

    async fn set(
        &self,
        key: &StorageKey,
        value: &str,
        expires_at: Timestamp,
    ) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut jar = self.load().await?;
        jar.insert(key.clone(), StoredEntry::new(value, expires_at));
        self.store(&jar).await
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut jar = self.load().await?;
        if jar.remove(key).is_some() {
            self.store(&jar).await?;
        }
        Ok(())
    }
}
