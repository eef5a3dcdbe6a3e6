//! Storage Adapters
//!
//! Implementations of the EntryStorage port.
//!
//! ## Available Adapters
//!
//! - **FileEntryStorage** - Stores entries in a YAML file on disk
//! - **InMemoryEntryStorage** - Stores entries in memory (testing/ephemeral)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileEntryStorage, InMemoryEntryStorage};
//!
//! // Persistent: survives restarts
//! let storage = FileEntryStorage::new("./data/dashboard-entries.yaml");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryEntryStorage::new();
//! ```

mod file_entry_storage;
mod in_memory_entry_storage;

pub use file_entry_storage::FileEntryStorage;
pub use in_memory_entry_storage::InMemoryEntryStorage;
