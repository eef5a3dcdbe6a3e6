//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EntryStorage` - Client-side key-value storage with per-entry expiry
//! - `SessionBoundary` - The external authentication service
//! - `Clock` - Current time for expiry checks

mod clock;
mod entry_storage;
mod session_boundary;

pub use clock::{Clock, SystemClock};
pub use entry_storage::{EntryKind, EntryStorage, StorageError, StorageKey, StoredEntry};
pub use session_boundary::{Registration, SessionBoundary};
