//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Authentication service (HTTP, mock)
//! - `clock` - Controllable time source
//! - `storage` - Entry storage (YAML file, in-memory)

pub mod auth;
pub mod clock;
pub mod storage;

pub use auth::{HttpSessionBoundary, HttpSessionConfig, MockSessionBoundary};
pub use clock::ManualClock;
pub use storage::{FileEntryStorage, InMemoryEntryStorage};
