//! Authentication adapters.
//!
//! Implementations of the `SessionBoundary` port:
//!
//! - `http` - The authentication service's REST API
//! - `mock` - Test implementation that doesn't require a running service

mod http;
mod mock;

pub use http::{HttpSessionBoundary, HttpSessionConfig};
pub use mock::MockSessionBoundary;
