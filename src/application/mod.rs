//! Application layer - orchestrates the domain over the ports.
//!
//! - `stores` - per-user consent and preference persistence
//! - `consent_gate` - the only path by which preferences reach storage
//! - `dashboard` - the context object bound to one signed-in user

mod consent_gate;
pub mod dashboard;
pub mod stores;

pub use consent_gate::ConsentGate;
pub use dashboard::{DashboardSession, DashboardView};
pub use stores::{
    ConsentStore, PreferenceStore, DEFAULT_CONSENT_TTL_DAYS, DEFAULT_PREFERENCES_TTL_DAYS,
};
