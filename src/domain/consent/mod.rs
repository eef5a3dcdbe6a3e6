//! Consent to persist preferences in client-side storage.

mod state;

pub use state::ConsentState;
