//! Per-user stores over the `EntryStorage` port.

mod consent_store;
mod preference_store;

pub use consent_store::{ConsentStore, DEFAULT_CONSENT_TTL_DAYS};
pub use preference_store::{PreferenceStore, DEFAULT_PREFERENCES_TTL_DAYS};
