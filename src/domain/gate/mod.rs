//! Consent gate: decides whether preferences are loaded, saved, or held
//! back until the user makes a consent decision.

mod outcome;
mod status;

pub use outcome::{GateAction, GateError, GateOutcome};
pub use status::{Decision, GateStatus};
