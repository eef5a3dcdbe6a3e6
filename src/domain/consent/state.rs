//! ConsentState enum: the per-user decision about persisting preferences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state consent flag.
///
/// `Unset` means no decision has been recorded (or the entry expired). It is
/// never produced by a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
    #[default]
    Unset,
    Granted,
    Denied,
}

impl ConsentState {
    /// Maps an explicit user decision.
    pub fn from_decision(granted: bool) -> Self {
        if granted {
            ConsentState::Granted
        } else {
            ConsentState::Denied
        }
    }

    /// Parses a stored value. Returns `None` for anything but `"true"`/`"false"`.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "true" => Some(ConsentState::Granted),
            "false" => Some(ConsentState::Denied),
            _ => None,
        }
    }

    /// Value written to storage for a decision.
    pub fn stored_value(granted: bool) -> &'static str {
        if granted {
            "true"
        } else {
            "false"
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, ConsentState::Granted)
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, ConsentState::Unset)
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsentState::Unset => "Unset",
            ConsentState::Granted => "Granted",
            ConsentState::Denied => "Denied",
        };
        write!(f, "{}", s)
    }
}
