//! Results and errors of gate actions.

use std::fmt;
use thiserror::Error;

use super::GateStatus;

/// User actions the gate responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateAction {
    Accept,
    Decline,
    Save,
    ReopenPrompt,
    Reset,
}

impl fmt::Display for GateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateAction::Accept => "accept",
            GateAction::Decline => "decline",
            GateAction::Save => "save",
            GateAction::ReopenPrompt => "reopen prompt",
            GateAction::Reset => "reset",
        };
        write!(f, "{}", s)
    }
}

/// What a gate action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Current fields were written to storage; show the success signal.
    Saved,
    /// Consent was declined; nothing was written.
    Declined,
    /// Saving is blocked until consent is granted; the prompt is shown.
    ConsentRequired,
    /// The consent prompt was reopened from the denied notice.
    PromptReopened,
    /// Stored consent and preferences were removed.
    Reset,
}

impl GateOutcome {
    /// Whether this outcome raises the "preferences saved" signal.
    pub fn signals_success(&self) -> bool {
        matches!(self, GateOutcome::Saved)
    }
}

/// An action that is not valid in the gate's current status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Cannot {action} while the gate is {status}")]
    InvalidTransition {
        action: GateAction,
        status: GateStatus,
    },
}

impl GateError {
    pub fn invalid(action: GateAction, status: GateStatus) -> Self {
        GateError::InvalidTransition { action, status }
    }
}
