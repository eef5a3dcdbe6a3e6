//! GateStatus: the consent gate's state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::consent::ConsentState;
use crate::domain::foundation::StateMachine;

/// A recorded consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Granted,
    Denied,
}

/// Where the gate stands for the signed-in user.
///
/// - `AwaitingDecision`: the blocking consent prompt is shown.
/// - `Active(Granted)`: preferences load from and save to storage.
/// - `Active(Denied)`: defaults only; an inline notice offers the prompt again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    AwaitingDecision,
    Active(Decision),
}

impl GateStatus {
    /// Initial status for a stored consent value.
    pub fn for_consent(consent: ConsentState) -> Self {
        match consent {
            ConsentState::Unset => GateStatus::AwaitingDecision,
            ConsentState::Granted => GateStatus::Active(Decision::Granted),
            ConsentState::Denied => GateStatus::Active(Decision::Denied),
        }
    }

    /// Accept and Decline are only offered by the prompt or the denied notice.
    pub fn accepts_decision(&self) -> bool {
        matches!(
            self,
            GateStatus::AwaitingDecision | GateStatus::Active(Decision::Denied)
        )
    }

    pub fn allows_save(&self) -> bool {
        matches!(self, GateStatus::Active(Decision::Granted))
    }

    pub fn shows_prompt(&self) -> bool {
        matches!(self, GateStatus::AwaitingDecision)
    }

    pub fn shows_disabled_notice(&self) -> bool {
        matches!(self, GateStatus::Active(Decision::Denied))
    }
}

impl StateMachine for GateStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Decision::*;
        use GateStatus::*;
        matches!(
            (self, target),
            (AwaitingDecision, Active(_))
                | (Active(Denied), Active(Granted))
                | (Active(_), AwaitingDecision)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Decision::*;
        use GateStatus::*;
        match self {
            AwaitingDecision => vec![Active(Granted), Active(Denied)],
            Active(Denied) => vec![Active(Granted), AwaitingDecision],
            Active(Granted) => vec![AwaitingDecision],
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateStatus::AwaitingDecision => write!(f, "AwaitingDecision"),
            GateStatus::Active(Decision::Granted) => write!(f, "Active(Granted)"),
            GateStatus::Active(Decision::Denied) => write!(f, "Active(Denied)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GateStatus; 3] = [
        GateStatus::AwaitingDecision,
        GateStatus::Active(Decision::Granted),
        GateStatus::Active(Decision::Denied),
    ];

    #[test]
    fn initial_status_follows_stored_consent() {
        assert_eq!(
            GateStatus::for_consent(ConsentState::Unset),
            GateStatus::AwaitingDecision
        );
        assert_eq!(
            GateStatus::for_consent(ConsentState::Granted),
            GateStatus::Active(Decision::Granted)
        );
        assert_eq!(
            GateStatus::for_consent(ConsentState::Denied),
            GateStatus::Active(Decision::Denied)
        );
    }

    #[test]
    fn awaiting_decision_moves_to_either_decision() {
        let status = GateStatus::AwaitingDecision;
        assert!(status.transition_to(GateStatus::Active(Decision::Granted)).is_ok());
        assert!(status.transition_to(GateStatus::Active(Decision::Denied)).is_ok());
    }

    #[test]
    fn granted_cannot_be_replaced_by_a_decision() {
        let status = GateStatus::Active(Decision::Granted);
        assert!(status.transition_to(GateStatus::Active(Decision::Denied)).is_err());
        assert!(!status.accepts_decision());
    }

    #[test]
    fn denied_can_reopen_the_prompt_or_be_granted() {
        let status = GateStatus::Active(Decision::Denied);
        assert!(status.transition_to(GateStatus::AwaitingDecision).is_ok());
        assert!(status.transition_to(GateStatus::Active(Decision::Granted)).is_ok());
        assert!(status.accepts_decision());
    }

    #[test]
    fn only_granted_allows_save() {
        for status in ALL {
            assert_eq!(
                status.allows_save(),
                status == GateStatus::Active(Decision::Granted)
            );
        }
    }

    #[test]
    fn prompt_and_notice_are_mutually_exclusive() {
        for status in ALL {
            assert!(!(status.shows_prompt() && status.shows_disabled_notice()));
        }
    }

    #[test]
    fn no_status_is_terminal() {
        for status in ALL {
            assert!(!status.is_terminal(), "{status} should have an exit");
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in ALL {
            for target in ALL {
                assert_eq!(
                    status.can_transition_to(&target),
                    status.valid_transitions().contains(&target),
                    "{status} -> {target}"
                );
            }
        }
    }
}
