//! Triage status flow
//!
//! ```text
//! WAITING -> ASSIGNED -> IN_PROGRESS -> COMPLETED | ADMITTED | TRANSFERRED
//!    \___________\______> LEFT_WITHOUT_BEING_SEEN
//! ```
use crate::error::{EmergencyError, EmergencyResult};
use database_layer::TriageStatus;

pub fn can_transition(from: TriageStatus, to: TriageStatus) -> bool {
    use TriageStatus::*;
    matches!(
        (from, to),
        (Waiting, Assigned)
            | (Waiting, LeftWithoutBeingSeen)
            | (Assigned, InProgress)
            | (Assigned, LeftWithoutBeingSeen)
            | (InProgress, Completed)
            | (InProgress, Admitted)
            | (InProgress, Transferred)
    )
}

pub fn check_transition(from: TriageStatus, to: TriageStatus) -> EmergencyResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(EmergencyError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path() {
        assert!(can_transition(TriageStatus::Waiting, TriageStatus::Assigned));
        assert!(can_transition(TriageStatus::Assigned, TriageStatus::InProgress));
        assert!(can_transition(TriageStatus::InProgress, TriageStatus::Admitted));
    }

    #[test]
    fn test_no_skipping_or_reopening() {
        assert!(!can_transition(TriageStatus::Waiting, TriageStatus::InProgress));
        assert!(!can_transition(TriageStatus::Waiting, TriageStatus::Completed));
        assert!(!can_transition(TriageStatus::InProgress, TriageStatus::LeftWithoutBeingSeen));
        assert!(!can_transition(TriageStatus::Assigned, TriageStatus::Waiting));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for from in TriageStatus::ALL.iter().filter(|s| s.is_terminal()) {
            for to in TriageStatus::ALL {
                assert!(
                    check_transition(*from, *to).is_err(),
                    "{from} -> {to} should be rejected"
                );
            }
        }
    }
}
