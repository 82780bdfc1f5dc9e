use crate::execution::ExecutionPhase;

#[test]
fn legal_transitions() {
    use ExecutionPhase::*;

    assert!(Idle.can_transition_to(Validating));
    assert!(Validating.can_transition_to(Rejected));
    assert!(Validating.can_transition_to(Executing));
    assert!(Executing.can_transition_to(Completed));
    assert!(Rejected.can_transition_to(Completed));
}

#[test]
fn illegal_transitions() {
    use ExecutionPhase::*;

    assert!(!Idle.can_transition_to(Executing));
    assert!(!Rejected.can_transition_to(Executing));
    assert!(!Completed.can_transition_to(Validating));
    assert!(!Executing.can_transition_to(Rejected));
}

#[test]
fn phases_display_lowercase() {
    assert_eq!(ExecutionPhase::Validating.to_string(), "validating");
    assert_eq!(ExecutionPhase::Completed.to_string(), "completed");
}
