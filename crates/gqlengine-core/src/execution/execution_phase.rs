use std::fmt;

/// Where a request is in its lifecycle. Transitions are logged at DEBUG.
///
/// `Idle → Validating → (Rejected | Executing) → Completed`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ExecutionPhase {
    Idle,
    Validating,
    Rejected,
    Executing,
    Completed,
}
impl ExecutionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Rejected => "rejected",
            Self::Executing => "executing",
            Self::Completed => "completed",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: ExecutionPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Rejected | Self::Executing)
                | (Self::Rejected | Self::Executing, Self::Completed),
        )
    }
}
impl fmt::Display for ExecutionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
