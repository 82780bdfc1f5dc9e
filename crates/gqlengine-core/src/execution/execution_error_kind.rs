use crate::execution::ErrorCode;

/// Why a single field produced no value during execution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ExecutionErrorKind {
    /// The context was cancelled before the field's resolver was dispatched.
    Cancelled,

    /// The resolved value contradicts the schema in a way validation cannot
    /// catch: an abstract-typed value without a usable type tag.
    EngineInconsistency,

    /// A leaf value could not be serialized as its declared scalar or enum.
    InvalidLeafValue,

    NonNullViolation,

    /// The resolver failed, or returned a value of the wrong shape.
    Resolver,
}
impl ExecutionErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Cancelled => ErrorCode::Cancelled,
            Self::EngineInconsistency => ErrorCode::EngineInconsistency,
            Self::InvalidLeafValue | Self::Resolver => ErrorCode::ResolverError,
            Self::NonNullViolation => ErrorCode::NonNullViolation,
        }
    }
}
