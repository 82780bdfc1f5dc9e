use std::fmt;

/// The machine-readable kind of a [`GraphQLError`](crate::execution::GraphQLError),
/// exposed to clients as `extensions.code`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    BadUserInput,
    Cancelled,
    EngineInconsistency,
    GraphQLParseFailed,
    GraphQLValidationFailed,
    NonNullViolation,
    OperationNotFound,
    ResolverError,
}
impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadUserInput => "BAD_USER_INPUT",
            Self::Cancelled => "CANCELLED",
            Self::EngineInconsistency => "ENGINE_INCONSISTENCY",
            Self::GraphQLParseFailed => "GRAPHQL_PARSE_FAILED",
            Self::GraphQLValidationFailed => "GRAPHQL_VALIDATION_FAILED",
            Self::NonNullViolation => "NON_NULL_VIOLATION",
            Self::OperationNotFound => "OPERATION_NOT_FOUND",
            Self::ResolverError => "RESOLVER_ERROR",
        }
    }
}
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
