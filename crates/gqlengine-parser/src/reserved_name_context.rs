/// Contexts where certain names are reserved.
///
/// Used by [`GraphQLParseErrorKind::ReservedName`](crate::GraphQLParseErrorKind::ReservedName)
/// to say which context rejected the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedNameContext {
    /// Fragment names cannot be `on`, which introduces the type condition.
    ///
    /// Invalid: `fragment on on User { ... }`
    FragmentName,

    /// Enum values cannot be `true`, `false`, or `null`.
    ///
    /// Invalid: `enum Maybe { null some }`
    EnumValue,
}
