/// The kind of an error note (determines how the note is rendered).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphQLErrorNoteKind {
    /// Context about the error. Rendered as `= note: ...`.
    General,

    /// Actionable suggestion for fixing the error. Rendered as `= help: ...`.
    Help,

    /// Reference to the GraphQL specification. Rendered as `= spec: ...`.
    Spec,
}
