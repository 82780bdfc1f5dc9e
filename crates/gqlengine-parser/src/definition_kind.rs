/// The kind of a top-level definition found in a GraphQL document.
///
/// Used when reporting definitions that are not allowed in the kind of
/// document being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    /// `schema { ... }` or `extend schema { ... }`
    Schema,

    /// `type`, `interface`, `union`, `enum`, `scalar`, `input`, or their
    /// `extend` forms.
    TypeDefinition,

    /// `directive @name on ...`
    DirectiveDefinition,

    /// `query`, `mutation`, `subscription`, or an anonymous `{ ... }`.
    Operation,

    /// `fragment Name on Type { ... }`
    Fragment,
}

impl DefinitionKind {
    pub fn description(&self) -> &'static str {
        match self {
            DefinitionKind::Schema => "schema definition",
            DefinitionKind::TypeDefinition => "type definition",
            DefinitionKind::DirectiveDefinition => "directive definition",
            DefinitionKind::Operation => "operation",
            DefinitionKind::Fragment => "fragment definition",
        }
    }
}

/// The kind of document being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Only type-system definitions (`schema`, `type`, `directive`, ...).
    Schema,

    /// Only operations and fragments.
    Executable,
}

impl DocumentKind {
    pub fn description(&self) -> &'static str {
        match self {
            DocumentKind::Schema => "schema document",
            DocumentKind::Executable => "executable document",
        }
    }
}
