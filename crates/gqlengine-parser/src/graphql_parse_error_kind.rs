use crate::DefinitionKind;
use crate::DocumentKind;
use crate::GraphQLStringParsingError;
use crate::ReservedNameContext;

/// Categorizes parse errors for programmatic handling.
///
/// Variants carry only what a caller needs to branch on. The human-readable
/// explanation lives in [`GraphQLParseError::message()`](crate::GraphQLParseError::message)
/// and its notes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphQLParseErrorKind {
    /// Expected specific token(s) but found something else.
    ///
    /// ```text
    /// query { user(id 1) }
    ///                 ^ expected `:`, found `1`
    /// ```
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended before a complete construct was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof {
        expected: Vec<String>,
    },

    /// The lexer produced an error token. Its message and notes are kept on
    /// the parent error.
    #[error("lexer error")]
    LexerError,

    /// A delimiter was opened but the input ended before it was closed.
    ///
    /// The opening location is included in the error's notes.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter {
        delimiter: String,
    },

    /// A closing delimiter does not match the most recently opened one.
    ///
    /// ```text
    /// query { f(a: [1) }
    ///                ^ expected `]`, found `)`
    /// ```
    #[error("mismatched delimiter")]
    MismatchedDelimiter {
        expected: String,
        found: String,
    },

    /// A literal could not be converted to its value.
    ///
    /// ```text
    /// query { f(limit: 99999999999) }
    ///                  ^^^^^^^^^^^ does not fit a 32-bit integer
    /// ```
    #[error("invalid value")]
    InvalidValue(ValueParsingError),

    /// A name was used where it is reserved.
    #[error("reserved name: `{name}`")]
    ReservedName {
        name: String,
        context: ReservedNameContext,
    },

    /// A definition that is not allowed in the kind of document being
    /// parsed, e.g. `type User { ... }` in a request.
    #[error("wrong document kind")]
    WrongDocumentKind {
        found: DefinitionKind,
        document_kind: DocumentKind,
    },

    /// A construct that must not be empty, e.g. `{ }` or `()`.
    #[error("invalid empty construct: `{construct}`")]
    InvalidEmptyConstruct {
        construct: String,
    },

    /// Syntax errors without a dedicated variant.
    #[error("invalid syntax")]
    InvalidSyntax,
}

/// A literal that lexed correctly but has no valid value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueParsingError {
    /// Bad escape sequence and similar.
    #[error("Invalid GraphQL string: {0}")]
    String(#[from] GraphQLStringParsingError),

    /// GraphQL integers must fit in a signed 32-bit integer.
    #[error("Invalid GraphQL integer: {0}")]
    Int(String),

    /// GraphQL floats must be finite.
    #[error("Invalid GraphQL float: {0}")]
    Float(String),
}
