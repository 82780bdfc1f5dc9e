use crate::GraphQLErrorNotes;
use crate::GraphQLStringParsingError;
use crate::token::cook_string_value;
use std::borrow::Cow;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// The kind of a GraphQL token.
///
/// Literal kinds (`Name`, `IntValue`, `FloatValue`, `StringValue`) carry the
/// raw source text they were lexed from, borrowed from the input where
/// possible.
///
/// Negative numbers like `-123` are lexed as a single `IntValue("-123")`
/// token, matching the GraphQL grammar for `IntValue`/`FloatValue`.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLTokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals (raw source text)
    // =========================================================================
    /// A name. Keyword-like names (`query`, `fragment`, `on`, ...) are plain
    /// names; the parser decides what they mean from context.
    Name(Cow<'src, str>),

    /// Raw text of an integer literal, e.g. `"-123"`.
    IntValue(Cow<'src, str>),

    /// Raw text of a float literal, e.g. `"-1.23e-4"`.
    FloatValue(Cow<'src, str>),

    /// Raw text of a string literal including its quotes, e.g.
    /// `"\"hello\\nworld\""` or `"\"\"\"block\"\"\""`.
    ///
    /// Use [`GraphQLTokenKind::parse_string_value()`] for the cooked content.
    StringValue(Cow<'src, str>),

    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    /// End of input.
    Eof,

    /// A lexer error. Emitted in place of a token so the parser can report it
    /// with its location and keep going.
    Error {
        message: String,
        error_notes: GraphQLErrorNotes,
    },
}

impl<'src> GraphQLTokenKind<'src> {
    #[inline]
    pub fn name_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::Name(Cow::Borrowed(s))
    }

    #[inline]
    pub fn name_owned(s: String) -> Self {
        GraphQLTokenKind::Name(Cow::Owned(s))
    }

    #[inline]
    pub fn error(message: impl Into<String>, error_notes: GraphQLErrorNotes) -> Self {
        GraphQLTokenKind::Error {
            message: message.into(),
            error_notes,
        }
    }

    /// Returns the punctuator text if this token is a punctuator.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            GraphQLTokenKind::Ampersand => Some("&"),
            GraphQLTokenKind::At => Some("@"),
            GraphQLTokenKind::Bang => Some("!"),
            GraphQLTokenKind::Colon => Some(":"),
            GraphQLTokenKind::CurlyBraceClose => Some("}"),
            GraphQLTokenKind::CurlyBraceOpen => Some("{"),
            GraphQLTokenKind::Dollar => Some("$"),
            GraphQLTokenKind::Ellipsis => Some("..."),
            GraphQLTokenKind::Equals => Some("="),
            GraphQLTokenKind::ParenClose => Some(")"),
            GraphQLTokenKind::ParenOpen => Some("("),
            GraphQLTokenKind::Pipe => Some("|"),
            GraphQLTokenKind::SquareBracketClose => Some("]"),
            GraphQLTokenKind::SquareBracketOpen => Some("["),

            GraphQLTokenKind::Name(_)
            | GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Eof
            | GraphQLTokenKind::Error { .. } => None,
        }
    }

    pub fn is_punctuator(&self) -> bool {
        self.as_punctuator_str().is_some()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GraphQLTokenKind::Error { .. })
    }

    /// The literal source text of this token, as written.
    ///
    /// Returns `None` for `Eof` and `Error` tokens.
    pub fn literal_text(&self) -> Option<&str> {
        match self {
            GraphQLTokenKind::Name(raw)
            | GraphQLTokenKind::IntValue(raw)
            | GraphQLTokenKind::FloatValue(raw)
            | GraphQLTokenKind::StringValue(raw) => Some(raw.as_ref()),
            GraphQLTokenKind::True => Some("true"),
            GraphQLTokenKind::False => Some("false"),
            GraphQLTokenKind::Null => Some("null"),
            GraphQLTokenKind::Eof | GraphQLTokenKind::Error { .. } => None,
            punct => punct.as_punctuator_str(),
        }
    }

    /// Parses an `IntValue`'s raw text. Returns `None` for other kinds.
    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            GraphQLTokenKind::IntValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parses a `FloatValue`'s raw text. Returns `None` for other kinds.
    pub fn parse_float_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            GraphQLTokenKind::FloatValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Cooks a `StringValue`'s raw text into its content: escape sequences
    /// are processed for `"..."` strings, and indentation is stripped for
    /// `"""..."""` block strings.
    pub fn parse_string_value(&self) -> Option<Result<String, GraphQLStringParsingError>> {
        match self {
            GraphQLTokenKind::StringValue(raw) => Some(cook_string_value(raw)),
            _ => None,
        }
    }
}
