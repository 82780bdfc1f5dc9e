//! Recursive descent parser for GraphQL documents.
//!
//! [`GraphQLParser`] works over any [`GraphQLTokenSource`] and parses either
//! executable documents (operations and fragments) or type-system documents
//! (SDL).
//!
//! # Architecture
//!
//! Each grammar rule has a `parse_*` method returning `Result<AstNode, ()>`.
//! `Err(())` means an error has already been recorded and the caller should
//! recover. A delimiter stack remembers where each open `{`, `[` and `(`
//! started so unclosed and mismatched delimiters can point back at their
//! opener.
//!
//! # Error Recovery
//!
//! On error the parser records a [`GraphQLParseError`], returns `Err(())`,
//! and the document loop skips ahead to the next token that looks like the
//! start of a definition. Inside selection sets it skips ahead to the next
//! selection instead. This reports several errors in one pass.

use crate::DefinitionKind;
use crate::DocumentKind;
use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::GraphQLTokenStream;
use crate::ParseResult;
use crate::ReservedNameContext;
use crate::SourcePosition;
use crate::ValueParsingError;
use crate::ast;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;
use crate::token_source::StrGraphQLTokenSource;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::path::Path;

// =============================================================================
// Delimiter tracking for error recovery
// =============================================================================

/// Context in which a delimiter was opened, for error messages.
#[derive(Debug, Clone, Copy)]
enum DelimiterContext {
    SchemaDefinition,
    ObjectTypeDefinition,
    InterfaceDefinition,
    EnumDefinition,
    InputObjectDefinition,
    SelectionSet,
    FieldArguments,
    DirectiveArguments,
    VariableDefinitions,
    ListType,
    ListValue,
    ObjectValue,
    ArgumentDefinitions,
}

impl DelimiterContext {
    fn description(&self) -> &'static str {
        match self {
            DelimiterContext::SchemaDefinition => "schema definition",
            DelimiterContext::ObjectTypeDefinition => "object type definition",
            DelimiterContext::InterfaceDefinition => "interface definition",
            DelimiterContext::EnumDefinition => "enum definition",
            DelimiterContext::InputObjectDefinition => "input object definition",
            DelimiterContext::SelectionSet => "selection set",
            DelimiterContext::FieldArguments => "field arguments",
            DelimiterContext::DirectiveArguments => "directive arguments",
            DelimiterContext::VariableDefinitions => "variable definitions",
            DelimiterContext::ListType => "list type annotation",
            DelimiterContext::ListValue => "list value",
            DelimiterContext::ObjectValue => "object value",
            DelimiterContext::ArgumentDefinitions => "argument definitions",
        }
    }
}

#[derive(Debug, Clone)]
struct OpenDelimiter {
    span: GraphQLSourceSpan,
    context: DelimiterContext,
}

/// Recovery decision extracted from a peeked token, so the peek borrow ends
/// before the parser mutates itself.
enum RecoveryAction {
    Stop,
    Skip,
    CheckKeyword(String),
    CheckDescription,
}

/// Whether variables are allowed in the value being parsed.
#[derive(Clone, Copy, Debug)]
enum ConstContext {
    AllowVariables,
    VariableDefaultValue,
    DirectiveArgument,
    InputDefaultValue,
}

impl ConstContext {
    fn allows_variables(&self) -> bool {
        matches!(self, ConstContext::AllowVariables)
    }

    fn description(&self) -> &'static str {
        match self {
            ConstContext::AllowVariables => "operation arguments",
            ConstContext::VariableDefaultValue => "variable default values",
            ConstContext::DirectiveArgument => "type-system directive arguments",
            ConstContext::InputDefaultValue => "input field default values",
        }
    }
}

const TYPE_SYSTEM_KEYWORDS: [&str; 9] = [
    "type",
    "interface",
    "union",
    "enum",
    "scalar",
    "input",
    "directive",
    "schema",
    "extend",
];

// =============================================================================
// Main parser struct
// =============================================================================

/// A recursive descent parser for GraphQL documents.
///
/// ```
/// use gqlengine_parser::GraphQLParser;
/// use gqlengine_parser::ast;
///
/// let result = GraphQLParser::new("query Q { user(id: 1) { name } }")
///     .parse_executable_document();
/// let doc = result.valid_ast().expect("valid document");
/// let op = doc.operations().next().expect("one operation");
/// assert_eq!(op.kind, ast::OperationKind::Query);
/// assert_eq!(op.name.as_deref(), Some("Q"));
/// ```
pub struct GraphQLParser<'src, TTokenSource: GraphQLTokenSource<'src>> {
    token_stream: GraphQLTokenStream<'src, TTokenSource>,

    errors: Vec<GraphQLParseError>,

    /// Most documents nest fewer than 8 delimiters deep.
    delimiter_stack: SmallVec<[OpenDelimiter; 8]>,

    /// Nesting depth of selection sets and type annotations.
    recursion_depth: usize,

    /// End of the most recently consumed token; anchors EOF errors.
    last_end_position: Option<SourcePosition>,
}

impl<'src> GraphQLParser<'src, StrGraphQLTokenSource<'src>> {
    pub fn new<S: AsRef<str> + ?Sized>(source: &'src S) -> Self {
        Self::from_token_source(StrGraphQLTokenSource::new(source.as_ref()))
    }

    /// Creates a parser whose error spans name `path`.
    pub fn with_file_path<S: AsRef<str> + ?Sized>(source: &'src S, path: &'src Path) -> Self {
        Self::from_token_source(StrGraphQLTokenSource::with_file_path(source.as_ref(), path))
    }
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>> GraphQLParser<'src, TTokenSource> {
    /// Maximum nesting of selection sets and type annotations.
    ///
    /// Value literals are not limited.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: GraphQLTokenStream::new(token_source),
            errors: Vec::new(),
            delimiter_stack: SmallVec::new(),
            recursion_depth: 0,
            last_end_position: None,
        }
    }

    // =========================================================================
    // Document parsing (public API)
    // =========================================================================

    /// Parses an executable document (operations and fragments only).
    pub fn parse_executable_document(mut self) -> ParseResult<ast::Document> {
        let mut definitions = Vec::new();

        while !self.token_stream.is_at_end() {
            match self.parse_executable_definition_item() {
                Ok(def) => definitions.push(def),
                Err(()) => self.recover_to_next_definition(),
            }
        }

        if definitions.is_empty() && self.errors.is_empty() {
            let span = self.peek_span();
            self.record_error(GraphQLParseError::new(
                "document must contain at least one operation or fragment",
                span,
                GraphQLParseErrorKind::UnexpectedEof {
                    expected: vec!["query".to_string(), "{".to_string()],
                },
            ));
        }

        self.finish(ast::Document { definitions })
    }

    /// Parses a type-system document (SDL).
    pub fn parse_schema_document(mut self) -> ParseResult<ast::SchemaDocument> {
        let mut definitions = Vec::new();

        while !self.token_stream.is_at_end() {
            match self.parse_schema_definition_item() {
                Ok(def) => definitions.push(def),
                Err(()) => self.recover_to_next_definition(),
            }
        }

        self.finish(ast::SchemaDocument { definitions })
    }

    fn finish<TAst>(self, ast: TAst) -> ParseResult<TAst> {
        if self.errors.is_empty() {
            ParseResult::ok(ast)
        } else {
            ParseResult::recovered(ast, self.errors)
        }
    }

    fn parse_executable_definition_item(&mut self) -> Result<ast::Definition, ()> {
        if self.peek_is_lexer_error() {
            self.consume_lexer_error();
            return Err(());
        }

        if self.peek_is_keyword("query")
            || self.peek_is_keyword("mutation")
            || self.peek_is_keyword("subscription")
            || self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
        {
            return Ok(ast::Definition::Operation(self.parse_operation_definition()?));
        }
        if self.peek_is_keyword("fragment") {
            return Ok(ast::Definition::Fragment(self.parse_fragment_definition()?));
        }

        let type_system_kind = if self.peek_is_keyword("directive") {
            Some(DefinitionKind::DirectiveDefinition)
        } else if self.peek_is_keyword("schema") || self.peek_is_keyword("extend") {
            Some(DefinitionKind::Schema)
        } else if TYPE_SYSTEM_KEYWORDS.iter().any(|kw| self.peek_is_keyword(kw))
            || self.peek_is_described_type_system_definition()
        {
            Some(DefinitionKind::TypeDefinition)
        } else {
            None
        };

        if let Some(found) = type_system_kind {
            let span = self.peek_span();
            self.record_error(GraphQLParseError::new(
                format!("{} not allowed in executable document", found.description()),
                span,
                GraphQLParseErrorKind::WrongDocumentKind {
                    found,
                    document_kind: DocumentKind::Executable,
                },
            ));
            // Parse the whole definition so its body is not mistaken for
            // a shorthand query.
            let _ = self.parse_schema_definition_item();
            return Err(());
        }

        let span = self.peek_span();
        let found = self.peek_found();
        // Consume so recovery does not stop on the same token forever.
        self.consume_token();
        self.record_error(GraphQLParseError::new(
            format!("expected operation or fragment definition, found `{found}`"),
            span,
            GraphQLParseErrorKind::UnexpectedToken {
                expected: vec![
                    "query".to_string(),
                    "mutation".to_string(),
                    "subscription".to_string(),
                    "fragment".to_string(),
                    "{".to_string(),
                ],
                found,
            },
        ));
        Err(())
    }

    fn parse_schema_definition_item(&mut self) -> Result<ast::TypeSystemDefinition, ()> {
        if self.peek_is_lexer_error() {
            self.consume_lexer_error();
            return Err(());
        }

        let description = self.parse_description();

        if self.peek_is_keyword("schema") {
            let position = self.expect_keyword("schema")?.start_inclusive.to_ast_pos();
            return Ok(ast::TypeSystemDefinition::Schema(
                self.parse_schema_definition_body(position, false)?,
            ));
        }
        if self.peek_is_keyword("directive") {
            return Ok(ast::TypeSystemDefinition::Directive(
                self.parse_directive_definition(description)?,
            ));
        }
        if self.peek_is_keyword("extend") {
            return self.parse_extension();
        }
        if let Some(def) = self.try_parse_type_definition(description)? {
            return Ok(ast::TypeSystemDefinition::Type(def));
        }

        if self.peek_is_keyword("query")
            || self.peek_is_keyword("mutation")
            || self.peek_is_keyword("subscription")
            || self.peek_is_keyword("fragment")
            || self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
        {
            let span = self.peek_span();
            let found = if self.peek_is_keyword("fragment") {
                DefinitionKind::Fragment
            } else {
                DefinitionKind::Operation
            };
            self.record_error(GraphQLParseError::new(
                format!("{} not allowed in schema document", found.description()),
                span,
                GraphQLParseErrorKind::WrongDocumentKind {
                    found,
                    document_kind: DocumentKind::Schema,
                },
            ));
            let _ = self.parse_executable_definition_item();
            return Err(());
        }

        let span = self.peek_span();
        let found = self.peek_found();
        self.consume_token();
        self.record_error(GraphQLParseError::new(
            format!("expected type-system definition, found `{found}`"),
            span,
            GraphQLParseErrorKind::UnexpectedToken {
                expected: TYPE_SYSTEM_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
                found,
            },
        ));
        Err(())
    }

    // =========================================================================
    // Error recording and recovery
    // =========================================================================

    fn record_error(&mut self, error: GraphQLParseError) {
        self.errors.push(error);
    }

    fn push_delimiter(&mut self, span: GraphQLSourceSpan, context: DelimiterContext) {
        self.delimiter_stack.push(OpenDelimiter { span, context });
    }

    fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Skips tokens until something that looks like the start of a
    /// definition, then clears the delimiter stack.
    fn recover_to_next_definition(&mut self) {
        loop {
            let action = match self.token_stream.peek() {
                None => RecoveryAction::Stop,
                Some(token) => match &token.kind {
                    GraphQLTokenKind::Eof | GraphQLTokenKind::CurlyBraceOpen => RecoveryAction::Stop,
                    GraphQLTokenKind::Name(name) => RecoveryAction::CheckKeyword(name.to_string()),
                    GraphQLTokenKind::StringValue(_) => RecoveryAction::CheckDescription,
                    _ => RecoveryAction::Skip,
                },
            };

            match action {
                RecoveryAction::Stop => break,
                RecoveryAction::Skip => {
                    self.consume_token();
                },
                RecoveryAction::CheckKeyword(keyword) => {
                    if self.looks_like_definition_start(&keyword) {
                        break;
                    }
                    self.consume_token();
                },
                RecoveryAction::CheckDescription => {
                    if self.peek_is_described_type_system_definition() {
                        break;
                    }
                    self.consume_token();
                },
            }
        }
        self.delimiter_stack.clear();
    }

    /// Peeks one token past `keyword` so that e.g. a field named `type` is
    /// not mistaken for a type definition.
    fn looks_like_definition_start(&mut self, keyword: &str) -> bool {
        let next = self.token_stream.peek_nth(1).map(|t| &t.kind);
        let next_is_name = matches!(
            next,
            Some(
                GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
            )
        );

        match keyword {
            "type" | "interface" | "union" | "enum" | "scalar" | "input" => next_is_name,
            "directive" => matches!(next, Some(GraphQLTokenKind::At)),
            "schema" => matches!(
                next,
                Some(GraphQLTokenKind::CurlyBraceOpen | GraphQLTokenKind::At)
            ),
            "extend" => matches!(
                next,
                Some(GraphQLTokenKind::Name(n)) if matches!(
                    n.as_ref(),
                    "type" | "interface" | "union" | "enum" | "scalar" | "input" | "schema"
                )
            ),
            "query" | "mutation" | "subscription" => {
                next_is_name
                    || matches!(
                        next,
                        Some(
                            GraphQLTokenKind::CurlyBraceOpen
                                | GraphQLTokenKind::ParenOpen
                                | GraphQLTokenKind::At
                        ) | None
                    )
            },
            "fragment" => {
                next_is_name && !matches!(next, Some(GraphQLTokenKind::Name(n)) if n == "on")
            },
            _ => false,
        }
    }

    fn peek_is_described_type_system_definition(&mut self) -> bool {
        let first_is_string = self
            .token_stream
            .peek()
            .is_some_and(|t| matches!(t.kind, GraphQLTokenKind::StringValue(_)));
        first_is_string
            && self.token_stream.peek_nth(1).is_some_and(|next| {
                matches!(
                    &next.kind,
                    GraphQLTokenKind::Name(name) if TYPE_SYSTEM_KEYWORDS.contains(&name.as_ref())
                )
            })
    }

    fn peek_is_lexer_error(&mut self) -> bool {
        self.token_stream.peek().is_some_and(|t| t.kind.is_error())
    }

    /// Records the peeked lexer error token as a parse error and consumes it.
    fn consume_lexer_error(&mut self) {
        if let Some(token) = self.consume_token() {
            self.handle_lexer_error(&token);
        }
    }

    fn handle_lexer_error(&mut self, token: &GraphQLToken<'src>) {
        if let GraphQLTokenKind::Error { message, error_notes } = &token.kind {
            self.record_error(GraphQLParseError::from_lexer_error(
                message.clone(),
                token.span.clone(),
                error_notes.clone(),
            ));
        }
    }

    /// Records an "expected X, found Y" error for the next token without
    /// consuming it.
    ///
    /// Lexer error tokens are reported as lexer errors, and `Eof` as
    /// [`GraphQLParseErrorKind::UnexpectedEof`].
    fn record_unexpected(&mut self, expected_description: &str, expected: Vec<String>) {
        let peeked = self
            .token_stream
            .peek()
            .map(|t| (t.span.clone(), t.kind.clone()));

        match peeked {
            None | Some((_, GraphQLTokenKind::Eof)) => {
                let span = self.eof_span();
                self.record_error(GraphQLParseError::new(
                    format!("expected {expected_description}, found end of input"),
                    span,
                    GraphQLParseErrorKind::UnexpectedEof { expected },
                ));
            },
            Some((span, GraphQLTokenKind::Error { message, error_notes })) => {
                self.record_error(GraphQLParseError::from_lexer_error(message, span, error_notes));
            },
            Some((span, kind)) => {
                let found = Self::token_kind_display(&kind);
                self.record_error(GraphQLParseError::new(
                    format!("expected {expected_description}, found `{found}`"),
                    span,
                    GraphQLParseErrorKind::UnexpectedToken { expected, found },
                ));
            },
        }
    }

    fn record_unclosed(&mut self, delimiter: &str) {
        let span = self.eof_span();
        let open_delim = self.pop_delimiter();
        let mut error = GraphQLParseError::new(
            format!("unclosed `{delimiter}`"),
            span,
            GraphQLParseErrorKind::UnclosedDelimiter {
                delimiter: delimiter.to_string(),
            },
        );
        if let Some(delim) = open_delim {
            error.add_note_with_span(
                format!("opening `{delimiter}` in {} here", delim.context.description()),
                delim.span,
            );
        }
        self.record_error(error);
    }

    // =========================================================================
    // Token expectation helpers
    // =========================================================================

    /// Consumes the next token if it has the expected kind.
    fn expect(&mut self, expected_kind: &GraphQLTokenKind<'_>) -> Result<GraphQLToken<'src>, ()> {
        if self.peek_is(expected_kind) {
            return self.consume_token().ok_or(());
        }
        let display = Self::token_kind_display(expected_kind);
        self.record_unexpected(&format!("`{display}`"), vec![display]);
        Err(())
    }

    /// Consumes a closing delimiter, reporting a mismatch if a different
    /// closing delimiter is found instead.
    fn expect_close(&mut self, close: &GraphQLTokenKind<'_>) -> Result<GraphQLToken<'src>, ()> {
        if self.peek_is(close) {
            let token = self.consume_token().ok_or(())?;
            self.pop_delimiter();
            return Ok(token);
        }

        let mismatched = self.token_stream.peek().and_then(|t| match &t.kind {
            GraphQLTokenKind::CurlyBraceClose
            | GraphQLTokenKind::ParenClose
            | GraphQLTokenKind::SquareBracketClose => {
                Some((t.span.clone(), Self::token_kind_display(&t.kind)))
            },
            _ => None,
        });

        let expected = Self::token_kind_display(close);
        match mismatched {
            Some((span, found)) => {
                let mut error = GraphQLParseError::new(
                    format!("expected `{expected}`, found `{found}`"),
                    span,
                    GraphQLParseErrorKind::MismatchedDelimiter {
                        expected: expected.clone(),
                        found,
                    },
                );
                if let Some(delim) = self.delimiter_stack.last() {
                    error.add_note_with_span(
                        format!("{} opened here", delim.context.description()),
                        delim.span.clone(),
                    );
                }
                self.record_error(error);
            },
            None => self.record_unexpected(&format!("`{expected}`"), vec![expected.clone()]),
        }
        Err(())
    }

    /// Expects a name and returns it with its span.
    ///
    /// `true`, `false` and `null` match the Name grammar and are accepted
    /// here even though the lexer gives them their own token kinds.
    fn expect_name(&mut self) -> Result<(String, GraphQLSourceSpan), ()> {
        let is_name = self.token_stream.peek().is_some_and(|t| {
            matches!(
                t.kind,
                GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
            )
        });
        if !is_name {
            self.record_unexpected("name", vec!["name".to_string()]);
            return Err(());
        }

        let token = self.consume_token().ok_or(())?;
        let name = match token.kind {
            GraphQLTokenKind::Name(s) => s.into_owned(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            GraphQLTokenKind::Null => "null".to_string(),
            _ => return Err(()),
        };
        Ok((name, token.span))
    }

    fn expect_name_only(&mut self) -> Result<String, ()> {
        self.expect_name().map(|(name, _)| name)
    }

    /// Expects a structural keyword (a Name token with specific text).
    ///
    /// `true`/`false`/`null` tokens never match.
    fn expect_keyword(&mut self, keyword: &str) -> Result<GraphQLSourceSpan, ()> {
        if self.peek_is_keyword(keyword) {
            return self.consume_token().map(|t| t.span).ok_or(());
        }
        self.record_unexpected(&format!("`{keyword}`"), vec![keyword.to_string()]);
        Err(())
    }

    fn peek_is_keyword(&mut self, keyword: &str) -> bool {
        self.token_stream
            .peek()
            .is_some_and(|t| matches!(&t.kind, GraphQLTokenKind::Name(name) if name == keyword))
    }

    fn peek_is(&mut self, kind: &GraphQLTokenKind<'_>) -> bool {
        self.token_stream
            .peek()
            .is_some_and(|t| Self::token_kinds_match(&t.kind, kind))
    }

    fn peek_is_closing_delimiter(&mut self) -> bool {
        self.token_stream.peek().is_some_and(|t| {
            matches!(
                t.kind,
                GraphQLTokenKind::CurlyBraceClose
                    | GraphQLTokenKind::ParenClose
                    | GraphQLTokenKind::SquareBracketClose
            )
        })
    }

    fn peek_span(&mut self) -> GraphQLSourceSpan {
        self.token_stream
            .peek()
            .map(|t| t.span.clone())
            .unwrap_or_else(|| self.eof_span())
    }

    fn peek_found(&mut self) -> String {
        self.token_stream
            .peek()
            .map(|t| Self::token_kind_display(&t.kind))
            .unwrap_or_else(|| "end of input".to_string())
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn consume_token(&mut self) -> Option<GraphQLToken<'src>> {
        let token = self.token_stream.consume();
        if let Some(t) = &token {
            self.last_end_position = Some(t.span.end_exclusive);
        }
        token
    }

    /// A zero-width span at the end of the last consumed token.
    fn eof_span(&self) -> GraphQLSourceSpan {
        let pos = self
            .last_end_position
            .unwrap_or_else(|| SourcePosition::new(0, 0, 0));
        GraphQLSourceSpan::point(pos)
    }

    fn token_kind_display(kind: &GraphQLTokenKind<'_>) -> String {
        match kind {
            GraphQLTokenKind::Name(s)
            | GraphQLTokenKind::IntValue(s)
            | GraphQLTokenKind::FloatValue(s) => s.to_string(),
            GraphQLTokenKind::StringValue(_) => "string".to_string(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            GraphQLTokenKind::Null => "null".to_string(),
            GraphQLTokenKind::Eof => "end of input".to_string(),
            GraphQLTokenKind::Error { message, .. } => format!("tokenization error: {message}"),
            punct => punct.as_punctuator_str().unwrap_or_default().to_string(),
        }
    }

    /// Compares token kinds by variant, ignoring payloads.
    ///
    /// The match on `actual` is exhaustive so a new token kind has to be
    /// handled here explicitly.
    fn token_kinds_match(actual: &GraphQLTokenKind<'_>, expected: &GraphQLTokenKind<'_>) -> bool {
        match actual {
            GraphQLTokenKind::Name(_) => matches!(expected, GraphQLTokenKind::Name(_)),
            GraphQLTokenKind::IntValue(_) => matches!(expected, GraphQLTokenKind::IntValue(_)),
            GraphQLTokenKind::FloatValue(_) => matches!(expected, GraphQLTokenKind::FloatValue(_)),
            GraphQLTokenKind::StringValue(_) => {
                matches!(expected, GraphQLTokenKind::StringValue(_))
            },
            GraphQLTokenKind::Error { .. } => matches!(expected, GraphQLTokenKind::Error { .. }),
            GraphQLTokenKind::Ampersand
            | GraphQLTokenKind::At
            | GraphQLTokenKind::Bang
            | GraphQLTokenKind::Colon
            | GraphQLTokenKind::CurlyBraceClose
            | GraphQLTokenKind::CurlyBraceOpen
            | GraphQLTokenKind::Dollar
            | GraphQLTokenKind::Ellipsis
            | GraphQLTokenKind::Equals
            | GraphQLTokenKind::ParenClose
            | GraphQLTokenKind::ParenOpen
            | GraphQLTokenKind::Pipe
            | GraphQLTokenKind::SquareBracketClose
            | GraphQLTokenKind::SquareBracketOpen
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Eof => actual == expected,
        }
    }

    /// Increments the nesting depth, failing past
    /// [`MAX_RECURSION_DEPTH`](Self::MAX_RECURSION_DEPTH). Callers must pair
    /// a successful call with `exit_recursion()`.
    fn enter_recursion(&mut self) -> Result<(), ()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            let span = self.peek_span();
            self.consume_token();
            self.record_error(GraphQLParseError::new(
                "maximum nesting depth exceeded",
                span,
                GraphQLParseErrorKind::InvalidSyntax,
            ));
            self.recursion_depth -= 1;
            return Err(());
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // =========================================================================
    // Value parsing
    // =========================================================================

    /// Parses a value literal or variable reference.
    ///
    /// Lists and objects nest without a depth limit.
    fn parse_value(&mut self, context: ConstContext) -> Result<ast::Value, ()> {
        let next_kind = self.token_stream.peek().map(|t| match &t.kind {
            GraphQLTokenKind::Dollar => Some(GraphQLTokenKind::Dollar),
            GraphQLTokenKind::SquareBracketOpen => Some(GraphQLTokenKind::SquareBracketOpen),
            GraphQLTokenKind::CurlyBraceOpen => Some(GraphQLTokenKind::CurlyBraceOpen),
            GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Name(_) => Some(GraphQLTokenKind::Null),
            _ => None,
        });

        match next_kind {
            Some(Some(GraphQLTokenKind::Dollar)) => self.parse_variable_value(context),
            Some(Some(GraphQLTokenKind::SquareBracketOpen)) => self.parse_list_value(context),
            Some(Some(GraphQLTokenKind::CurlyBraceOpen)) => self.parse_object_value(context),
            Some(Some(_)) => {
                let token = self.consume_token().ok_or(())?;
                self.literal_value(token)
            },
            Some(None) | None => {
                self.record_unexpected("value", vec!["value".to_string()]);
                Err(())
            },
        }
    }

    fn parse_variable_value(&mut self, context: ConstContext) -> Result<ast::Value, ()> {
        let dollar = self.expect(&GraphQLTokenKind::Dollar)?;
        if !context.allows_variables() {
            // Still consume the name so parsing continues past it.
            let name = self.expect_name_only().unwrap_or_default();
            self.record_error(GraphQLParseError::new(
                format!("variable `${name}` is not allowed in {}", context.description()),
                dollar.span,
                GraphQLParseErrorKind::InvalidSyntax,
            ));
            return Err(());
        }
        let name = self.expect_name_only()?;
        Ok(ast::Value::Variable(name))
    }

    /// Converts a consumed literal token into a value, checking that numbers
    /// are in range and strings cook cleanly.
    fn literal_value(&mut self, token: GraphQLToken<'src>) -> Result<ast::Value, ()> {
        let span = token.span;
        match token.kind {
            GraphQLTokenKind::IntValue(ref raw) => match token.kind.parse_int_value() {
                Some(Ok(val)) if i32::try_from(val).is_ok() => Ok(ast::Value::Int(val as i32)),
                // The lexer has already checked the syntax, so any failure
                // here is out of range.
                Some(Ok(_)) | Some(Err(_)) | None => {
                    self.record_error(GraphQLParseError::new(
                        format!("integer `{raw}` overflows 32-bit integer"),
                        span,
                        GraphQLParseErrorKind::InvalidValue(ValueParsingError::Int(raw.to_string())),
                    ));
                    Err(())
                },
            },
            GraphQLTokenKind::FloatValue(ref raw) => match token.kind.parse_float_value() {
                Some(Ok(val)) if val.is_finite() => Ok(ast::Value::Float(val)),
                Some(Ok(_)) => {
                    self.record_error(GraphQLParseError::new(
                        format!("float `{raw}` is not a finite number"),
                        span,
                        GraphQLParseErrorKind::InvalidValue(ValueParsingError::Float(
                            raw.to_string(),
                        )),
                    ));
                    Err(())
                },
                Some(Err(_)) | None => {
                    self.record_error(GraphQLParseError::new(
                        format!("invalid float `{raw}`"),
                        span,
                        GraphQLParseErrorKind::InvalidValue(ValueParsingError::Float(
                            raw.to_string(),
                        )),
                    ));
                    Err(())
                },
            },
            GraphQLTokenKind::StringValue(_) => match token.kind.parse_string_value() {
                Some(Ok(cooked)) => Ok(ast::Value::String(cooked)),
                Some(Err(err)) => {
                    self.record_error(GraphQLParseError::new(
                        format!("invalid string: {err}"),
                        span,
                        GraphQLParseErrorKind::InvalidValue(ValueParsingError::String(err)),
                    ));
                    Err(())
                },
                None => Err(()),
            },
            GraphQLTokenKind::True => Ok(ast::Value::Boolean(true)),
            GraphQLTokenKind::False => Ok(ast::Value::Boolean(false)),
            GraphQLTokenKind::Null => Ok(ast::Value::Null),
            GraphQLTokenKind::Name(name) => Ok(ast::Value::Enum(name.into_owned())),
            _ => Err(()),
        }
    }

    /// `[value, ...]`
    fn parse_list_value(&mut self, context: ConstContext) -> Result<ast::Value, ()> {
        let open_token = self.expect(&GraphQLTokenKind::SquareBracketOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::ListValue);

        let delimiter_depth = self.delimiter_stack.len();
        let mut values = Vec::new();
        loop {
            if self.peek_is_closing_delimiter() {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("[");
                return Err(());
            }
            match self.parse_value(context) {
                Ok(value) => values.push(value),
                Err(()) => {
                    self.delimiter_stack.truncate(delimiter_depth);
                    self.skip_to_list_recovery_point();
                },
            }
        }

        self.expect_close(&GraphQLTokenKind::SquareBracketClose)?;
        Ok(ast::Value::List(values))
    }

    /// `{ name: value, ... }`
    fn parse_object_value(&mut self, context: ConstContext) -> Result<ast::Value, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::ObjectValue);

        let mut fields = IndexMap::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("{");
                return Err(());
            }

            let (field_name, field_span) = self.expect_name()?;
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(context)?;
            if fields.contains_key(&field_name) {
                self.record_error(GraphQLParseError::new(
                    format!("duplicate input object field `{field_name}`"),
                    field_span,
                    GraphQLParseErrorKind::InvalidSyntax,
                ));
            } else {
                fields.insert(field_name, value);
            }
        }

        self.expect_close(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(ast::Value::Object(fields))
    }

    /// Skips to the next token that can start a list item, or the end of
    /// the list.
    fn skip_to_list_recovery_point(&mut self) {
        loop {
            let stop = match self.token_stream.peek() {
                None => true,
                Some(token) => matches!(
                    token.kind,
                    GraphQLTokenKind::SquareBracketClose
                        | GraphQLTokenKind::CurlyBraceClose
                        | GraphQLTokenKind::ParenClose
                        | GraphQLTokenKind::Eof
                        | GraphQLTokenKind::Dollar
                        | GraphQLTokenKind::IntValue(_)
                        | GraphQLTokenKind::FloatValue(_)
                        | GraphQLTokenKind::StringValue(_)
                        | GraphQLTokenKind::True
                        | GraphQLTokenKind::False
                        | GraphQLTokenKind::Null
                        | GraphQLTokenKind::SquareBracketOpen
                        | GraphQLTokenKind::CurlyBraceOpen
                        | GraphQLTokenKind::Name(_)
                ),
            };
            if stop {
                break;
            }
            self.consume_token();
        }
    }

    // =========================================================================
    // Type annotations
    // =========================================================================

    /// `Name`, `[Type]`, optionally followed by `!`.
    fn parse_type_annotation(&mut self) -> Result<ast::Type, ()> {
        self.enter_recursion()?;
        let result = self.parse_type_annotation_impl();
        self.exit_recursion();
        result
    }

    fn parse_type_annotation_impl(&mut self) -> Result<ast::Type, ()> {
        let base_type = if self.peek_is(&GraphQLTokenKind::SquareBracketOpen) {
            let open_token = self.expect(&GraphQLTokenKind::SquareBracketOpen)?;
            self.push_delimiter(open_token.span, DelimiterContext::ListType);
            let inner = self.parse_type_annotation()?;
            self.expect_close(&GraphQLTokenKind::SquareBracketClose)?;
            ast::Type::List(Box::new(inner))
        } else {
            ast::Type::Named(self.expect_name_only()?)
        };

        if self.peek_is(&GraphQLTokenKind::Bang) {
            self.consume_token();
            Ok(ast::Type::NonNull(Box::new(base_type)))
        } else {
            Ok(base_type)
        }
    }

    // =========================================================================
    // Directives and arguments
    // =========================================================================

    fn parse_directives(&mut self, context: ConstContext) -> Result<Vec<ast::Directive>, ()> {
        let mut directives = Vec::new();
        while self.peek_is(&GraphQLTokenKind::At) {
            directives.push(self.parse_directive(context)?);
        }
        Ok(directives)
    }

    /// `@name` or `@name(args)`
    fn parse_directive(&mut self, context: ConstContext) -> Result<ast::Directive, ()> {
        let position = self
            .expect(&GraphQLTokenKind::At)?
            .span
            .start_inclusive
            .to_ast_pos();
        let name = self.expect_name_only()?;
        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_arguments(DelimiterContext::DirectiveArguments, context)?
        } else {
            Vec::new()
        };

        Ok(ast::Directive {
            position,
            name,
            arguments,
        })
    }

    /// `(name: value, ...)`
    fn parse_arguments(
        &mut self,
        delimiter_context: DelimiterContext,
        context: ConstContext,
    ) -> Result<Vec<ast::Argument>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::ParenOpen)?;
        if self.peek_is(&GraphQLTokenKind::ParenClose) {
            self.record_error(GraphQLParseError::new(
                "argument list cannot be empty; omit the parentheses instead",
                open_token.span.clone(),
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "argument list".to_string(),
                },
            ));
        }
        self.push_delimiter(open_token.span, delimiter_context);

        let mut arguments = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("(");
                return Err(());
            }

            let (name, name_span) = self.expect_name()?;
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(context)?;
            arguments.push(ast::Argument {
                position: name_span.start_inclusive.to_ast_pos(),
                name,
                value,
            });
        }

        self.expect_close(&GraphQLTokenKind::ParenClose)?;
        Ok(arguments)
    }

    // =========================================================================
    // Selection sets
    // =========================================================================

    fn parse_selection_set(&mut self) -> Result<ast::SelectionSet, ()> {
        self.enter_recursion()?;
        let result = self.parse_selection_set_impl();
        self.exit_recursion();
        result
    }

    fn parse_selection_set_impl(&mut self) -> Result<ast::SelectionSet, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        let position = open_token.span.start_inclusive.to_ast_pos();
        if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
            self.record_error(GraphQLParseError::new(
                "selection set cannot be empty",
                open_token.span.clone(),
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "selection set".to_string(),
                },
            ));
        }
        self.push_delimiter(open_token.span, DelimiterContext::SelectionSet);
        let delimiter_depth = self.delimiter_stack.len();

        let mut items = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("{");
                return Err(());
            }

            match self.parse_selection() {
                Ok(selection) => items.push(selection),
                Err(()) => {
                    self.delimiter_stack.truncate(delimiter_depth);
                    self.skip_to_selection_recovery_point();
                },
            }
        }

        self.expect_close(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(ast::SelectionSet { position, items })
    }

    fn parse_selection(&mut self) -> Result<ast::Selection, ()> {
        if !self.peek_is(&GraphQLTokenKind::Ellipsis) {
            return self.parse_field().map(ast::Selection::Field);
        }

        let position = self
            .expect(&GraphQLTokenKind::Ellipsis)?
            .span
            .start_inclusive
            .to_ast_pos();

        if self.peek_is_keyword("on")
            || self.peek_is(&GraphQLTokenKind::At)
            || self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)
        {
            self.parse_inline_fragment(position)
        } else {
            self.parse_fragment_spread(position)
        }
    }

    /// `alias: name(args) @directives { selections }`
    fn parse_field(&mut self) -> Result<ast::Field, ()> {
        let (first_name, first_span) = self.expect_name()?;
        let position = first_span.start_inclusive.to_ast_pos();

        let (alias, name) = if self.peek_is(&GraphQLTokenKind::Colon) {
            self.consume_token();
            (Some(first_name), self.expect_name_only()?)
        } else {
            (None, first_name)
        };

        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_arguments(DelimiterContext::FieldArguments, ConstContext::AllowVariables)?
        } else {
            Vec::new()
        };

        let directives = self.parse_directives(ConstContext::AllowVariables)?;

        let selection_set = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        Ok(ast::Field {
            position,
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }

    /// `...Name @directives` (after the `...`)
    fn parse_fragment_spread(&mut self, position: ast::Pos) -> Result<ast::Selection, ()> {
        let fragment_name = self.expect_name_only()?;
        let directives = self.parse_directives(ConstContext::AllowVariables)?;

        Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
            position,
            fragment_name,
            directives,
        }))
    }

    /// `... on Type @directives { selections }` (after the `...`)
    fn parse_inline_fragment(&mut self, position: ast::Pos) -> Result<ast::Selection, ()> {
        let type_condition = if self.peek_is_keyword("on") {
            self.consume_token();
            Some(self.expect_name_only()?)
        } else {
            None
        };

        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            position,
            type_condition,
            directives,
            selection_set,
        }))
    }

    /// Skips to the next token that can start a selection, or the end of
    /// the selection set. Bracketed groups after the failed selection (its
    /// arguments or sub-selection) are skipped whole.
    fn skip_to_selection_recovery_point(&mut self) {
        let mut nesting = 0usize;
        loop {
            let Some(token) = self.token_stream.peek() else {
                break;
            };
            match token.kind {
                GraphQLTokenKind::Eof => break,
                GraphQLTokenKind::CurlyBraceOpen
                | GraphQLTokenKind::ParenOpen
                | GraphQLTokenKind::SquareBracketOpen => nesting += 1,
                GraphQLTokenKind::CurlyBraceClose
                | GraphQLTokenKind::ParenClose
                | GraphQLTokenKind::SquareBracketClose => {
                    if nesting == 0 {
                        if matches!(token.kind, GraphQLTokenKind::CurlyBraceClose) {
                            break;
                        }
                    } else {
                        nesting -= 1;
                    }
                },
                GraphQLTokenKind::Ellipsis
                | GraphQLTokenKind::Name(_)
                | GraphQLTokenKind::True
                | GraphQLTokenKind::False
                | GraphQLTokenKind::Null
                    if nesting == 0 =>
                {
                    break;
                },
                _ => {},
            }
            self.consume_token();
        }
    }

    // =========================================================================
    // Operations and fragments
    // =========================================================================

    fn parse_operation_definition(&mut self) -> Result<ast::OperationDefinition, ()> {
        // Shorthand `{ ... }` is an anonymous query.
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            let selection_set = self.parse_selection_set()?;
            return Ok(ast::OperationDefinition {
                position: selection_set.position,
                kind: ast::OperationKind::Query,
                name: None,
                variable_definitions: Vec::new(),
                directives: Vec::new(),
                selection_set,
            });
        }

        let kind = if self.peek_is_keyword("query") {
            ast::OperationKind::Query
        } else if self.peek_is_keyword("mutation") {
            ast::OperationKind::Mutation
        } else if self.peek_is_keyword("subscription") {
            ast::OperationKind::Subscription
        } else {
            self.record_unexpected(
                "operation type (`query`, `mutation`, or `subscription`)",
                vec![
                    "query".to_string(),
                    "mutation".to_string(),
                    "subscription".to_string(),
                ],
            );
            return Err(());
        };
        let position = self.expect_keyword(kind.as_str())?.start_inclusive.to_ast_pos();

        let has_name = self.token_stream.peek().is_some_and(|t| {
            matches!(
                t.kind,
                GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
            )
        });
        let name = if has_name {
            Some(self.expect_name_only()?)
        } else {
            None
        };

        let variable_definitions = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };

        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::OperationDefinition {
            position,
            kind,
            name,
            variable_definitions,
            directives,
            selection_set,
        })
    }

    /// `($var: Type = default, ...)`
    fn parse_variable_definitions(&mut self) -> Result<Vec<ast::VariableDefinition>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::ParenOpen)?;
        if self.peek_is(&GraphQLTokenKind::ParenClose) {
            self.record_error(GraphQLParseError::new(
                "variable definitions cannot be empty; omit the parentheses instead",
                open_token.span.clone(),
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "variable definitions".to_string(),
                },
            ));
        }
        self.push_delimiter(open_token.span, DelimiterContext::VariableDefinitions);

        let mut definitions = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("(");
                return Err(());
            }
            definitions.push(self.parse_variable_definition()?);
        }

        self.expect_close(&GraphQLTokenKind::ParenClose)?;
        Ok(definitions)
    }

    /// `$name: Type = default @directives`
    fn parse_variable_definition(&mut self) -> Result<ast::VariableDefinition, ()> {
        let position = self
            .expect(&GraphQLTokenKind::Dollar)?
            .span
            .start_inclusive
            .to_ast_pos();
        let name = self.expect_name_only()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let var_type = self.parse_type_annotation()?;

        let default_value = if self.peek_is(&GraphQLTokenKind::Equals) {
            self.consume_token();
            Some(self.parse_value(ConstContext::VariableDefaultValue)?)
        } else {
            None
        };

        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;

        Ok(ast::VariableDefinition {
            position,
            name,
            var_type,
            default_value,
            directives,
        })
    }

    /// `fragment Name on Type @directives { ... }`
    fn parse_fragment_definition(&mut self) -> Result<ast::FragmentDefinition, ()> {
        let position = self.expect_keyword("fragment")?.start_inclusive.to_ast_pos();

        let (name, name_span) = self.expect_name()?;
        if name == "on" {
            // Keep parsing to find more errors.
            let mut error = GraphQLParseError::new(
                "fragment name cannot be `on`",
                name_span,
                GraphQLParseErrorKind::ReservedName {
                    name: "on".to_string(),
                    context: ReservedNameContext::FragmentName,
                },
            );
            error.add_spec("https://spec.graphql.org/October2021/#FragmentName");
            self.record_error(error);
        }

        self.expect_keyword("on")?;
        let type_condition = self.expect_name_only()?;
        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::FragmentDefinition {
            position,
            name,
            type_condition,
            directives,
            selection_set,
        })
    }

    // =========================================================================
    // Type-system definitions
    // =========================================================================

    /// Parses an optional description string preceding a definition.
    fn parse_description(&mut self) -> Option<String> {
        let is_string = self
            .token_stream
            .peek()
            .is_some_and(|t| matches!(t.kind, GraphQLTokenKind::StringValue(_)));
        if !is_string {
            return None;
        }

        let token = self.consume_token()?;
        match token.kind.parse_string_value() {
            Some(Ok(parsed)) => Some(parsed),
            Some(Err(err)) => {
                self.record_error(GraphQLParseError::new(
                    format!("invalid string in description: {err}"),
                    token.span,
                    GraphQLParseErrorKind::InvalidValue(ValueParsingError::String(err)),
                ));
                None
            },
            None => None,
        }
    }

    /// Parses a type definition if the next keyword introduces one.
    fn try_parse_type_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<Option<ast::TypeDefinition>, ()> {
        let def = if self.peek_is_keyword("scalar") {
            self.parse_scalar_type_definition(description)?
        } else if self.peek_is_keyword("type") {
            self.parse_object_type_definition(description)?
        } else if self.peek_is_keyword("interface") {
            self.parse_interface_type_definition(description)?
        } else if self.peek_is_keyword("union") {
            self.parse_union_type_definition(description)?
        } else if self.peek_is_keyword("enum") {
            self.parse_enum_type_definition(description)?
        } else if self.peek_is_keyword("input") {
            self.parse_input_object_type_definition(description)?
        } else {
            return Ok(None);
        };
        Ok(Some(def))
    }

    /// `schema @directives { query: Query ... }`, after the `schema` keyword.
    ///
    /// For `extend schema` the braces may be omitted.
    fn parse_schema_definition_body(
        &mut self,
        position: ast::Pos,
        is_extension: bool,
    ) -> Result<ast::SchemaDefinition, ()> {
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;
        let mut schema = ast::SchemaDefinition {
            position,
            directives,
            query: None,
            mutation: None,
            subscription: None,
        };

        if is_extension && !self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            return Ok(schema);
        }

        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::SchemaDefinition);

        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("{");
                return Err(());
            }

            let (operation_type, operation_type_span) = self.expect_name()?;
            self.expect(&GraphQLTokenKind::Colon)?;
            let type_name = self.expect_name_only()?;

            let slot = match operation_type.as_str() {
                "query" => &mut schema.query,
                "mutation" => &mut schema.mutation,
                "subscription" => &mut schema.subscription,
                _ => {
                    self.record_error(GraphQLParseError::new(
                        format!(
                            "unknown operation type `{operation_type}`; expected `query`, \
                             `mutation`, or `subscription`"
                        ),
                        operation_type_span,
                        GraphQLParseErrorKind::InvalidSyntax,
                    ));
                    continue;
                },
            };
            if slot.is_some() {
                self.record_error(GraphQLParseError::new(
                    format!("root operation type for `{operation_type}` is defined more than once"),
                    operation_type_span,
                    GraphQLParseErrorKind::InvalidSyntax,
                ));
            }
            *slot = Some(type_name);
        }

        self.expect_close(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(schema)
    }

    /// `scalar Name @directives`
    fn parse_scalar_type_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<ast::TypeDefinition, ()> {
        let position = self.expect_keyword("scalar")?.start_inclusive.to_ast_pos();
        let name = self.expect_name_only()?;
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;

        Ok(ast::TypeDefinition::Scalar(ast::ScalarTypeDefinition {
            position,
            description,
            name,
            directives,
        }))
    }

    /// `type Name implements I & J @directives { fields }`
    fn parse_object_type_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<ast::TypeDefinition, ()> {
        let position = self.expect_keyword("type")?.start_inclusive.to_ast_pos();
        let name = self.expect_name_only()?;
        let implements_interfaces = self.parse_implements_interfaces()?;
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;
        let fields = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            self.parse_fields_definition(DelimiterContext::ObjectTypeDefinition)?
        } else {
            Vec::new()
        };

        Ok(ast::TypeDefinition::Object(ast::ObjectTypeDefinition {
            position,
            description,
            name,
            implements_interfaces,
            directives,
            fields,
        }))
    }

    /// `interface Name implements I @directives { fields }`
    fn parse_interface_type_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<ast::TypeDefinition, ()> {
        let position = self.expect_keyword("interface")?.start_inclusive.to_ast_pos();
        let name = self.expect_name_only()?;
        let implements_interfaces = self.parse_implements_interfaces()?;
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;
        let fields = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            self.parse_fields_definition(DelimiterContext::InterfaceDefinition)?
        } else {
            Vec::new()
        };

        Ok(ast::TypeDefinition::Interface(ast::InterfaceTypeDefinition {
            position,
            description,
            name,
            implements_interfaces,
            directives,
            fields,
        }))
    }

    /// `union Name @directives = A | B | C`
    fn parse_union_type_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<ast::TypeDefinition, ()> {
        let position = self.expect_keyword("union")?.start_inclusive.to_ast_pos();
        let name = self.expect_name_only()?;
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;

        let mut types = Vec::new();
        if self.peek_is(&GraphQLTokenKind::Equals) {
            self.consume_token();
            if self.peek_is(&GraphQLTokenKind::Pipe) {
                self.consume_token();
            }
            types.push(self.expect_name_only()?);
            while self.peek_is(&GraphQLTokenKind::Pipe) {
                self.consume_token();
                types.push(self.expect_name_only()?);
            }
        }

        Ok(ast::TypeDefinition::Union(ast::UnionTypeDefinition {
            position,
            description,
            name,
            directives,
            types,
        }))
    }

    /// `enum Name @directives { VALUES }`
    fn parse_enum_type_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<ast::TypeDefinition, ()> {
        let position = self.expect_keyword("enum")?.start_inclusive.to_ast_pos();
        let name = self.expect_name_only()?;
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;
        let values = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            self.parse_enum_values_definition()?
        } else {
            Vec::new()
        };

        Ok(ast::TypeDefinition::Enum(ast::EnumTypeDefinition {
            position,
            description,
            name,
            directives,
            values,
        }))
    }

    /// `input Name @directives { fields }`
    fn parse_input_object_type_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<ast::TypeDefinition, ()> {
        let position = self.expect_keyword("input")?.start_inclusive.to_ast_pos();
        let name = self.expect_name_only()?;
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;
        let fields = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            self.parse_input_values_definition(
                &GraphQLTokenKind::CurlyBraceOpen,
                DelimiterContext::InputObjectDefinition,
            )?
        } else {
            Vec::new()
        };

        Ok(ast::TypeDefinition::InputObject(ast::InputObjectTypeDefinition {
            position,
            description,
            name,
            directives,
            fields,
        }))
    }

    /// `directive @name(args) repeatable on LOCATION | ...`
    fn parse_directive_definition(
        &mut self,
        description: Option<String>,
    ) -> Result<ast::DirectiveDefinition, ()> {
        let position = self.expect_keyword("directive")?.start_inclusive.to_ast_pos();
        self.expect(&GraphQLTokenKind::At)?;
        let name = self.expect_name_only()?;

        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_input_values_definition(
                &GraphQLTokenKind::ParenOpen,
                DelimiterContext::ArgumentDefinitions,
            )?
        } else {
            Vec::new()
        };

        let repeatable = if self.peek_is_keyword("repeatable") {
            self.consume_token();
            true
        } else {
            false
        };

        self.expect_keyword("on")?;
        if self.peek_is(&GraphQLTokenKind::Pipe) {
            self.consume_token();
        }
        let mut locations = vec![self.parse_directive_location()?];
        while self.peek_is(&GraphQLTokenKind::Pipe) {
            self.consume_token();
            locations.push(self.parse_directive_location()?);
        }

        Ok(ast::DirectiveDefinition {
            position,
            description,
            name,
            arguments,
            repeatable,
            locations,
        })
    }

    fn parse_directive_location(&mut self) -> Result<ast::DirectiveLocation, ()> {
        let (name, span) = self.expect_name()?;
        if let Some(location) = ast::DirectiveLocation::from_name(&name) {
            return Ok(location);
        }

        let mut error = GraphQLParseError::new(
            format!("unknown directive location `{name}`"),
            span,
            GraphQLParseErrorKind::InvalidSyntax,
        );
        if let Some(suggestion) = suggest_directive_location(&name) {
            error.add_help(format!("did you mean `{suggestion}`?"));
        }
        self.record_error(error);
        Err(())
    }

    /// `implements A & B`, or nothing.
    fn parse_implements_interfaces(&mut self) -> Result<Vec<String>, ()> {
        if !self.peek_is_keyword("implements") {
            return Ok(Vec::new());
        }
        self.consume_token();
        if self.peek_is(&GraphQLTokenKind::Ampersand) {
            self.consume_token();
        }

        let mut interfaces = vec![self.expect_name_only()?];
        while self.peek_is(&GraphQLTokenKind::Ampersand) {
            self.consume_token();
            interfaces.push(self.expect_name_only()?);
        }
        Ok(interfaces)
    }

    /// `{ field(args): Type @directives ... }`
    fn parse_fields_definition(
        &mut self,
        context: DelimiterContext,
    ) -> Result<Vec<ast::FieldDefinition>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span, context);

        let mut fields = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("{");
                return Err(());
            }
            fields.push(self.parse_field_definition()?);
        }

        self.expect_close(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(fields)
    }

    fn parse_field_definition(&mut self) -> Result<ast::FieldDefinition, ()> {
        let description = self.parse_description();
        let (name, name_span) = self.expect_name()?;

        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_input_values_definition(
                &GraphQLTokenKind::ParenOpen,
                DelimiterContext::ArgumentDefinitions,
            )?
        } else {
            Vec::new()
        };

        self.expect(&GraphQLTokenKind::Colon)?;
        let field_type = self.parse_type_annotation()?;
        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;

        Ok(ast::FieldDefinition {
            position: name_span.start_inclusive.to_ast_pos(),
            description,
            name,
            arguments,
            field_type,
            directives,
        })
    }

    /// Argument definitions `( ... )` or input fields `{ ... }`.
    fn parse_input_values_definition(
        &mut self,
        open: &GraphQLTokenKind<'_>,
        context: DelimiterContext,
    ) -> Result<Vec<ast::InputValueDefinition>, ()> {
        let (close, close_str) = match open {
            GraphQLTokenKind::ParenOpen => (GraphQLTokenKind::ParenClose, "("),
            _ => (GraphQLTokenKind::CurlyBraceClose, "{"),
        };
        let open_token = self.expect(open)?;
        self.push_delimiter(open_token.span, context);

        let mut values = Vec::new();
        loop {
            if self.peek_is(&close) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed(close_str);
                return Err(());
            }
            values.push(self.parse_input_value_definition()?);
        }

        self.expect_close(&close)?;
        Ok(values)
    }

    /// `"description" name: Type = default @directives`
    fn parse_input_value_definition(&mut self) -> Result<ast::InputValueDefinition, ()> {
        let description = self.parse_description();
        let (name, name_span) = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let value_type = self.parse_type_annotation()?;

        let default_value = if self.peek_is(&GraphQLTokenKind::Equals) {
            self.consume_token();
            Some(self.parse_value(ConstContext::InputDefaultValue)?)
        } else {
            None
        };

        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;

        Ok(ast::InputValueDefinition {
            position: name_span.start_inclusive.to_ast_pos(),
            description,
            name,
            value_type,
            default_value,
            directives,
        })
    }

    fn parse_enum_values_definition(&mut self) -> Result<Vec<ast::EnumValueDefinition>, ()> {
        let open_token = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        self.push_delimiter(open_token.span, DelimiterContext::EnumDefinition);

        let mut values = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            if self.token_stream.is_at_end() {
                self.record_unclosed("{");
                return Err(());
            }
            values.push(self.parse_enum_value_definition()?);
        }

        self.expect_close(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(values)
    }

    fn parse_enum_value_definition(&mut self) -> Result<ast::EnumValueDefinition, ()> {
        let description = self.parse_description();
        let (name, name_span) = self.expect_name()?;
        let position = name_span.start_inclusive.to_ast_pos();
        if matches!(name.as_str(), "true" | "false" | "null") {
            let mut error = GraphQLParseError::new(
                format!("enum value cannot be `{name}`"),
                name_span,
                GraphQLParseErrorKind::ReservedName {
                    name: name.clone(),
                    context: ReservedNameContext::EnumValue,
                },
            );
            error.add_spec("https://spec.graphql.org/October2021/#EnumValue");
            self.record_error(error);
        }

        let directives = self.parse_directives(ConstContext::DirectiveArgument)?;

        Ok(ast::EnumValueDefinition {
            position,
            description,
            name,
            directives,
        })
    }

    // =========================================================================
    // Extensions
    // =========================================================================

    /// `extend schema ...` or `extend <type kind> Name ...`
    fn parse_extension(&mut self) -> Result<ast::TypeSystemDefinition, ()> {
        let position = self.expect_keyword("extend")?.start_inclusive.to_ast_pos();

        if self.peek_is_keyword("schema") {
            self.consume_token();
            return Ok(ast::TypeSystemDefinition::SchemaExtension(
                self.parse_schema_definition_body(position, true)?,
            ));
        }

        match self.try_parse_type_definition(None)? {
            Some(def) => Ok(ast::TypeSystemDefinition::TypeExtension(into_extension(
                def, position,
            ))),
            None => {
                self.record_unexpected(
                    "type extension keyword",
                    ["schema", "scalar", "type", "interface", "union", "enum", "input"]
                        .iter()
                        .map(|kw| kw.to_string())
                        .collect(),
                );
                Err(())
            },
        }
    }
}

/// Rewraps a parsed definition as an extension positioned at `extend`.
fn into_extension(def: ast::TypeDefinition, position: ast::Pos) -> ast::TypeExtension {
    match def {
        ast::TypeDefinition::Scalar(mut t) => {
            t.position = position;
            ast::TypeExtension::Scalar(t)
        },
        ast::TypeDefinition::Object(mut t) => {
            t.position = position;
            ast::TypeExtension::Object(t)
        },
        ast::TypeDefinition::Interface(mut t) => {
            t.position = position;
            ast::TypeExtension::Interface(t)
        },
        ast::TypeDefinition::Union(mut t) => {
            t.position = position;
            ast::TypeExtension::Union(t)
        },
        ast::TypeDefinition::Enum(mut t) => {
            t.position = position;
            ast::TypeExtension::Enum(t)
        },
        ast::TypeDefinition::InputObject(mut t) => {
            t.position = position;
            ast::TypeExtension::InputObject(t)
        },
    }
}

/// Suggests the closest directive location for a typo.
fn suggest_directive_location(input: &str) -> Option<&'static str> {
    let input_upper = input.to_uppercase();
    ast::DirectiveLocation::ALL
        .iter()
        .map(|loc| (loc.as_str(), edit_distance(&input_upper, loc.as_str())))
        .filter(|(_, distance)| *distance <= 3)
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}

/// Levenshtein edit distance.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (m, n) = (a_chars.len(), b_chars.len());
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];
    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}
