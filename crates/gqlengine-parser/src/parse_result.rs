//! Result type for parses that may recover from errors.

use crate::GraphQLParseError;

/// The result of a parse.
///
/// Unlike `Result<T, E>`, a `ParseResult` can hold both an AST and errors:
/// after an error the parser recovers at the next definition and keeps
/// going, so one pass reports every syntax error it can find.
///
/// Use [`valid_ast()`](Self::valid_ast) when only a fully valid document is
/// acceptable (compiling a schema, executing a request) and
/// [`ast()`](Self::ast) for best-effort tooling.
///
/// ```
/// use gqlengine_parser::parse_executable;
///
/// let source = "{ user { name } }";
/// let result = parse_executable(source);
/// assert!(result.is_ok());
///
/// let broken = parse_executable("{ user { name } ");
/// assert!(broken.has_errors());
/// eprintln!("{}", broken.format_errors(Some("{ user { name } ")));
/// ```
#[derive(Debug)]
pub struct ParseResult<TAst> {
    ast: Option<TAst>,

    /// Errors encountered during parsing, empty on success.
    pub errors: Vec<GraphQLParseError>,
}

impl<TAst> ParseResult<TAst> {
    pub(crate) fn ok(ast: TAst) -> Self {
        Self {
            ast: Some(ast),
            errors: Vec::new(),
        }
    }

    /// An AST produced via error recovery, together with its errors.
    pub(crate) fn recovered(ast: TAst, errors: Vec<GraphQLParseError>) -> Self {
        Self {
            ast: Some(ast),
            errors,
        }
    }

    /// Returns the AST only if parsing produced no errors.
    pub fn valid_ast(&self) -> Option<&TAst> {
        if self.errors.is_empty() {
            self.ast.as_ref()
        } else {
            None
        }
    }

    /// Returns the AST if present, regardless of errors.
    pub fn ast(&self) -> Option<&TAst> {
        self.ast.as_ref()
    }

    pub fn into_valid_ast(self) -> Option<TAst> {
        if self.errors.is_empty() {
            self.ast
        } else {
            None
        }
    }

    pub fn into_ast(self) -> Option<TAst> {
        self.ast
    }

    pub fn is_ok(&self) -> bool {
        self.ast.is_some() && self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Formats all errors for display, with source snippets if `source` is
    /// given.
    pub fn format_errors(&self, source: Option<&str>) -> String {
        self.errors
            .iter()
            .map(|e| e.format_detailed(source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<TAst> From<ParseResult<TAst>> for Result<TAst, Vec<GraphQLParseError>> {
    /// Treats recovered ASTs as errors.
    fn from(result: ParseResult<TAst>) -> Self {
        if result.errors.is_empty() {
            match result.ast {
                Some(ast) => Ok(ast),
                None => Err(Vec::new()),
            }
        } else {
            Err(result.errors)
        }
    }
}
