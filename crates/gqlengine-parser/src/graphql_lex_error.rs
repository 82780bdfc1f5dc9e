use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;

/// The first lexical error in a source text.
///
/// `line` and `column` are 1-based.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct GraphQLLexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Lexes all of `source` eagerly.
///
/// On success the returned tokens end with a single
/// [`GraphQLTokenKind::Eof`]. Lexing stops at the first error token.
///
/// ```rust
/// use gqlengine_parser::tokenize;
///
/// let err = tokenize("{ name ?}").unwrap_err();
/// assert_eq!((err.line, err.column), (1, 8));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<GraphQLToken<'_>>, GraphQLLexError> {
    let mut tokens = Vec::new();
    for token in StrGraphQLTokenSource::new(source) {
        if let GraphQLTokenKind::Error { message, .. } = &token.kind {
            return Err(GraphQLLexError {
                message: message.clone(),
                line: token.line() + 1,
                column: token.column() + 1,
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}
