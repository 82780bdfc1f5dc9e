//! Shared helpers for parser tests.

use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::ast;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;

/// A token with a zero-width span at the origin.
pub fn mock_token(kind: GraphQLTokenKind<'static>) -> GraphQLToken<'static> {
    let pos = SourcePosition::new(0, 0, 0);
    GraphQLToken::new(kind, GraphQLSourceSpan::new(pos, pos))
}

pub fn mock_name_token(name: &str) -> GraphQLToken<'static> {
    mock_token(GraphQLTokenKind::name_owned(name.to_string()))
}

/// A token source that replays a fixed list of tokens.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<GraphQLToken<'static>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<GraphQLToken<'static>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = GraphQLToken<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}

/// Parses `source` and returns its only operation, panicking on errors.
pub fn single_operation(source: &str) -> ast::OperationDefinition {
    let doc = crate::parse_executable(source)
        .into_valid_ast()
        .unwrap_or_else(|| panic!("expected `{source}` to parse"));
    match doc.definitions.into_iter().next() {
        Some(ast::Definition::Operation(op)) => op,
        other => panic!("expected an operation, got {other:?}"),
    }
}

/// The fields of the top-level selection set of `op`.
pub fn top_fields(op: &ast::OperationDefinition) -> Vec<&ast::Field> {
    op.selection_set
        .items
        .iter()
        .filter_map(|sel| match sel {
            ast::Selection::Field(field) => Some(field),
            _ => None,
        })
        .collect()
}

/// Parses `{ f(a: <value>) }` and returns the value of `a`.
pub fn parse_argument_value(value_source: &str) -> ast::Value {
    let op = single_operation(&format!("{{ f(a: {value_source}) }}"));
    let fields = top_fields(&op);
    fields[0].arguments[0].value.clone()
}

/// Error messages of a failed executable parse.
pub fn executable_error_messages(source: &str) -> Vec<String> {
    crate::parse_executable(source)
        .errors
        .iter()
        .map(|e| e.message().to_string())
        .collect()
}
