use crate::GraphQLSourceSpan;
use crate::token::GraphQLTokenKind;

/// A GraphQL token: its kind (carrying the literal text) and where it was
/// found.
///
/// Comments and commas are insignificant in GraphQL and never become tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLToken<'src> {
    pub kind: GraphQLTokenKind<'src>,
    pub span: GraphQLSourceSpan,
}

impl<'src> GraphQLToken<'src> {
    pub fn new(kind: GraphQLTokenKind<'src>, span: GraphQLSourceSpan) -> Self {
        Self { kind, span }
    }

    /// 0-based line of the token's first character.
    pub fn line(&self) -> usize {
        self.span.start_inclusive.line()
    }

    /// 0-based column of the token's first character.
    pub fn column(&self) -> usize {
        self.span.start_inclusive.column()
    }
}
