use crate::token::GraphQLToken;

/// Marker trait for lexers: iterators that generate [`GraphQLToken`]s.
///
/// Lexers are responsible for:
/// - Skipping ignored input (whitespace, commas, comments)
/// - Emitting [`GraphQLTokenKind::Error`](crate::token::GraphQLTokenKind::Error)
///   tokens for invalid input instead of stopping
/// - Ending with a single
///   [`GraphQLTokenKind::Eof`](crate::token::GraphQLTokenKind::Eof) token
///
/// Lookahead and buffering live in
/// [`GraphQLTokenStream`](crate::GraphQLTokenStream), not in the lexer.
pub trait GraphQLTokenSource<'src>: Iterator<Item = GraphQLToken<'src>> {}

impl<'src, T> GraphQLTokenSource<'src> for T where T: Iterator<Item = GraphQLToken<'src>> {}
