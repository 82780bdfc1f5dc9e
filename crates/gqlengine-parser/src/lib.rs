//! Lexing, parsing and printing of GraphQL request and schema documents.
//!
//! The lexer ([`token_source::StrGraphQLTokenSource`]) turns text into a lazy
//! stream of [`token::GraphQLToken`]s. [`GraphQLParser`] consumes that stream
//! with a recursive-descent grammar and produces an owned [`ast`]. The
//! [`printer`] turns an executable [`ast::Document`] back into canonical
//! request text.

pub mod ast;
mod definition_kind;
mod graphql_error_note;
mod graphql_error_note_kind;
mod graphql_lex_error;
mod graphql_parse_error;
mod graphql_parse_error_kind;
mod graphql_parser;
mod graphql_source_span;
mod graphql_string_parsing_error;
mod graphql_token_stream;
mod parse_result;
pub mod printer;
mod reserved_name_context;
mod source_position;
pub mod token;
pub mod token_source;

pub use definition_kind::DefinitionKind;
pub use definition_kind::DocumentKind;
pub use graphql_error_note::GraphQLErrorNote;
pub use graphql_error_note::GraphQLErrorNotes;
pub use graphql_error_note_kind::GraphQLErrorNoteKind;
pub use graphql_lex_error::GraphQLLexError;
pub use graphql_lex_error::tokenize;
pub use graphql_parse_error::GraphQLParseError;
pub use graphql_parse_error_kind::GraphQLParseErrorKind;
pub use graphql_parse_error_kind::ValueParsingError;
pub use graphql_parser::GraphQLParser;
pub use graphql_source_span::GraphQLSourceSpan;
pub use graphql_string_parsing_error::GraphQLStringParsingError;
pub use graphql_token_stream::GraphQLTokenStream;
pub use parse_result::ParseResult;
pub use reserved_name_context::ReservedNameContext;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
pub use source_position::SourcePosition;

/// Parses `source` as an executable document (operations and fragments).
pub fn parse_executable(source: &str) -> ParseResult<ast::Document> {
    GraphQLParser::new(source).parse_executable_document()
}

/// Parses `source` as a type-system (SDL) document.
pub fn parse_schema(source: &str) -> ParseResult<ast::SchemaDocument> {
    GraphQLParser::new(source).parse_schema_document()
}

#[cfg(test)]
mod tests;
