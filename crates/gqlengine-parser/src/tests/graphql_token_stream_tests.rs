//! Tests for `GraphQLTokenStream` lookahead.

use crate::GraphQLTokenStream;
use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;

#[test]
fn peek_does_not_consume() {
    let mut stream = GraphQLTokenStream::new(StrGraphQLTokenSource::new("a b"));
    assert_eq!(stream.peek().unwrap().kind, GraphQLTokenKind::name_borrowed("a"));
    assert_eq!(stream.peek().unwrap().kind, GraphQLTokenKind::name_borrowed("a"));
    assert_eq!(stream.consume().unwrap().kind, GraphQLTokenKind::name_borrowed("a"));
    assert_eq!(stream.peek().unwrap().kind, GraphQLTokenKind::name_borrowed("b"));
}

#[test]
fn peek_nth_buffers_ahead() {
    let mut stream = GraphQLTokenStream::new(StrGraphQLTokenSource::new("{ a }"));
    assert_eq!(stream.peek_nth(2).unwrap().kind, GraphQLTokenKind::CurlyBraceClose);
    assert_eq!(stream.current_buffer_len(), 3);
    assert_eq!(stream.consume().unwrap().kind, GraphQLTokenKind::CurlyBraceOpen);
    assert_eq!(stream.current_buffer_len(), 2);
}

#[test]
fn is_at_end_on_eof() {
    let mut stream = GraphQLTokenStream::new(StrGraphQLTokenSource::new("x"));
    assert!(!stream.is_at_end());
    stream.consume();
    assert!(stream.is_at_end());
    assert_eq!(stream.consume().unwrap().kind, GraphQLTokenKind::Eof);
    assert!(stream.consume().is_none());
    assert!(stream.is_at_end());
}

#[test]
fn peek_past_end_is_none() {
    let mut stream = GraphQLTokenStream::new(StrGraphQLTokenSource::new(""));
    assert_eq!(stream.peek_nth(0).unwrap().kind, GraphQLTokenKind::Eof);
    assert!(stream.peek_nth(1).is_none());
}
