//! Tests for `GraphQLTokenKind` classification and literal cooking.

use crate::GraphQLStringParsingError;
use crate::smallvec;
use crate::token::GraphQLTokenKind;
use std::borrow::Cow;

fn string_token(raw: &str) -> GraphQLTokenKind<'_> {
    GraphQLTokenKind::StringValue(Cow::Borrowed(raw))
}

#[test]
fn punctuators_are_classified_as_punctuators() {
    let punctuators: Vec<GraphQLTokenKind<'static>> = vec![
        GraphQLTokenKind::Ampersand,
        GraphQLTokenKind::At,
        GraphQLTokenKind::Bang,
        GraphQLTokenKind::Colon,
        GraphQLTokenKind::CurlyBraceClose,
        GraphQLTokenKind::CurlyBraceOpen,
        GraphQLTokenKind::Dollar,
        GraphQLTokenKind::Ellipsis,
        GraphQLTokenKind::Equals,
        GraphQLTokenKind::ParenClose,
        GraphQLTokenKind::ParenOpen,
        GraphQLTokenKind::Pipe,
        GraphQLTokenKind::SquareBracketClose,
        GraphQLTokenKind::SquareBracketOpen,
    ];

    for punctuator in punctuators {
        assert!(
            punctuator.is_punctuator(),
            "{punctuator:?} should be identified as a punctuator"
        );
    }
}

#[test]
fn literals_and_keywords_are_not_punctuators() {
    let non_punctuators: Vec<GraphQLTokenKind<'static>> = vec![
        GraphQLTokenKind::name_owned("foo".to_string()),
        GraphQLTokenKind::IntValue(Cow::Borrowed("42")),
        GraphQLTokenKind::FloatValue(Cow::Borrowed("1.5")),
        GraphQLTokenKind::StringValue(Cow::Borrowed("\"s\"")),
        GraphQLTokenKind::True,
        GraphQLTokenKind::False,
        GraphQLTokenKind::Null,
        GraphQLTokenKind::Eof,
        GraphQLTokenKind::error("oops", smallvec![]),
    ];

    for kind in non_punctuators {
        assert!(!kind.is_punctuator(), "{kind:?} is not a punctuator");
    }
}

#[test]
fn literal_text_returns_source_text() {
    assert_eq!(GraphQLTokenKind::name_borrowed("user").literal_text(), Some("user"));
    assert_eq!(GraphQLTokenKind::Ellipsis.literal_text(), Some("..."));
    assert_eq!(GraphQLTokenKind::Null.literal_text(), Some("null"));
    assert_eq!(string_token("\"a\\nb\"").literal_text(), Some("\"a\\nb\""));
    assert_eq!(GraphQLTokenKind::Eof.literal_text(), None);
    assert_eq!(GraphQLTokenKind::error("x", smallvec![]).literal_text(), None);
}

#[test]
fn parse_int_value_handles_negative_and_overflow() {
    let neg = GraphQLTokenKind::IntValue(Cow::Borrowed("-123"));
    assert_eq!(neg.parse_int_value(), Some(Ok(-123)));

    let huge = GraphQLTokenKind::IntValue(Cow::Borrowed("99999999999999999999"));
    assert!(matches!(huge.parse_int_value(), Some(Err(_))));

    assert_eq!(GraphQLTokenKind::True.parse_int_value(), None);
}

#[test]
fn parse_float_value_handles_exponents() {
    let kind = GraphQLTokenKind::FloatValue(Cow::Borrowed("-1.5e3"));
    assert_eq!(kind.parse_float_value(), Some(Ok(-1500.0)));
}

#[test]
fn quoted_string_simple_escapes() {
    let kind = string_token(r#""tab\tquote\"slash\/back\\nl\n""#);
    assert_eq!(
        kind.parse_string_value(),
        Some(Ok("tab\tquote\"slash/back\\nl\n".to_string())),
    );
}

#[test]
fn quoted_string_unicode_escapes() {
    assert_eq!(
        string_token(r#""\u00E9""#).parse_string_value(),
        Some(Ok("\u{e9}".to_string())),
    );
    assert_eq!(
        string_token(r#""\u{1F600}""#).parse_string_value(),
        Some(Ok("\u{1F600}".to_string())),
    );
}

#[test]
fn quoted_string_surrogate_pair_combines() {
    assert_eq!(
        string_token(r#""\uD83D\uDE00""#).parse_string_value(),
        Some(Ok("\u{1F600}".to_string())),
    );
}

#[test]
fn quoted_string_lone_lead_surrogate_is_error() {
    assert!(matches!(
        string_token(r#""\uD83D""#).parse_string_value(),
        Some(Err(GraphQLStringParsingError::InvalidUnicodeEscape(_))),
    ));
}

#[test]
fn quoted_string_unknown_escape_is_error() {
    assert_eq!(
        string_token(r#""\q""#).parse_string_value(),
        Some(Err(GraphQLStringParsingError::InvalidEscapeSequence("\\q".to_string()))),
    );
}

#[test]
fn parse_string_value_on_non_string_is_none() {
    assert_eq!(GraphQLTokenKind::Null.parse_string_value(), None);
}
