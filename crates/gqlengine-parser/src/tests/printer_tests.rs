//! Tests for printing executable documents.

use crate::ast;
use crate::parse_executable;
use crate::printer::print_document;

fn reprint(source: &str) -> String {
    let doc = parse_executable(source).into_valid_ast().unwrap();
    print_document(&doc)
}

#[test]
fn shorthand_query() {
    assert_eq!(reprint("{a b{c}}"), "{\n  a\n  b {\n    c\n  }\n}\n");
}

#[test]
fn anonymous_query_keyword_prints_as_shorthand() {
    assert_eq!(reprint("query { a }"), "{\n  a\n}\n");
}

#[test]
fn named_operation_with_variables() {
    assert_eq!(
        reprint("query Q($id: ID!, $n: Int = 3) @live { user(id: $id, first: $n) { name } }"),
        "query Q($id: ID!, $n: Int = 3) @live {\n  user(id: $id, first: $n) {\n    name\n  }\n}\n",
    );
}

#[test]
fn fragments_and_aliases() {
    assert_eq!(
        reprint(
            "{ me: user { ...F ... on Admin @include(if: true) { level } ... { x } } } \
             fragment F on User { id }",
        ),
        "{\n  me: user {\n    ...F\n    ... on Admin @include(if: true) {\n      level\n    }\n    \
         ... {\n      x\n    }\n  }\n}\n\nfragment F on User {\n  id\n}\n",
    );
}

#[test]
fn value_literals() {
    assert_eq!(
        reprint(r#"{ f(a: [1, -2.5, "q\"\n", true, null, RED], o: {x: {y: $v}}) }"#),
        "{\n  f(a: [1, -2.5, \"q\\\"\\n\", true, null, RED], o: {x: {y: $v}})\n}\n",
    );
}

#[test]
fn whole_floats_keep_their_fraction() {
    let mut out = String::new();
    crate::printer::print_value(&mut out, &ast::Value::Float(3.0));
    assert_eq!(out, "3.0");
    assert_eq!(ast::Value::Float(1e21).to_string(), "1e21");
}

#[test]
fn control_characters_are_escaped() {
    assert_eq!(
        ast::Value::String("tab\there\u{1}".to_string()).to_string(),
        "\"tab\\there\\u0001\"",
    );
}

#[test]
fn document_display_matches_print_document() {
    let doc = parse_executable("mutation { like(id: 1) }").into_valid_ast().unwrap();
    assert_eq!(doc.to_string(), print_document(&doc));
    assert_eq!(doc.to_string(), "mutation {\n  like(id: 1)\n}\n");
}
