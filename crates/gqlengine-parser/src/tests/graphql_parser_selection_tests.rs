//! Tests for fields, aliases, arguments and fragments inside selection sets.

use crate::ast;
use crate::tests::utils::single_operation;
use crate::tests::utils::top_fields;

#[test]
fn field_alias() {
    let op = single_operation("{ smallPic: profilePic(size: 64) }");
    let field = top_fields(&op)[0];
    assert_eq!(field.alias.as_deref(), Some("smallPic"));
    assert_eq!(field.name, "profilePic");
    assert_eq!(field.response_key(), "smallPic");
}

#[test]
fn response_key_defaults_to_name() {
    let op = single_operation("{ name }");
    assert_eq!(top_fields(&op)[0].response_key(), "name");
}

#[test]
fn leaf_field_has_no_selection_set() {
    let op = single_operation("{ name }");
    assert!(top_fields(&op)[0].selection_set.is_none());
}

#[test]
fn nested_selection_sets() {
    let op = single_operation("{ user { friends { name } } }");
    let user = top_fields(&op)[0];
    let friends = match &user.selection_set.as_ref().unwrap().items[0] {
        ast::Selection::Field(f) => f,
        other => panic!("expected field, got {other:?}"),
    };
    assert_eq!(friends.name, "friends");
    assert_eq!(friends.selection_set.as_ref().unwrap().items.len(), 1);
}

#[test]
fn field_arguments_in_order() {
    let op = single_operation("{ search(text: \"x\", first: 5, after: $cursor) }");
    let field = top_fields(&op)[0];
    let names: Vec<_> = field.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["text", "first", "after"]);
    assert_eq!(
        field.argument("after").map(|a| &a.value),
        Some(&ast::Value::Variable("cursor".to_string())),
    );
}

#[test]
fn field_directives() {
    let op = single_operation("{ a @include(if: $show) @skip(if: false) }");
    let field = top_fields(&op)[0];
    let names: Vec<_> = field.directives.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["include", "skip"]);
}

#[test]
fn fragment_spread_is_name_reference() {
    let op = single_operation("{ user { ...UserFields @skip(if: true) } }");
    let user = top_fields(&op)[0];
    match &user.selection_set.as_ref().unwrap().items[0] {
        ast::Selection::FragmentSpread(spread) => {
            assert_eq!(spread.fragment_name, "UserFields");
            assert_eq!(spread.directives.len(), 1);
        },
        other => panic!("expected fragment spread, got {other:?}"),
    }
}

#[test]
fn inline_fragment_with_type_condition() {
    let op = single_operation("{ node { ... on User { name } ... on Post { title } } }");
    let node = top_fields(&op)[0];
    let conditions: Vec<_> = node
        .selection_set
        .as_ref()
        .unwrap()
        .items
        .iter()
        .map(|sel| match sel {
            ast::Selection::InlineFragment(inline) => inline.type_condition.clone(),
            other => panic!("expected inline fragment, got {other:?}"),
        })
        .collect();
    assert_eq!(
        conditions,
        vec![Some("User".to_string()), Some("Post".to_string())],
    );
}

#[test]
fn inline_fragment_without_type_condition() {
    let op = single_operation("{ ... @include(if: $x) { a } }");
    match &op.selection_set.items[0] {
        ast::Selection::InlineFragment(inline) => {
            assert_eq!(inline.type_condition, None);
            assert_eq!(inline.directives[0].name, "include");
        },
        other => panic!("expected inline fragment, got {other:?}"),
    }
}

#[test]
fn keyword_names_are_valid_field_names() {
    let op = single_operation("{ type query fragment on true null }");
    let names: Vec<_> = top_fields(&op).iter().map(|f| f.name.clone()).collect();
    assert_eq!(names, vec!["type", "query", "fragment", "on", "true", "null"]);
}

#[test]
fn deep_selection_nesting_is_allowed() {
    let depth = 40;
    let source = format!("{}{}", "{ a ".repeat(depth), "}".repeat(depth));
    let result = crate::parse_executable(&source);
    assert!(result.is_ok(), "{}", result.format_errors(Some(&source)));
}

#[test]
fn excessive_selection_nesting_is_an_error() {
    let depth = 100;
    let source = format!("{}{}", "{ a ".repeat(depth), "}".repeat(depth));
    let result = crate::parse_executable(&source);
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.message().contains("maximum nesting depth")),
    );
}
