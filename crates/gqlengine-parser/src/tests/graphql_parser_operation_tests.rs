//! Tests for parsing operations, variable definitions and fragments.

use crate::GraphQLParser;
use crate::ast;
use crate::parse_executable;
use crate::tests::utils::MockTokenSource;
use crate::tests::utils::mock_name_token;
use crate::tests::utils::mock_token;
use crate::tests::utils::single_operation;
use crate::token::GraphQLTokenKind;

#[test]
fn shorthand_is_anonymous_query() {
    let op = single_operation("{ hello }");
    assert_eq!(op.kind, ast::OperationKind::Query);
    assert_eq!(op.name, None);
    assert!(op.variable_definitions.is_empty());
    assert_eq!(op.selection_set.items.len(), 1);
}

#[test]
fn named_query() {
    let op = single_operation("query GetUser { user { name } }");
    assert_eq!(op.kind, ast::OperationKind::Query);
    assert_eq!(op.name.as_deref(), Some("GetUser"));
}

#[test]
fn anonymous_query_keyword() {
    let op = single_operation("query { a }");
    assert_eq!(op.kind, ast::OperationKind::Query);
    assert_eq!(op.name, None);
}

#[test]
fn mutation_and_subscription_kinds() {
    assert_eq!(
        single_operation("mutation M { like }").kind,
        ast::OperationKind::Mutation,
    );
    assert_eq!(
        single_operation("subscription S { ticks }").kind,
        ast::OperationKind::Subscription,
    );
}

#[test]
fn keyword_like_operation_name() {
    let op = single_operation("query query { a }");
    assert_eq!(op.name.as_deref(), Some("query"));
}

#[test]
fn variable_definitions_with_types_and_defaults() {
    let op = single_operation(
        "query Q($id: ID!, $limit: Int = 10, $tags: [String!]! = [\"a\"]) { a }",
    );
    let vars = &op.variable_definitions;
    assert_eq!(vars.len(), 3);

    assert_eq!(vars[0].name, "id");
    assert_eq!(vars[0].var_type.to_string(), "ID!");
    assert_eq!(vars[0].default_value, None);

    assert_eq!(vars[1].name, "limit");
    assert_eq!(vars[1].var_type, ast::Type::Named("Int".to_string()));
    assert_eq!(vars[1].default_value, Some(ast::Value::Int(10)));

    assert_eq!(vars[2].var_type.to_string(), "[String!]!");
    assert_eq!(
        vars[2].default_value,
        Some(ast::Value::List(vec![ast::Value::String("a".to_string())])),
    );
}

#[test]
fn operation_directives() {
    let op = single_operation("query Q @cached(ttl: 30) { a }");
    assert_eq!(op.directives.len(), 1);
    assert_eq!(op.directives[0].name, "cached");
    assert_eq!(
        op.directives[0].argument("ttl").map(|a| &a.value),
        Some(&ast::Value::Int(30)),
    );
}

#[test]
fn fragment_definition() {
    let doc = parse_executable(
        "query { user { ...UserFields } } fragment UserFields on User @x { id name }",
    )
    .into_valid_ast()
    .unwrap();

    let frag = doc.fragments().next().unwrap();
    assert_eq!(frag.name, "UserFields");
    assert_eq!(frag.type_condition, "User");
    assert_eq!(frag.directives.len(), 1);
    assert_eq!(frag.selection_set.items.len(), 2);
    assert_eq!(doc.operations().count(), 1);
}

#[test]
fn multiple_operations_keep_order() {
    let doc = parse_executable("query A { a } mutation B { b } { c }")
        .into_valid_ast()
        .unwrap();
    let names: Vec<_> = doc.operations().map(|op| op.name.clone()).collect();
    assert_eq!(
        names,
        vec![Some("A".to_string()), Some("B".to_string()), None],
    );
}

#[test]
fn commas_and_comments_are_insignificant() {
    let op = single_operation(
        "# leading comment\nquery Q($a: Int,, $b: Int) {\n  x(a: $a,, b: $b), # trailing\n  y\n}",
    );
    assert_eq!(op.variable_definitions.len(), 2);
    assert_eq!(op.selection_set.items.len(), 2);
}

#[test]
fn parser_accepts_custom_token_source() {
    let tokens = vec![
        mock_token(GraphQLTokenKind::CurlyBraceOpen),
        mock_name_token("hello"),
        mock_token(GraphQLTokenKind::CurlyBraceClose),
        mock_token(GraphQLTokenKind::Eof),
    ];
    let result =
        GraphQLParser::from_token_source(MockTokenSource::new(tokens)).parse_executable_document();
    let doc = result.into_valid_ast().unwrap();
    assert_eq!(doc.definitions.len(), 1);
}

#[test]
fn with_file_path_attaches_path_to_errors() {
    let path = std::path::Path::new("queries/broken.graphql");
    let result = GraphQLParser::with_file_path("{ a(: 1) }", path).parse_executable_document();
    assert!(result.has_errors());
    assert!(
        result.errors[0]
            .format_oneline()
            .starts_with("queries/broken.graphql:1:"),
    );
}
