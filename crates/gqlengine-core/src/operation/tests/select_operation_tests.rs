use crate::operation::OperationSelectionError;
use crate::operation::select_operation;
use gqlengine_parser::ast;
use gqlengine_parser::parse_executable;

fn parse(source: &str) -> ast::Document {
    parse_executable(source).into_valid_ast().unwrap()
}

#[test]
fn single_operation_needs_no_name() {
    let document = parse("query Ping { ping }");
    let op = select_operation(&document, None).unwrap();
    assert_eq!(op.name.as_deref(), Some("Ping"));
}

#[test]
fn anonymous_shorthand_is_selected() {
    let document = parse("{ ping }");
    let op = select_operation(&document, None).unwrap();
    assert_eq!(op.kind, ast::OperationKind::Query);
    assert!(op.name.is_none());
}

#[test]
fn named_operation_is_selected_from_many() {
    let document = parse("query A { a } mutation B { b }");
    let op = select_operation(&document, Some("B")).unwrap();
    assert_eq!(op.kind, ast::OperationKind::Mutation);
}

#[test]
fn many_operations_require_a_name() {
    let document = parse("query A { a } query B { b }");
    assert_eq!(
        select_operation(&document, None).unwrap_err(),
        OperationSelectionError::NameRequired,
    );
}

#[test]
fn unknown_name_is_not_found() {
    let document = parse("query A { a }");
    assert_eq!(
        select_operation(&document, Some("C")).unwrap_err(),
        OperationSelectionError::NotFound { name: "C".to_string() },
    );
}

#[test]
fn fragment_only_document_has_no_operations() {
    let document = parse("fragment F on User { id }");
    assert_eq!(
        select_operation(&document, None).unwrap_err(),
        OperationSelectionError::NoOperations,
    );
}
