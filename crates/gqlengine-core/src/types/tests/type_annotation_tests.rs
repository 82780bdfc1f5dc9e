use crate::types::TypeAnnotation;
use gqlengine_parser::ast;

fn parse_type(text: &str) -> TypeAnnotation {
    let source = format!("query($v: {text}) {{ a }}");
    let doc = gqlengine_parser::parse_executable(&source)
        .into_valid_ast()
        .unwrap();
    let op = doc.operations().next().unwrap();
    TypeAnnotation::from_ast_type(&op.variable_definitions[0].var_type)
}

#[test]
fn from_ast_folds_non_null_into_nullable_flag() {
    let annot = parse_type("[Int!]!");
    assert!(!annot.nullable());
    let list = annot.as_list_annotation().unwrap();
    let inner = list.inner_type().as_named_annotation().unwrap();
    assert_eq!(inner.type_name(), "Int");
    assert!(!inner.nullable());
}

#[test]
fn display_matches_source_syntax() {
    for text in ["Int", "Int!", "[Int]", "[Int!]", "[[String]!]!"] {
        assert_eq!(parse_type(text).to_string(), text);
    }
}

#[test]
fn innermost_type_name_unwraps_lists() {
    assert_eq!(parse_type("[[ID!]]").innermost_type_name(), "ID");
}

#[test]
fn from_ast_type_named() {
    let annot = TypeAnnotation::from_ast_type(&ast::Type::Named("User".to_string()));
    assert_eq!(annot, TypeAnnotation::named("User", true));
}

#[test]
fn covariance_allows_narrower_nullability_and_subtypes() {
    let is_subtype = |sub: &str, sup: &str| sub == "User" && sup == "Node";

    assert!(parse_type("User!").is_covariant_with(&parse_type("Node"), &is_subtype));
    assert!(parse_type("[User!]!").is_covariant_with(&parse_type("[Node]"), &is_subtype));
    assert!(!parse_type("User").is_covariant_with(&parse_type("Node!"), &is_subtype));
    assert!(!parse_type("Node").is_covariant_with(&parse_type("User"), &is_subtype));
    assert!(!parse_type("[User]").is_covariant_with(&parse_type("User"), &is_subtype));
}

#[test]
fn variable_flow_requires_non_null_unless_defaulted() {
    let nullable_var = parse_type("Int");
    let non_null_loc = parse_type("Int!");

    assert!(!nullable_var.can_flow_into(&non_null_loc, false, false));
    assert!(nullable_var.can_flow_into(&non_null_loc, true, false));
    assert!(nullable_var.can_flow_into(&non_null_loc, false, true));
    assert!(parse_type("Int!").can_flow_into(&parse_type("Int"), false, false));
}

#[test]
fn variable_flow_checks_list_shape_and_names() {
    assert!(parse_type("[Int!]").can_flow_into(&parse_type("[Int]"), false, false));
    assert!(!parse_type("[Int]").can_flow_into(&parse_type("[Int!]"), false, false));
    assert!(!parse_type("Int").can_flow_into(&parse_type("[Int]"), false, false));
    assert!(!parse_type("String").can_flow_into(&parse_type("ID"), false, false));
}
