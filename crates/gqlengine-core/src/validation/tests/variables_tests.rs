use crate::validation::ValidationError;
use crate::validation::tests::utils::validate_str;

#[test]
fn declared_variables_of_matching_type_are_valid() {
    let errors = validate_str(r#"
        query ($id: ID!, $ids: [ID!]!, $filter: SearchFilter, $limit: Int!) {
          user(id: $id) { id }
          users(ids: $ids, limit: $limit) { id }
          search(term: "x", filter: $filter) { __typename }
        }
    "#);
    assert_eq!(errors, vec![]);
}

#[test]
fn undefined_variable() {
    let errors = validate_str("query Q { user(id: $id) { id } }");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::UndefinedVariable { variable_name, operation_name: Some(op), .. }
            if variable_name == "id" && op == "Q",
    ));
}

#[test]
fn variables_are_checked_inside_fragments_per_operation() {
    let errors = validate_str(r#"
        query A($id: ID!) { ...UserById }
        query B { ...UserById }
        fragment UserById on Query { user(id: $id) { id } }
    "#);
    assert!(matches!(
        &errors[..],
        [ValidationError::UndefinedVariable { operation_name: Some(op), .. }] if op == "B",
    ));
}

#[test]
fn nullable_variable_cannot_fill_non_null_argument() {
    let errors = validate_str("query ($id: ID) { user(id: $id) { id } }");
    assert!(matches!(
        &errors[..],
        [ValidationError::VariableTypeMismatch { variable_type, expected_type, .. }]
            if variable_type == "ID" && expected_type == "ID!",
    ));
}

#[test]
fn variable_default_relaxes_non_null_location() {
    assert_eq!(validate_str(r#"query ($id: ID = "1") { user(id: $id) { id } }"#), vec![]);
}

#[test]
fn location_default_relaxes_non_null_location() {
    assert_eq!(validate_str("query ($limit: Int) { users(ids: [1], limit: $limit) { id } }"), vec![]);
}

#[test]
fn variables_nested_in_literals_use_the_nested_type() {
    let errors = validate_str(r#"
        query ($limit: String) {
          search(term: "x", filter: { limit: $limit }) { __typename }
        }
    "#);
    assert!(matches!(
        &errors[..],
        [ValidationError::VariableTypeMismatch { expected_type, .. }] if expected_type == "Int!",
    ));
}

#[test]
fn variable_types_must_be_input_types() {
    let errors = validate_str("query ($u: User) { count }");
    assert!(matches!(
        &errors[..],
        [ValidationError::NonInputVariableType { variable_name, .. }] if variable_name == "u",
    ));

    let errors = validate_str("query ($u: Unknown) { count }");
    assert!(matches!(
        &errors[..],
        [ValidationError::UnknownType { type_name, .. }] if type_name == "Unknown",
    ));
}

#[test]
fn duplicate_variable_names() {
    let errors = validate_str("query ($a: Int, $a: Int) { count }");
    assert!(matches!(
        &errors[..],
        [ValidationError::DuplicateVariableName { variable_name, .. }] if variable_name == "a",
    ));
}

#[test]
fn invalid_variable_default() {
    let errors = validate_str(r#"query ($limit: Int = "ten") { count }"#);
    assert!(matches!(
        &errors[..],
        [ValidationError::InvalidVariableDefaultValue { variable_name, .. }] if variable_name == "limit",
    ));
}
