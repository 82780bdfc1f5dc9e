use crate::validation::ValidationError;
use crate::validation::tests::utils::validate_str;
use gqlengine_parser::ast::Pos;

#[test]
fn valid_query_has_no_errors() {
    let errors = validate_str(r#"
        query {
          user(id: "1") { id name role friends(first: 2) { name } }
          users(ids: [1, "2"]) { id }
          count
        }
    "#);
    assert_eq!(errors, vec![]);
}

#[test]
fn unknown_field_is_reported_with_location() {
    let errors = validate_str("{ user(id: 1) { email } }");
    assert_eq!(errors, vec![ValidationError::UnknownField {
        field_name: "email".to_string(),
        type_name: "User".to_string(),
        location: Pos { line: 1, column: 17 },
    }]);
}

#[test]
fn typename_is_allowed_on_every_composite_type() {
    let errors = validate_str(r#"
        {
          __typename
          user(id: 1) { __typename }
          search(term: "x") { __typename }
        }
    "#);
    assert_eq!(errors, vec![]);
}

#[test]
fn typename_takes_no_selection_set() {
    let errors = validate_str("{ __typename { id } }");
    assert!(matches!(
        &errors[..],
        [ValidationError::SelectionSetOnLeafField { field_name, .. }] if field_name == "__typename",
    ));
}

#[test]
fn unions_have_no_fields_of_their_own() {
    let errors = validate_str(r#"{ search(term: "x") { id } }"#);
    assert!(matches!(
        &errors[..],
        [ValidationError::UnknownField { field_name, type_name, .. }]
            if field_name == "id" && type_name == "SearchResult",
    ));
}

#[test]
fn leaf_fields_reject_selection_sets() {
    let errors = validate_str("{ count { value } }");
    assert!(matches!(
        &errors[..],
        [ValidationError::SelectionSetOnLeafField { field_name, type_name, .. }]
            if field_name == "count" && type_name == "Int",
    ));
}

#[test]
fn composite_fields_require_selection_sets() {
    let errors = validate_str("{ user(id: 1) }");
    assert!(matches!(
        &errors[..],
        [ValidationError::MissingSelectionSet { field_name, type_name, .. }]
            if field_name == "user" && type_name == "User",
    ));
}

#[test]
fn interface_fields_are_queryable_on_the_interface() {
    let errors = validate_str("{ node(id: 1) { id name } }");
    assert!(matches!(
        &errors[..],
        [ValidationError::UnknownField { field_name, type_name, .. }]
            if field_name == "name" && type_name == "Node",
    ));
}

#[test]
fn errors_in_repeated_fragments_are_reported_once() {
    let errors = validate_str(r#"
        query A { user(id: 1) { ...Bad } }
        query B { user(id: 2) { ...Bad } }
        fragment Bad on User { missing }
    "#);
    assert_eq!(errors.len(), 1, "{errors:?}");
}

#[test]
fn aliasing_two_fields_to_one_key_conflicts() {
    let errors = validate_str("{ x: count x: bot { handle } }");
    assert_eq!(errors, vec![ValidationError::FieldsConflict {
        response_key: "x".to_string(),
        reason: "`count` and `bot` are different fields".to_string(),
        location1: Pos { line: 1, column: 3 },
        location2: Pos { line: 1, column: 12 },
    }]);
}

#[test]
fn same_field_with_differing_arguments_conflicts() {
    let errors = validate_str("{ user(id: 1) { id } user(id: 2) { name } }");
    assert!(matches!(
        &errors[..],
        [ValidationError::FieldsConflict { response_key, reason, .. }]
            if response_key == "user" && reason == "they have differing arguments",
    ));
}

#[test]
fn argument_order_does_not_matter_for_merging() {
    let errors = validate_str(r#"
        {
          users(ids: [1], limit: 2) { id }
          users(limit: 2, ids: [1]) { name }
        }
    "#);
    assert_eq!(errors, vec![]);
}

#[test]
fn conflicts_through_fragments_are_reported() {
    let errors = validate_str(r#"
        { user(id: 1) { ...Named name: role } }
        fragment Named on User { name }
    "#);
    assert!(matches!(
        &errors[..],
        [ValidationError::FieldsConflict { response_key, .. }] if response_key == "name",
    ));
}

#[test]
fn conflicts_inside_merged_subselections_are_reported() {
    let errors = validate_str(r#"
        {
          user(id: 1) { friends { n: name } }
          user(id: 1) { friends { n: id } }
        }
    "#);
    assert!(matches!(
        &errors[..],
        [ValidationError::FieldsConflict { response_key, reason, .. }]
            if response_key == "n" && reason == "`name` and `id` are different fields",
    ));
}

#[test]
fn exclusive_object_branches_may_reuse_a_key() {
    let errors = validate_str(r#"
        {
          node(id: 1) {
            ... on User { label: name }
            ... on Post { label: title }
          }
        }
    "#);
    assert_eq!(errors, vec![]);
}

#[test]
fn interface_field_and_object_branch_share_one_value() {
    let errors = validate_str(r#"
        { node(id: 1) { key: id ... on User { key: name } } }
    "#);
    assert!(matches!(
        &errors[..],
        [ValidationError::FieldsConflict { response_key, .. }] if response_key == "key",
    ));
}

#[test]
fn cyclic_fragments_do_not_loop_the_merge_check() {
    let errors = validate_str(r#"
        { user(id: 1) { ...Loop } }
        fragment Loop on User { friends { ...Loop } }
    "#);
    assert!(matches!(
        &errors[..],
        [ValidationError::CyclicFragment { .. }],
    ));
}
