use crate::execution::tests::utils::error_codes;
use crate::execution::tests::utils::run;
use crate::execution::tests::utils::run_json;
use crate::execution::tests::utils::schema_builder;
use crate::resolver::ResolvedValue;
use crate::resolver::SyncResolver;
use serde_json::json;

const SEARCH_QUERY: &str = r#"
    {
      search(term: "a") {
        __typename
        ... on User { name }
        ... on Post { title }
      }
    }
"#;

#[tokio::test]
async fn union_members_complete_by_type_tag() {
    let schema = schema_builder()
        .resolver("Query", "search", SyncResolver::new(|_, _, _| {
            Ok(vec![
                ResolvedValue::typed_object("User", json!({"id": "1", "name": "Ada"})),
                ResolvedValue::from(json!({"__typename": "Post", "id": "2", "title": "Notes"})),
            ])
        }))
        .build()
        .unwrap();

    let data = run_json(schema, SEARCH_QUERY).await;

    assert_eq!(
        data,
        json!({"data": {"search": [
            {"__typename": "User", "name": "Ada"},
            {"__typename": "Post", "title": "Notes"},
        ]}}),
    );
}

#[tokio::test]
async fn interface_fields_and_named_fragments() {
    let schema = schema_builder()
        .resolver("Query", "node", SyncResolver::new(|_, _, _| {
            Ok(ResolvedValue::typed_object("Post", json!({"id": "9", "title": "Hi"})))
        }))
        .build()
        .unwrap();

    let data = run_json(
        schema,
        r#"{ node(id: "9") { id ...PostFields } } fragment PostFields on Post { title }"#,
    ).await;

    assert_eq!(data, json!({"data": {"node": {"id": "9", "title": "Hi"}}}));
}

#[tokio::test]
async fn missing_type_tag_is_an_engine_inconsistency() {
    let schema = schema_builder()
        .resolver("Query", "node", SyncResolver::new(|_, _, _| Ok(json!({"id": "1"}))))
        .build()
        .unwrap();

    let response = run(schema, r#"{ node(id: "1") { id } }"#).await;

    assert_eq!(response.data, Some(json!({"node": null})));
    assert_eq!(error_codes(&response), ["ENGINE_INCONSISTENCY"]);
    assert!(response.errors[0].message.contains("no type tag"));
}

#[tokio::test]
async fn tag_outside_possible_types_is_an_engine_inconsistency() {
    let schema = schema_builder()
        .resolver("Query", "node", SyncResolver::new(|_, _, _| {
            Ok(ResolvedValue::typed_object("Role", json!({"id": "1"})))
        }))
        .build()
        .unwrap();

    let response = run(schema, r#"{ node(id: "1") { id } }"#).await;

    assert_eq!(response.data, Some(json!({"node": null})));
    assert_eq!(error_codes(&response), ["ENGINE_INCONSISTENCY"]);
}

#[tokio::test]
async fn tag_matching_no_selected_branch_is_an_engine_inconsistency() {
    let schema = schema_builder()
        .resolver("Query", "search", SyncResolver::new(|_, _, _| {
            Ok(vec![ResolvedValue::typed_object("Post", json!({"id": "2"}))])
        }))
        .build()
        .unwrap();

    let response = run(schema, r#"{ search(term: "a") { ... on User { name } } }"#).await;

    // `[SearchResult!]!` bubbles all the way to `data`.
    assert_eq!(response.data, Some(json!(null)));
    assert_eq!(error_codes(&response), ["ENGINE_INCONSISTENCY"]);
    assert!(response.errors[0].message.contains("matches none of the type conditions"));
}

#[tokio::test]
async fn matching_branch_with_skipped_fields_is_not_an_inconsistency() {
    let schema = schema_builder()
        .resolver("Query", "node", SyncResolver::new(|_, _, _| {
            Ok(ResolvedValue::typed_object("Post", json!({"id": "9", "title": "Hi"})))
        }))
        .build()
        .unwrap();

    let response = run(
        schema,
        r#"{ node(id: "9") { ... on Post { title @skip(if: true) } } }"#,
    ).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(response.data, Some(json!({"node": {}})));
}

#[tokio::test]
async fn plain_fields_beside_unmatched_branches_still_complete() {
    let schema = schema_builder()
        .resolver("Query", "node", SyncResolver::new(|_, _, _| {
            Ok(ResolvedValue::typed_object("User", json!({"id": "3", "name": "Ada"})))
        }))
        .build()
        .unwrap();

    let data = run_json(schema, r#"{ node(id: "3") { id ... on Post { title } } }"#).await;

    assert_eq!(data, json!({"data": {"node": {"id": "3"}}}));
}

#[tokio::test]
async fn concrete_object_fields_ignore_type_tags() {
    let schema = schema_builder()
        .resolver("Query", "user", SyncResolver::new(|_, _, _| {
            Ok(json!({"__typename": "Something", "id": "1"}))
        }))
        .build()
        .unwrap();

    let data = run_json(schema, r#"{ user(id: "1") { __typename id } }"#).await;

    assert_eq!(data, json!({"data": {"user": {"__typename": "User", "id": "1"}}}));
}
