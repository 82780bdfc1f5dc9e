use crate::context::ExecutionContext;
use crate::execution::ExecutorConfig;
use crate::execution::Executor;
use crate::execution::PathSegment;
use crate::execution::Request;
use crate::execution::tests::utils::error_codes;
use crate::execution::tests::utils::executor;
use crate::execution::tests::utils::run;
use crate::execution::tests::utils::run_json;
use crate::execution::tests::utils::schema_builder;
use crate::resolver::AsyncResolver;
use crate::resolver::FieldError;
use crate::resolver::PropertyResolver;
use crate::resolver::SyncResolver;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn siblings_resolve_concurrently_in_selection_order() {
    let schema = schema_builder()
        .resolver("Query", "slow", AsyncResolver::new(|_, _, _| async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok("slow")
        }))
        .resolver("Query", "fast", AsyncResolver::new(|_, _, _| async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok("fast")
        }))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let response = run(schema, "{ slow fast }").await;
    let elapsed = started.elapsed();

    let data = response.data.unwrap();
    let keys: Vec<&String> = data.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["slow", "fast"]);
    assert_eq!(data, json!({"slow": "slow", "fast": "fast"}));
    assert!(elapsed < Duration::from_millis(55), "took {elapsed:?}");
}

#[tokio::test]
async fn response_keys_follow_selection_order() {
    let schema = schema_builder()
        .resolver("Query", "user", SyncResolver::new(|_, _, _| {
            Ok(json!({"name": "Ada", "id": "1", "role": "ADMIN"}))
        }))
        .build()
        .unwrap();

    let response = run(schema, r#"{ user(id: "1") { role name id } count }"#).await;

    let data = response.data.unwrap();
    let user_keys: Vec<&String> = data["user"].as_object().unwrap().keys().collect();
    assert_eq!(user_keys, ["role", "name", "id"]);
    let root_keys: Vec<&String> = data.as_object().unwrap().keys().collect();
    assert_eq!(root_keys, ["user", "count"]);
}

#[tokio::test]
async fn same_response_key_merges_and_resolves_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let schema = schema_builder()
        .resolver("Query", "user", SyncResolver::new(move |_, _, _| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"id": "1", "name": "Ada"}))
        }))
        .build()
        .unwrap();

    let data = run_json(schema, r#"{ user(id: "1") { name } user(id: "1") { id } }"#).await;

    assert_eq!(data, json!({"data": {"user": {"name": "Ada", "id": "1"}}}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn aliases_resolve_separately() {
    let schema = schema_builder()
        .resolver("Query", "greet", SyncResolver::new(|_, args, _| {
            let name: String = args.get_as("name")?;
            Ok(format!("hello {name}"))
        }))
        .build()
        .unwrap();

    let data = run_json(schema, r#"{ a: greet(name: "Ada") b: greet greet }"#).await;

    assert_eq!(
        data,
        json!({"data": {"a": "hello Ada", "b": "hello world", "greet": "hello world"}}),
    );
}

#[tokio::test]
async fn typename_resolves_without_a_resolver() {
    let schema = schema_builder()
        .resolver("Query", "user", SyncResolver::new(|_, _, _| Ok(json!({"id": "1"}))))
        .build()
        .unwrap();

    let data = run_json(schema, r#"{ __typename user(id: "1") { __typename id } }"#).await;

    assert_eq!(
        data,
        json!({"data": {"__typename": "Query", "user": {"__typename": "User", "id": "1"}}}),
    );
}

#[tokio::test]
async fn unbound_fields_read_parent_properties() {
    let schema = schema_builder().build().unwrap();
    let ctx = ExecutionContext::builder()
        .root_value(json!({"count": 3, "role": "MEMBER", "fast": "yes"}))
        .build();

    let response = executor(schema)
        .execute(&Request::new("{ count role fast slow }"), &ctx)
        .await;

    assert_eq!(
        response.to_json(),
        json!({"data": {"count": 3, "role": "MEMBER", "fast": "yes", "slow": null}}),
    );
}

#[tokio::test]
async fn property_resolver_maps_to_other_key() {
    let schema = schema_builder()
        .resolver("User", "name", PropertyResolver::new("displayName"))
        .resolver("Query", "user", SyncResolver::new(|_, _, _| {
            Ok(json!({"id": "1", "displayName": "Ada"}))
        }))
        .build()
        .unwrap();

    let data = run_json(schema, r#"{ user(id: "1") { name } }"#).await;

    assert_eq!(data, json!({"data": {"user": {"name": "Ada"}}}));
}

#[tokio::test]
async fn resolver_error_is_scoped_to_its_field() {
    let schema = schema_builder()
        .resolver("Query", "failing", SyncResolver::new(|_, _, _| {
            Err::<Value, _>(FieldError::new("backend unavailable").with_extension("retryable", true))
        }))
        .resolver("Query", "fast", SyncResolver::new(|_, _, _| Ok("ok")))
        .build()
        .unwrap();

    let response = run(schema, "{ failing fast }").await;

    assert_eq!(response.data, Some(json!({"failing": null, "fast": "ok"})));
    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert_eq!(error.message, "backend unavailable");
    assert_eq!(error.path, Some(vec![PathSegment::from("failing")]));
    assert_eq!(error.code(), Some("RESOLVER_ERROR"));
    assert_eq!(error.extensions.as_ref().unwrap()["retryable"], json!(true));
    assert_eq!(error.locations.len(), 1);
    assert_eq!((error.locations[0].line, error.locations[0].column), (1, 3));
}

#[tokio::test]
async fn resolver_code_overrides_default() {
    let schema = schema_builder()
        .resolver("Query", "failing", SyncResolver::new(|_, _, _| {
            Err::<Value, _>(FieldError::new("nope").with_code("FORBIDDEN"))
        }))
        .build()
        .unwrap();

    let response = run(schema, "{ failing }").await;

    assert_eq!(error_codes(&response), ["FORBIDDEN"]);
}

#[tokio::test]
async fn invalid_leaf_values_are_field_errors() {
    let schema = schema_builder()
        .resolver("Query", "count", SyncResolver::new(|_, _, _| Ok("three")))
        .resolver("Query", "role", SyncResolver::new(|_, _, _| Ok("OWNER")))
        .resolver("Query", "ratio", SyncResolver::new(|_, _, _| Ok(2)))
        .resolver("Query", "greet", SyncResolver::new(|_, _, _| Ok(json!(5_000_000_000_i64))))
        .build()
        .unwrap();

    let response = run(schema, "{ count role ratio greet }").await;

    assert_eq!(
        response.data,
        Some(json!({"count": null, "role": null, "ratio": 2.0, "greet": null})),
    );
    assert_eq!(error_codes(&response), ["RESOLVER_ERROR", "RESOLVER_ERROR", "RESOLVER_ERROR"]);
}

#[tokio::test]
async fn int_must_fit_in_32_bits() {
    let schema = schema_builder()
        .resolver("Query", "count", SyncResolver::new(|_, _, _| Ok(json!(i64::from(i32::MAX) + 1))))
        .build()
        .unwrap();

    let response = run(schema, "{ count }").await;

    assert_eq!(response.data, Some(json!({"count": null})));
    assert!(response.errors[0].message.contains("Query.count"));
}

#[tokio::test]
async fn id_serializes_integers_as_strings() {
    let schema = schema_builder()
        .resolver("Query", "user", SyncResolver::new(|_, _, _| Ok(json!({"id": 42}))))
        .build()
        .unwrap();

    let data = run_json(schema, r#"{ user(id: 1) { id } }"#).await;

    assert_eq!(data, json!({"data": {"user": {"id": "42"}}}));
}

#[tokio::test]
async fn skip_and_include_use_bound_variables() {
    let schema = schema_builder().build().unwrap();
    let ctx = ExecutionContext::builder()
        .root_value(json!({"count": 1, "fast": "f", "slow": "s"}))
        .build();
    let request = Request::new(
        "query ($show: Boolean!) { count @include(if: $show) fast @skip(if: $show) slow @skip(if: false) }",
    ).with_variables(json!({"show": false}).as_object().unwrap().clone());

    let response = executor(schema).execute(&request, &ctx).await;

    assert_eq!(response.to_json(), json!({"data": {"fast": "f", "slow": "s"}}));
}

#[tokio::test]
async fn skipped_fragments_are_omitted() {
    let schema = schema_builder().build().unwrap();
    let ctx = ExecutionContext::builder()
        .root_value(json!({"count": 1, "fast": "f"}))
        .build();
    let request = Request::new(
        "{ ...Counted @skip(if: true) ... @include(if: true) { fast } } fragment Counted on Query { count }",
    );

    let response = executor(schema).execute(&request, &ctx).await;

    assert_eq!(response.to_json(), json!({"data": {"fast": "f"}}));
}

#[tokio::test]
async fn arguments_are_coerced_with_defaults_and_variables() {
    let schema = schema_builder()
        .resolver("Query", "echo", SyncResolver::new(|_, args, _| {
            let input = args.get("input").cloned().unwrap_or(Value::Null);
            let text = input["text"].as_str().unwrap_or_default().to_string();
            let repeat = input["repeat"].as_u64().unwrap_or_default() as usize;
            Ok(text.repeat(repeat))
        }))
        .build()
        .unwrap();
    let request = Request::new(
        r#"query ($text: String!) { once: echo(input: {text: $text}) twice: echo(input: {text: "ab", repeat: 2}) }"#,
    ).with_variables(json!({"text": "hi"}).as_object().unwrap().clone());

    let response = executor(schema).execute(&request, &ExecutionContext::default()).await;

    assert_eq!(response.to_json(), json!({"data": {"once": "hi", "twice": "abab"}}));
}

#[tokio::test]
async fn unbound_optional_variable_falls_back_to_argument_default() {
    let schema = schema_builder()
        .resolver("Query", "greet", SyncResolver::new(|_, args, _| {
            let name: String = args.get_as("name")?;
            Ok(format!("hello {name}"))
        }))
        .build()
        .unwrap();
    let request = Request::new("query ($who: String) { greet(name: $who) }");

    let response = executor(schema).execute(&request, &ExecutionContext::default()).await;

    assert_eq!(response.to_json(), json!({"data": {"greet": "hello world"}}));
}

#[tokio::test(start_paused = true)]
async fn mutation_root_fields_run_serially() {
    let total = Arc::new(Mutex::new(0_i64));
    let order = Arc::new(Mutex::new(Vec::new()));
    let (shared_total, shared_order) = (Arc::clone(&total), Arc::clone(&order));
    let schema = schema_builder()
        .resolver("Mutation", "increment", AsyncResolver::new(move |_, args, _| {
            let by = args.get("by").and_then(Value::as_i64).unwrap_or_default();
            let total = Arc::clone(&shared_total);
            let order = Arc::clone(&shared_order);
            async move {
                // Later fields sleep less; only serial execution keeps request order.
                tokio::time::sleep(Duration::from_millis(30 / by as u64)).await;
                order.lock().unwrap().push(by);
                let mut total = total.lock().unwrap();
                *total += by;
                Ok(*total)
            }
        }))
        .build()
        .unwrap();

    let data = run_json(schema, "mutation { a: increment(by: 1) b: increment(by: 2) c: increment(by: 3) }").await;

    assert_eq!(data, json!({"data": {"a": 1, "b": 3, "c": 6}}));
    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn parallel_mutations_when_serial_execution_is_disabled() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let shared_order = Arc::clone(&order);
    let schema = schema_builder()
        .resolver("Mutation", "increment", AsyncResolver::new(move |_, args, _| {
            let by = args.get("by").and_then(Value::as_i64).unwrap_or_default();
            let order = Arc::clone(&shared_order);
            async move {
                tokio::time::sleep(Duration::from_millis(30 / by as u64)).await;
                order.lock().unwrap().push(by);
                Ok(by)
            }
        }))
        .build()
        .unwrap();
    let config = ExecutorConfig {
        serial_mutations: false,
        ..ExecutorConfig::default()
    };

    let response = Executor::with_config(Arc::new(schema), config)
        .execute(
            &Request::new("mutation { a: increment(by: 1) b: increment(by: 3) }"),
            &ExecutionContext::default(),
        )
        .await;

    assert_eq!(response.to_json(), json!({"data": {"a": 1, "b": 3}}));
    assert_eq!(*order.lock().unwrap(), vec![3, 1]);
}

#[tokio::test]
async fn cancelled_context_stops_resolver_dispatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let schema = schema_builder()
        .resolver("Query", "fast", SyncResolver::new(move |_, _, _| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok("fast")
        }))
        .build()
        .unwrap();
    let ctx = ExecutionContext::default();
    ctx.cancel();

    let response = executor(schema).execute(&Request::new("{ fast }"), &ctx).await;

    assert_eq!(response.data, Some(json!({"fast": null})));
    assert_eq!(error_codes(&response), ["CANCELLED"]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn error_locations_can_be_disabled() {
    let schema = schema_builder()
        .resolver("Query", "failing", SyncResolver::new(|_, _, _| Err::<Value, _>(FieldError::new("no"))))
        .build()
        .unwrap();
    let config = ExecutorConfig {
        include_error_locations: false,
        ..ExecutorConfig::default()
    };

    let response = Executor::with_config(Arc::new(schema), config)
        .execute(&Request::new("{ failing }"), &ExecutionContext::default())
        .await;

    assert!(response.errors[0].locations.is_empty());
}

#[tokio::test]
async fn resolvers_see_coerced_variables_in_context() {
    let schema = schema_builder()
        .resolver("Query", "fast", SyncResolver::new(|_, _, ctx| {
            Ok(ctx.variable("limit").map(ToString::to_string))
        }))
        .build()
        .unwrap();
    let request = Request::new("query ($limit: Int = 10) { fast }");

    let response = executor(schema).execute(&request, &ExecutionContext::default()).await;

    assert_eq!(response.to_json(), json!({"data": {"fast": "10"}}));
}
