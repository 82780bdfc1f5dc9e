use crate::context::ExecutionContext;
use crate::execution::Executor;
use crate::execution::ExecutorConfig;
use crate::execution::Request;
use crate::operation::FragmentTable;
use crate::parser::ast;
use crate::parser::parse_executable;
use crate::parser::printer;
use crate::resolver::SyncResolver;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::validation::validate;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;

const SCHEMA: &str = r#"
type Query {
  books(first: Int, filter: BookFilter): [Book!]!
  greeting(name: String = "world"): String!
}

input BookFilter {
  titlePrefix: String
  tags: [String!]
}

type Book {
  title: String!
  year: Int
}
"#;

const VALID_DOCUMENTS: &[&str] = &[
    r#"
    query Books($n: Int = 2, $prefix: String) {
      books(first: $n, filter: {titlePrefix: $prefix, tags: ["a", "b\"c"]}) {
        ...BookFields
        t: title
      }
      hello: greeting(name: "line\nbreak é")
    }
    fragment BookFields on Book { title year @include(if: true) }
    "#,
    "{ greeting books { ... on Book { title } ... @skip(if: false) { year } } }",
    r#"query { books(filter: {titlePrefix: "The"}) { title } }"#,
];

const INVALID_DOCUMENTS: &[&str] = &[
    "{ books { missing } }",
    "{ a: greeting a: books { title } }",
    "query ($x: Int) { greeting(name: $y) }",
    "{ books { ...Missing } }",
    "{ books(first: \"two\") { title } greeting { length } }",
    "query Twice { greeting } query Twice { books { title } }",
];

fn setup_schema() -> Schema {
    SchemaBuilder::from_str(SCHEMA)
        .unwrap()
        .resolver("Query", "greeting", SyncResolver::new(|_, args, _| {
            let name: String = args.get_as("name")?;
            Ok(format!("Hello, {name}!"))
        }))
        .resolver("Query", "books", SyncResolver::new(|_, args, _| {
            let prefix = args.get("filter")
                .and_then(|filter| filter.get("titlePrefix"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let first = args.get("first")
                .and_then(Value::as_u64)
                .unwrap_or(u64::MAX) as usize;
            let books: Vec<Value> = [
                ("The Hobbit", 1937),
                ("Dune", 1965),
                ("The Road", 2006),
            ]
                .into_iter()
                .filter(|(title, _)| title.starts_with(&prefix))
                .take(first)
                .map(|(title, year)| json!({"title": title, "year": year}))
                .collect();
            Ok(Value::Array(books))
        }))
        .build()
        .unwrap()
}

fn reprint(source: &str) -> String {
    let document = parse_executable(source).into_valid_ast().unwrap();
    printer::print_document(&document)
}

fn validation_messages(document: &ast::Document, schema: &Schema) -> Vec<String> {
    let fragments = FragmentTable::from_document(document);
    validate(document, &fragments, schema)
        .iter()
        .map(ToString::to_string)
        .collect()
}

async fn execute_json(executor: &Executor, source: &str) -> Value {
    let mut variables = Map::new();
    variables.insert("prefix".to_string(), json!("The"));
    let request = Request::new(source).with_variables(variables);
    executor.execute(&request, &ExecutionContext::default()).await.to_json()
}

fn executor() -> Executor {
    // Printing reflows the source, so positions cannot match.
    let config = ExecutorConfig {
        include_error_locations: false,
        ..ExecutorConfig::default()
    };
    Executor::with_config(Arc::new(setup_schema()), config)
}

#[test]
fn reprinted_documents_validate_the_same() {
    let schema = setup_schema();
    for source in VALID_DOCUMENTS.iter().chain(INVALID_DOCUMENTS) {
        let original = parse_executable(source).into_valid_ast().unwrap();
        let printed = reprint(source);
        let reparsed = parse_executable(&printed).into_valid_ast().unwrap();

        let expected = validation_messages(&original, &schema);
        assert_eq!(
            validation_messages(&reparsed, &schema),
            expected,
            "reprinted:\n{printed}",
        );
        assert_eq!(
            expected.is_empty(),
            VALID_DOCUMENTS.contains(source),
            "{source}: {expected:?}",
        );
    }
}

#[test]
fn printing_is_stable_after_one_pass() {
    for source in VALID_DOCUMENTS.iter().chain(INVALID_DOCUMENTS) {
        let printed = reprint(source);
        assert_eq!(reprint(&printed), printed);
    }
}

#[tokio::test]
async fn reprinted_documents_execute_the_same() {
    let executor = executor();
    for source in VALID_DOCUMENTS.iter().chain(INVALID_DOCUMENTS) {
        let printed = reprint(source);
        assert_eq!(
            execute_json(&executor, &printed).await,
            execute_json(&executor, source).await,
            "reprinted:\n{printed}",
        );
    }
}

#[tokio::test]
async fn reprinted_arguments_reach_resolvers_unchanged() {
    let executor = executor();
    let printed = reprint(VALID_DOCUMENTS[0]);

    assert_eq!(execute_json(&executor, &printed).await, json!({
        "data": {
            "books": [
                {"title": "The Hobbit", "year": 1937, "t": "The Hobbit"},
                {"title": "The Road", "year": 2006, "t": "The Road"},
            ],
            "hello": "Hello, line\nbreak \u{e9}!",
        },
    }));
}
