use crate::context::ExecutionContext;
use crate::execution::Executor;
use crate::execution::Request;
use crate::execution::Response;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use serde_json::Value;
use std::sync::Arc;

pub(super) const SCHEMA_SDL: &str = r#"
    type Query {
      user(id: ID!): User
      users: [User!]!
      posts: [Post!]!
      node(id: ID!): Node
      search(term: String!): [SearchResult!]!
      greet(name: String = "world", times: Int): String
      echo(input: EchoInput!): String
      count: Int
      ratio: Float
      role: Role
      scores: [Int!]
      slow: String
      fast: String
      failing: String
      required: String!
    }

    type Mutation {
      increment(by: Int!): Int!
    }

    interface Node {
      id: ID!
    }

    type User implements Node {
      id: ID!
      name: String!
      role: Role
      friends: [User!]
    }

    type Post implements Node {
      id: ID!
      title: String
      author: User
    }

    union SearchResult = User | Post

    enum Role { ADMIN MEMBER }

    input EchoInput {
      text: String!
      repeat: Int = 1
    }
"#;

pub(super) fn schema_builder() -> SchemaBuilder {
    SchemaBuilder::from_str(SCHEMA_SDL).unwrap()
}

pub(super) fn executor(schema: Schema) -> Executor {
    Executor::new(Arc::new(schema))
}

pub(super) async fn run(schema: Schema, query: &str) -> Response {
    executor(schema)
        .execute(&Request::new(query), &ExecutionContext::default())
        .await
}

pub(super) async fn run_json(schema: Schema, query: &str) -> Value {
    run(schema, query).await.to_json()
}

/// The `extensions.code` of every error, in order.
pub(super) fn error_codes(response: &Response) -> Vec<&str> {
    response.errors.iter().filter_map(|err| err.code()).collect()
}
