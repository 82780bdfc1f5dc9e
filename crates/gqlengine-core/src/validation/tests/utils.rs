use crate::operation::FragmentTable;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::validation::ValidationError;
use crate::validation::validate;
use gqlengine_parser::parse_executable;

pub(super) const SCHEMA_SDL: &str = r#"
    type Query {
      user(id: ID!): User
      users(ids: [ID!]!, limit: Int = 10): [User!]!
      node(id: ID!): Node
      search(term: String!, filter: SearchFilter): [SearchResult!]!
      count(scale: Float): Int
      bot: Bot
    }

    type Mutation {
      rename(id: ID!, name: String!): User
    }

    interface Node {
      id: ID!
    }

    type User implements Node {
      id: ID!
      name: String!
      role: Role
      friends(first: Int): [User!]!
    }

    type Post implements Node {
      id: ID!
      title: String
      author: User
    }

    type Bot {
      handle: String
    }

    union SearchResult = User | Post

    enum Role { ADMIN MEMBER }

    input SearchFilter {
      role: Role
      limit: Int!
      tags: [String!]
    }

    directive @cached(ttl: Int!) on FIELD
"#;

pub(super) fn setup_schema() -> Schema {
    SchemaBuilder::from_str(SCHEMA_SDL)
        .and_then(SchemaBuilder::build)
        .unwrap()
}

pub(super) fn validate_str(source: &str) -> Vec<ValidationError> {
    let schema = setup_schema();
    let document = parse_executable(source).into_valid_ast().unwrap();
    let fragments = FragmentTable::from_document(&document);
    validate(&document, &fragments, &schema)
}
