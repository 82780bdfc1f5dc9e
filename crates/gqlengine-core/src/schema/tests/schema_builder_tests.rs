use crate::loc;
use crate::resolver::SyncResolver;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::TypeValidationError;
use crate::types::GraphQLType;
use gqlengine_parser::ast::OperationKind;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

mod build_operations {
    use super::*;

    #[test]
    fn build_all_operation_types_single_str() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, concat!(
                "type Mutation { noop: Boolean }\n",
                "type Query { ping: String }\n",
                "type Subscription { ticks: Int }",
            ))?
            .build()?;

        assert_eq!(schema.all_directives().len(), 4);
        assert_eq!(schema.all_types().len(), 8);
        assert_eq!(schema.query_type_name(), "Query");
        assert_eq!(schema.mutation_type_name(), Some("Mutation"));
        assert_eq!(schema.subscription_type_name(), Some("Subscription"));

        let query_type = schema.root_type(OperationKind::Query).unwrap();
        assert_eq!(query_type.def_location(), &loc::FilePosition {
            col: 1,
            file: PathBuf::from("str://0"),
            line: 2,
        });

        Ok(())
    }

    #[test]
    fn build_query_only() -> Result<()> {
        let schema = SchemaBuilder::from_str("type Query { ping: String }")?.build()?;

        assert!(schema.mutation_type_name().is_none());
        assert!(schema.subscription_type_name().is_none());
        assert!(schema.root_type(OperationKind::Mutation).is_none());
        assert_eq!(schema.all_types().len(), 6);
        Ok(())
    }

    #[test]
    fn schema_block_overrides_root_names() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "schema { query: RootQuery mutation: RootMutation }\n",
            "type RootQuery { ping: String }\n",
            "type RootMutation { noop: Boolean }\n",
        ))?.build()?;

        assert_eq!(schema.query_type_name(), "RootQuery");
        assert_eq!(schema.mutation_type_name(), Some("RootMutation"));
        Ok(())
    }

    #[test]
    fn missing_query_type_is_an_error() -> Result<()> {
        let result = SchemaBuilder::from_str("type Mutation { noop: Boolean }")?.build();
        assert_eq!(result.unwrap_err(), SchemaBuildError::NoQueryOperationTypeDefined);
        Ok(())
    }

    #[test]
    fn root_type_must_be_an_object() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "schema { query: Q }\n",
            "interface Q { ping: String }\n",
        ))?.build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::RootOperationTypeNotObject {
                operation: OperationKind::Query,
                ref type_name,
                ..
            }) if type_name == "Q",
        ));
        Ok(())
    }

    #[test]
    fn shared_root_types_are_rejected() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "schema { query: Root mutation: Root }\n",
            "type Root { ping: String }\n",
        ))?.build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::NonUniqueOperationTypes {
                operation1: OperationKind::Query,
                operation2: OperationKind::Mutation,
                ..
            }),
        ));
        Ok(())
    }

    #[test]
    fn duplicate_schema_roots_are_rejected() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "schema { query: Query }\n",
            "extend schema { query: Query }\n",
            "type Query { ping: String }\n",
        ));

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateOperationDefinition {
                operation: OperationKind::Query,
                ..
            }),
        ));
        Ok(())
    }
}

mod build_types {
    use super::*;

    #[test]
    fn builtins_are_always_present() -> Result<()> {
        let schema = SchemaBuilder::from_str("type Query { ping: String }")?.build()?;

        for name in ["Boolean", "Float", "ID", "Int", "String"] {
            let builtin = schema.resolve_type(name).unwrap();
            assert!(builtin.is_builtin());
            assert_eq!(builtin.def_location(), loc::SchemaDefLocation::GraphQLBuiltIn);
        }
        for name in ["skip", "include", "deprecated", "specifiedBy"] {
            assert!(schema.directive(name).unwrap().is_builtin());
        }
        assert!(schema.resolve_type("Nope").is_none());
        Ok(())
    }

    #[test]
    fn field_of_looks_up_object_and_interface_fields() -> Result<()> {
        let schema = SchemaBuilder::from_str(concat!(
            "type Query { node(id: ID!): Node }\n",
            "interface Node { id: ID! }\n",
            "type User implements Node { id: ID! name: String @deprecated }\n",
        ))?.build()?;

        let node = schema.field_of("Query", "node").unwrap();
        assert_eq!(node.parent_type_name(), "Query");
        assert_eq!(node.type_annotation().to_string(), "Node");
        assert!(node.parameter("id").unwrap().is_required());

        assert!(schema.field_of("Node", "id").is_some());
        assert_eq!(
            schema.field_of("User", "name").unwrap().deprecation_reason(),
            Some("No longer supported"),
        );
        assert!(schema.field_of("User", "email").is_none());
        assert!(schema.field_of("Int", "id").is_none());
        Ok(())
    }

    #[test]
    fn duplicate_type_definitions_are_rejected() {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { ping: String }\n",
            "type Query { pong: String }\n",
        ));

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateTypeDefinition { ref type_name, .. })
                if type_name == "Query",
        ));
    }

    #[test]
    fn duplicate_types_across_loads_are_rejected() -> Result<()> {
        let result = SchemaBuilder::new()
            .load_str(None, "type Query { ping: String }")?
            .load_str(None, "type Query { pong: String }");

        let Err(SchemaBuildError::DuplicateTypeDefinition { def1, def2, .. }) = result else {
            panic!("expected DuplicateTypeDefinition, got {result:?}");
        };
        assert_eq!(def1, loc::FilePosition {
            col: 1,
            file: PathBuf::from("str://0"),
            line: 1,
        }.into());
        assert_eq!(def2, loc::FilePosition {
            col: 1,
            file: PathBuf::from("str://1"),
            line: 1,
        }.into());
        Ok(())
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let result = SchemaBuilder::from_str("type Query { ping: String ping: Int }");

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateFieldNameDefinition { ref field_name, .. })
                if field_name == "ping",
        ));
    }

    #[test]
    fn dunder_names_are_rejected() {
        assert!(matches!(
            SchemaBuilder::from_str("type __Query { ping: String }"),
            Err(SchemaBuildError::InvalidDunderPrefixedTypeName { .. }),
        ));
        assert!(matches!(
            SchemaBuilder::from_str("type Query { __ping: String }"),
            Err(SchemaBuildError::InvalidDunderPrefixedFieldName { ref field_path, .. })
                if field_path == "Query.__ping",
        ));
    }

    #[test]
    fn builtin_redefinitions_are_rejected() {
        assert!(matches!(
            SchemaBuilder::from_str("scalar Int"),
            Err(SchemaBuildError::RedefinitionOfBuiltinType { .. }),
        ));
        assert!(matches!(
            SchemaBuilder::from_str("directive @skip(if: Boolean!) on FIELD"),
            Err(SchemaBuildError::RedefinitionOfBuiltinDirective { .. }),
        ));
    }

    #[test]
    fn enum_values_are_unique() {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { color: Color }\n",
            "enum Color { RED GREEN RED }\n",
        ));

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateEnumValueDefinition { ref enum_name, .. })
                if enum_name == "Color",
        ));
    }

    #[test]
    fn undefined_field_type_is_a_validation_error() -> Result<()> {
        let result = SchemaBuilder::from_str("type Query { user: User }")?.build();

        let Err(SchemaBuildError::TypeValidationErrors { errors }) = result else {
            panic!("expected TypeValidationErrors, got {result:?}");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            TypeValidationError::UndefinedTypeName { undefined_type_name, .. }
                if undefined_type_name == "User",
        ));
        Ok(())
    }

    #[test]
    fn input_types_cannot_be_returned_and_output_types_cannot_be_arguments() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { a: Filter b(user: User): Int }\n",
            "input Filter { name: String }\n",
            "type User { name: String }\n",
        ))?.build();

        let Err(SchemaBuildError::TypeValidationErrors { errors }) = result else {
            panic!("expected TypeValidationErrors, got {result:?}");
        };
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::InvalidOutputFieldWithInputType { field_name, .. }
                if field_name == "a",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::InvalidParameterWithOutputOnlyType { owner_name, .. }
                if owner_name == "Query.b",
        )));
        Ok(())
    }

    #[test]
    fn implementations_must_declare_interface_fields_covariantly() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { node: Node }\n",
            "interface Node { id: ID! parent: Node }\n",
            "type Missing implements Node { parent: Node }\n",
            "type Widened implements Node { id: ID parent: Node }\n",
            "type Narrowed implements Node { id: ID! parent: Narrowed }\n",
        ))?.build();

        let Err(SchemaBuildError::TypeValidationErrors { errors }) = result else {
            panic!("expected TypeValidationErrors, got {result:?}");
        };
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::MissingInterfaceSpecifiedField { type_name, .. }
                if type_name == "Missing",
        )));
        assert!(errors.iter().any(|err| matches!(
            err,
            TypeValidationError::InvalidInterfaceSpecifiedFieldType { type_name, .. }
                if type_name == "Widened",
        )));
        Ok(())
    }

    #[test]
    fn union_members_must_be_objects() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { result: Result }\n",
            "union Result = Ok | Code\n",
            "type Ok { message: String }\n",
            "enum Code { NOT_FOUND }\n",
        ))?.build();

        let Err(SchemaBuildError::TypeValidationErrors { errors }) = result else {
            panic!("expected TypeValidationErrors, got {result:?}");
        };
        assert!(matches!(
            &errors[..],
            [TypeValidationError::InvalidUnionMemberTypeKind { member_type_name, .. }]
                if member_type_name == "Code",
        ));
        Ok(())
    }

    #[test]
    fn required_input_cycles_are_rejected() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { find(filter: A): Int }\n",
            "input A { b: B! }\n",
            "input B { a: A! }\n",
            "input Loose { next: Loose }\n",
        ))?.build();

        let Err(SchemaBuildError::TypeValidationErrors { errors }) = result else {
            panic!("expected TypeValidationErrors, got {result:?}");
        };
        assert_eq!(errors, vec![TypeValidationError::CircularInputFieldChain {
            circular_field_path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        }]);
        Ok(())
    }
}

mod build_extensions {
    use super::*;

    #[test]
    fn extensions_merge_into_their_base_type() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "extend type Query { extra: Int }")?
            .load_str(None, concat!(
                "type Query { ping: String }\n",
                "enum Color { RED }\n",
                "extend enum Color { BLUE }\n",
                "union Pet = Cat\n",
                "extend union Pet = Dog\n",
                "type Cat { name: String }\n",
                "type Dog { name: String }\n",
            ))?
            .build()?;

        let query_fields: Vec<&str> = schema.resolve_type("Query")
            .and_then(GraphQLType::fields)
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(query_fields, vec!["ping", "extra"]);

        let color = schema.resolve_type("Color").and_then(GraphQLType::as_enum).unwrap();
        assert!(color.has_value("RED"));
        assert!(color.has_value("BLUE"));

        assert_eq!(schema.possible_types("Pet"), vec!["Cat", "Dog"]);
        Ok(())
    }

    #[test]
    fn extending_undefined_type_is_an_error() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { ping: String }\n",
            "extend type Missing { field: Int }\n",
        ))?.build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::ExtensionOfUndefinedType { ref type_name, .. })
                if type_name == "Missing",
        ));
        Ok(())
    }

    #[test]
    fn extension_kind_must_match() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { ping: String }\n",
            "extend enum Query { NOPE }\n",
        ))?.build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::InvalidExtensionType { extension_kind: "enum", .. }),
        ));
        Ok(())
    }

    #[test]
    fn extension_fields_cannot_duplicate_base_fields() -> Result<()> {
        let result = SchemaBuilder::from_str(concat!(
            "type Query { ping: String }\n",
            "extend type Query { ping: Int }\n",
        ))?.build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateFieldNameDefinition { .. }),
        ));
        Ok(())
    }
}

mod build_resolvers {
    use super::*;

    #[test]
    fn resolvers_bind_to_object_fields() -> Result<()> {
        let schema = SchemaBuilder::from_str("type Query { answer: Int other: Int }")?
            .resolver("Query", "answer", SyncResolver::new(|_, _, _| Ok(42)))
            .build()?;

        assert!(schema.field_of("Query", "answer").unwrap().resolver().is_some());
        assert!(schema.field_of("Query", "other").unwrap().resolver().is_none());
        Ok(())
    }

    #[test]
    fn unknown_resolver_target_is_an_error() -> Result<()> {
        let result = SchemaBuilder::from_str("type Query { answer: Int }")?
            .resolver("Query", "question", SyncResolver::new(|_, _, _| Ok(0)))
            .build();

        assert_eq!(result.unwrap_err(), SchemaBuildError::UnknownResolverTarget {
            field_name: "question".to_string(),
            type_name: "Query".to_string(),
        });
        Ok(())
    }
}

mod load_sources {
    use super::*;

    #[test]
    fn parse_errors_name_the_source() {
        let result = SchemaBuilder::from_str("type Query { ping: }");

        let Err(SchemaBuildError::ParseError { file, message }) = result else {
            panic!("expected ParseError, got {result:?}");
        };
        assert_eq!(file, PathBuf::from("str://0"));
        assert!(!message.is_empty());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = SchemaBuilder::new()
            .load_file("/definitely/not/a/real/schema.graphql");

        assert!(matches!(result, Err(SchemaBuildError::SchemaFileReadError(_))));
    }

    #[test]
    fn load_file_attributes_definitions_to_the_file() -> Result<()> {
        let dir = std::env::temp_dir().join("gqlengine-schema-builder-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("schema.graphql");
        std::fs::write(&path, "type Query {\n  ping: String\n}\n").unwrap();

        let schema = SchemaBuilder::new().load_file(&path)?.build()?;
        let ping = schema.field_of("Query", "ping").unwrap();
        assert_eq!(ping.def_location(), &loc::FilePosition {
            col: 3,
            file: path,
            line: 2,
        });
        Ok(())
    }
}
