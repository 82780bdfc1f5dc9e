use crate::schema::SchemaBuilder;
use crate::types::DirectiveDefinition;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use gqlengine_parser::ast::OperationKind;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;

/// A fully type-checked, immutable GraphQL schema together with its
/// resolver bindings.
///
/// Share it between requests as `Arc<Schema>`; it holds no per-request
/// state.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) directive_defs: IndexMap<String, DirectiveDefinition>,
    pub(crate) mutation_type: Option<String>,
    pub(crate) possible_types: HashMap<String, IndexSet<String>>,
    pub(crate) query_type: String,
    pub(crate) subscription_type: Option<String>,
    pub(crate) types: IndexMap<String, GraphQLType>,
}
impl Schema {
    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// All directives, including the built-in `@skip`, `@include`,
    /// `@deprecated` and `@specifiedBy`.
    pub fn all_directives(&self) -> &IndexMap<String, DirectiveDefinition> {
        &self.directive_defs
    }

    /// All types, including the built-in scalars.
    pub fn all_types(&self) -> &IndexMap<String, GraphQLType> {
        &self.types
    }

    /// Types defined by loaded SDL (everything except built-in scalars).
    pub fn defined_types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.types.values().filter(|t| !t.is_builtin())
    }

    /// Directives defined by loaded SDL.
    pub fn defined_directives(&self) -> impl Iterator<Item = &DirectiveDefinition> {
        self.directive_defs.values().filter(|d| !d.is_builtin())
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directive_defs.get(name)
    }

    /// Looks up `field_name` on the object or interface type `type_name`.
    pub fn field_of(&self, type_name: &str, field_name: &str) -> Option<&Field> {
        self.types.get(type_name)?.fields()?.get(field_name)
    }

    /// Whether `object_type_name` can be the runtime type of a value whose
    /// declared type is `type_name`.
    pub fn is_possible_type(&self, type_name: &str, object_type_name: &str) -> bool {
        match self.types.get(type_name) {
            Some(GraphQLType::Object(_)) => type_name == object_type_name,
            Some(GraphQLType::Interface(_) | GraphQLType::Union(_)) => self.possible_types
                .get(type_name)
                .is_some_and(|objects| objects.contains(object_type_name)),
            _ => false,
        }
    }

    /// The object types a value of composite type `type_name` may have at
    /// runtime, in definition order.
    pub fn possible_types(&self, type_name: &str) -> Vec<&str> {
        match self.types.get(type_name) {
            Some(GraphQLType::Object(obj)) => vec![obj.name.as_str()],
            Some(GraphQLType::Interface(_) | GraphQLType::Union(_)) => self.possible_types
                .get(type_name)
                .map(|objects| objects.iter().map(String::as_str).collect())
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn query_type_name(&self) -> &str {
        &self.query_type
    }

    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    /// Returns the [`GraphQLType`] named `name`, or `None` if the schema has
    /// no such type.
    pub fn resolve_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    /// The root object type operations of `kind` start from. `None` when the
    /// schema does not support that kind of operation.
    pub fn root_type(&self, kind: OperationKind) -> Option<&ObjectType> {
        let type_name = match kind {
            OperationKind::Query => Some(self.query_type.as_str()),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }?;
        self.types.get(type_name)?.as_object()
    }

    /// Whether two composite types share at least one possible object type.
    pub fn types_overlap(&self, type_a: &str, type_b: &str) -> bool {
        if type_a == type_b {
            return true;
        }
        let possible_b = self.possible_types(type_b);
        self.possible_types(type_a)
            .iter()
            .any(|name| possible_b.contains(name))
    }
}
