//! Schema-level type definitions.
//!
//! Everything here is produced by [`SchemaBuilder`](crate::schema::SchemaBuilder)
//! and is immutable once the [`Schema`](crate::schema::Schema) is built.

mod directive_definition;
mod enum_type;
mod enum_value;
mod field;
mod graphql_type;
mod graphql_type_kind;
mod input_object_type;
mod interface_type;
mod list_type_annotation;
mod named_type_annotation;
mod object_type;
mod parameter;
mod scalar_type;
mod type_annotation;
mod union_type;

pub use directive_definition::DirectiveDefinition;
pub use enum_type::EnumType;
pub use enum_value::EnumValue;
pub use field::Field;
pub use graphql_type::GraphQLType;
pub use graphql_type_kind::GraphQLTypeKind;
pub use input_object_type::InputObjectType;
pub use interface_type::InterfaceType;
pub use list_type_annotation::ListTypeAnnotation;
pub use named_type_annotation::NamedTypeAnnotation;
pub use object_type::ObjectType;
pub use parameter::InputField;
pub use parameter::Parameter;
pub use scalar_type::ScalarType;
pub use type_annotation::TypeAnnotation;
pub use union_type::UnionType;

use gqlengine_parser::ast;

pub(crate) const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Reads `@deprecated(reason:)` off a definition's directives.
pub(crate) fn deprecation_reason(directives: &[ast::Directive]) -> Option<String> {
    let directive = directives.iter().find(|d| d.name == "deprecated")?;
    match directive.argument("reason").map(|arg| &arg.value) {
        Some(ast::Value::String(reason)) => Some(reason.clone()),
        _ => Some(DEFAULT_DEPRECATION_REASON.to_string()),
    }
}

#[cfg(test)]
mod tests;
