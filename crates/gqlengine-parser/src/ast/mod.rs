//! Owned AST for executable documents and type-system (SDL) documents.
//!
//! Every node records the 1-based [`Pos`] where it starts. Documents own
//! their nodes outright; fragment spreads refer to fragment definitions by
//! name only.

mod directive;
mod document;
mod operation;
mod pos;
mod selection;
mod type_annotation;
mod type_system;
mod value;

pub use directive::Argument;
pub use directive::Directive;
pub use document::Definition;
pub use document::Document;
pub use operation::FragmentDefinition;
pub use operation::OperationDefinition;
pub use operation::OperationKind;
pub use operation::VariableDefinition;
pub use pos::Pos;
pub use selection::Field;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::Selection;
pub use selection::SelectionSet;
pub use type_annotation::Type;
pub use type_system::DirectiveDefinition;
pub use type_system::DirectiveLocation;
pub use type_system::EnumTypeDefinition;
pub use type_system::EnumValueDefinition;
pub use type_system::FieldDefinition;
pub use type_system::InputObjectTypeDefinition;
pub use type_system::InputValueDefinition;
pub use type_system::InterfaceTypeDefinition;
pub use type_system::ObjectTypeDefinition;
pub use type_system::ScalarTypeDefinition;
pub use type_system::SchemaDefinition;
pub use type_system::SchemaDocument;
pub use type_system::TypeDefinition;
pub use type_system::TypeExtension;
pub use type_system::TypeSystemDefinition;
pub use type_system::UnionTypeDefinition;
pub use value::Value;
