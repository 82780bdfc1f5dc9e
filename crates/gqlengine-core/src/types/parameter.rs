use crate::loc;
use crate::types::TypeAnnotation;
use crate::types::deprecation_reason;
use gqlengine_parser::ast;
use std::path::Path;

/// An argument declared on a field or directive.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) default_value: Option<ast::Value>,
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Parameter {
    pub(crate) fn from_ast(file_path: &Path, def: &ast::InputValueDefinition) -> Self {
        Self {
            def_location: loc::FilePosition::from_pos(file_path, def.position).into(),
            default_value: def.default_value.clone(),
            deprecation_reason: deprecation_reason(&def.directives),
            description: def.description.clone(),
            name: def.name.clone(),
            type_annotation: TypeAnnotation::from_ast_type(&def.value_type),
        }
    }

    pub(crate) fn builtin(
        name: &str,
        type_annotation: TypeAnnotation,
        default_value: Option<ast::Value>,
    ) -> Self {
        Self {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            default_value,
            deprecation_reason: None,
            description: None,
            name: name.to_string(),
            type_annotation,
        }
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn default_value(&self) -> Option<&ast::Value> {
        self.default_value.as_ref()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A parameter is required when it is non-null and has no default.
    pub fn is_required(&self) -> bool {
        !self.type_annotation.nullable() && self.default_value.is_none()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}

/// A field of an input object type. Input fields carry the same data as
/// parameters.
pub type InputField = Parameter;
