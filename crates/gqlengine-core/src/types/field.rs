use crate::loc;
use crate::resolver::Resolver;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::types::deprecation_reason;
use gqlengine_parser::ast;
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// An output field of an object or interface type, plus the resolver bound
/// to it (if any).
#[derive(Clone)]
pub struct Field {
    pub(crate) def_location: loc::FilePosition,
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) parameters: IndexMap<String, Parameter>,
    pub(crate) parent_type_name: String,
    pub(crate) resolver: Option<Arc<dyn Resolver>>,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Field {
    pub(crate) fn from_ast(
        file_path: &Path,
        parent_type_name: &str,
        def: &ast::FieldDefinition,
    ) -> Self {
        Self {
            def_location: loc::FilePosition::from_pos(file_path, def.position),
            deprecation_reason: deprecation_reason(&def.directives),
            description: def.description.clone(),
            name: def.name.clone(),
            parameters: def.arguments.iter()
                .map(|arg| (arg.name.clone(), Parameter::from_ast(file_path, arg)))
                .collect(),
            parent_type_name: parent_type_name.to_string(),
            resolver: None,
            type_annotation: TypeAnnotation::from_ast_type(&def.field_type),
        }
    }

    pub fn def_location(&self) -> &loc::FilePosition {
        &self.def_location
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

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.parameters
    }

    /// The object or interface type this field is declared on.
    pub fn parent_type_name(&self) -> &str {
        &self.parent_type_name
    }

    /// The bound resolver. `None` means the default property resolver
    /// applies.
    pub fn resolver(&self) -> Option<&Arc<dyn Resolver>> {
        self.resolver.as_ref()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("def_location", &self.def_location)
            .field("deprecation_reason", &self.deprecation_reason)
            .field("description", &self.description)
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("parent_type_name", &self.parent_type_name)
            .field("resolver", &self.resolver.as_ref().map(|_| "<resolver>"))
            .field("type_annotation", &self.type_annotation)
            .finish()
    }
}
// Resolvers are opaque; two fields compare equal if they agree on whether
// one is bound.
impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.def_location == other.def_location
            && self.deprecation_reason == other.deprecation_reason
            && self.description == other.description
            && self.name == other.name
            && self.parameters == other.parameters
            && self.parent_type_name == other.parent_type_name
            && self.resolver.is_some() == other.resolver.is_some()
            && self.type_annotation == other.type_annotation
    }
}
