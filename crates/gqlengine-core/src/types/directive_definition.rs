use crate::loc;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::types::DEFAULT_DEPRECATION_REASON;
use gqlengine_parser::ast;
use gqlengine_parser::ast::DirectiveLocation;
use indexmap::IndexMap;
use std::path::Path;

/// A directive declared in the schema, or one of the four built-ins.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) locations: Vec<DirectiveLocation>,
    pub(crate) name: String,
    pub(crate) parameters: IndexMap<String, Parameter>,
    pub(crate) repeatable: bool,
}
impl DirectiveDefinition {
    pub(crate) const BUILTIN_NAMES: [&'static str; 4] =
        ["skip", "include", "deprecated", "specifiedBy"];

    pub(crate) fn from_ast(file_path: &Path, def: &ast::DirectiveDefinition) -> Self {
        Self {
            def_location: loc::FilePosition::from_pos(file_path, def.position).into(),
            description: def.description.clone(),
            locations: def.locations.clone(),
            name: def.name.clone(),
            parameters: def.arguments.iter()
                .map(|arg| (arg.name.clone(), Parameter::from_ast(file_path, arg)))
                .collect(),
            repeatable: def.repeatable,
        }
    }

    pub(crate) fn builtin(name: &str) -> Option<Self> {
        let executable_locations = vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ];
        let (locations, params) = match name {
            "skip" | "include" => (
                executable_locations,
                vec![Parameter::builtin("if", TypeAnnotation::named("Boolean", false), None)],
            ),
            "deprecated" => (
                vec![
                    DirectiveLocation::FieldDefinition,
                    DirectiveLocation::ArgumentDefinition,
                    DirectiveLocation::InputFieldDefinition,
                    DirectiveLocation::EnumValue,
                ],
                vec![Parameter::builtin(
                    "reason",
                    TypeAnnotation::named("String", true),
                    Some(ast::Value::String(DEFAULT_DEPRECATION_REASON.to_string())),
                )],
            ),
            "specifiedBy" => (
                vec![DirectiveLocation::Scalar],
                vec![Parameter::builtin("url", TypeAnnotation::named("String", false), None)],
            ),
            _ => return None,
        };
        Some(Self {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            description: None,
            locations,
            name: name.to_string(),
            parameters: params.into_iter().map(|p| (p.name.clone(), p)).collect(),
            repeatable: false,
        })
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_builtin(&self) -> bool {
        self.def_location == loc::SchemaDefLocation::GraphQLBuiltIn
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        &self.locations
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
}
