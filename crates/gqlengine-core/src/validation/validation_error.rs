use gqlengine_parser::ast::DirectiveLocation;
use gqlengine_parser::ast::OperationKind;
use gqlengine_parser::ast::Pos;
use thiserror::Error;

/// A rule violation found by [`validate()`](crate::validation::validate).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("This anonymous operation must be the only defined operation")]
    AnonymousOperationNotAlone {
        location: Pos,
    },

    #[error(
        "Cannot spread fragment `{}` within itself via {}",
        cycle.first().map_or("", String::as_str),
        cycle.join(" -> "),
    )]
    CyclicFragment {
        /// Fragment names along the cycle, starting from the smallest name.
        cycle: Vec<String>,
        location: Pos,
    },

    #[error("There can be only one argument named `{argument_name}`")]
    DuplicateArgument {
        argument_name: String,
        location: Pos,
    },

    #[error("The directive `@{directive_name}` can only be used once at this location")]
    DuplicateDirective {
        directive_name: String,
        location: Pos,
    },

    #[error("There can be only one fragment named `{fragment_name}`")]
    DuplicateFragmentName {
        fragment_name: String,
        location1: Pos,
        location2: Pos,
    },

    #[error("There can be only one operation named `{operation_name}`")]
    DuplicateOperationName {
        operation_name: String,
        location1: Pos,
        location2: Pos,
    },

    #[error("There can be only one variable named `${variable_name}`")]
    DuplicateVariableName {
        variable_name: String,
        location: Pos,
    },

    #[error(
        "Fields `{response_key}` conflict because {reason}; use different \
        aliases on the fields to fetch both"
    )]
    FieldsConflict {
        response_key: String,
        reason: String,
        location1: Pos,
        location2: Pos,
    },

    #[error("Fragment {} cannot condition on non-composite type `{type_name}`", fragment_label(fragment_name))]
    FragmentOnNonCompositeType {
        fragment_name: Option<String>,
        type_name: String,
        location: Pos,
    },

    #[error("Argument `{argument_name}` on `{owner}` has an invalid value: {reason}")]
    InvalidArgumentValue {
        argument_name: String,
        owner: String,
        reason: String,
        location: Pos,
    },

    #[error(
        "Fragment {} cannot be spread here as objects of type \
        `{parent_type_name}` can never be of type `{type_condition}`",
        fragment_label(fragment_name),
    )]
    InvalidFragmentTypeCondition {
        fragment_name: Option<String>,
        parent_type_name: String,
        type_condition: String,
        location: Pos,
    },

    #[error("Variable `${variable_name}` has an invalid default value: {reason}")]
    InvalidVariableDefaultValue {
        variable_name: String,
        reason: String,
        location: Pos,
    },

    #[error("Directive `@{directive_name}` may not be used on {directive_location}")]
    MisplacedDirective {
        directive_name: String,
        directive_location: DirectiveLocation,
        location: Pos,
    },

    #[error("Argument `{argument_name}` of type `{argument_type}` on `{owner}` is required, but it was not provided")]
    MissingRequiredArgument {
        argument_name: String,
        argument_type: String,
        owner: String,
        location: Pos,
    },

    #[error("Field `{field_name}` of type `{type_name}` must have a selection of subfields")]
    MissingSelectionSet {
        field_name: String,
        type_name: String,
        location: Pos,
    },

    #[error("Variable `${variable_name}` cannot be non-input type `{type_name}`")]
    NonInputVariableType {
        variable_name: String,
        type_name: String,
        location: Pos,
    },

    #[error("Field `{field_name}` must not have a selection since type `{type_name}` has no subfields")]
    SelectionSetOnLeafField {
        field_name: String,
        type_name: String,
        location: Pos,
    },

    #[error("Variable `${variable_name}` is not defined{}", operation_label(operation_name))]
    UndefinedVariable {
        variable_name: String,
        operation_name: Option<String>,
        location: Pos,
    },

    #[error("Unknown argument `{argument_name}` on `{owner}`")]
    UnknownArgument {
        argument_name: String,
        owner: String,
        location: Pos,
    },

    #[error("Unknown directive `@{directive_name}`")]
    UnknownDirective {
        directive_name: String,
        location: Pos,
    },

    #[error("Cannot query field `{field_name}` on type `{type_name}`")]
    UnknownField {
        field_name: String,
        type_name: String,
        location: Pos,
    },

    #[error("Unknown fragment `{fragment_name}`")]
    UnknownFragment {
        fragment_name: String,
        location: Pos,
    },

    #[error("Unknown type `{type_name}`")]
    UnknownType {
        type_name: String,
        location: Pos,
    },

    #[error("The schema does not support {operation_kind} operations")]
    UnsupportedOperationKind {
        operation_kind: OperationKind,
        location: Pos,
    },

    #[error(
        "Variable `${variable_name}` of type `{variable_type}` used in position \
        expecting type `{expected_type}`"
    )]
    VariableTypeMismatch {
        variable_name: String,
        variable_type: String,
        expected_type: String,
        location: Pos,
    },
}

impl ValidationError {
    /// Source locations of the offending node(s).
    pub fn locations(&self) -> Vec<Pos> {
        match self {
            Self::DuplicateFragmentName { location1, location2, .. }
                | Self::DuplicateOperationName { location1, location2, .. }
                | Self::FieldsConflict { location1, location2, .. } =>
                vec![*location1, *location2],

            Self::AnonymousOperationNotAlone { location }
                | Self::CyclicFragment { location, .. }
                | Self::DuplicateArgument { location, .. }
                | Self::DuplicateDirective { location, .. }
                | Self::DuplicateVariableName { location, .. }
                | Self::FragmentOnNonCompositeType { location, .. }
                | Self::InvalidArgumentValue { location, .. }
                | Self::InvalidFragmentTypeCondition { location, .. }
                | Self::InvalidVariableDefaultValue { location, .. }
                | Self::MisplacedDirective { location, .. }
                | Self::MissingRequiredArgument { location, .. }
                | Self::MissingSelectionSet { location, .. }
                | Self::NonInputVariableType { location, .. }
                | Self::SelectionSetOnLeafField { location, .. }
                | Self::UndefinedVariable { location, .. }
                | Self::UnknownArgument { location, .. }
                | Self::UnknownDirective { location, .. }
                | Self::UnknownField { location, .. }
                | Self::UnknownFragment { location, .. }
                | Self::UnknownType { location, .. }
                | Self::UnsupportedOperationKind { location, .. }
                | Self::VariableTypeMismatch { location, .. } =>
                vec![*location],
        }
    }
}

fn fragment_label(fragment_name: &Option<String>) -> String {
    match fragment_name {
        Some(name) => format!("`{name}`"),
        None => "(inline)".to_string(),
    }
}

fn operation_label(operation_name: &Option<String>) -> String {
    match operation_name {
        Some(name) => format!(" by operation `{name}`"),
        None => String::new(),
    }
}
