use crate::loc;
use crate::types::GraphQLTypeKind;
use crate::types::TypeAnnotation;
use thiserror::Error;

/// A cross-type inconsistency found after every definition has been loaded.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeValidationError {
    /// Every link in the chain is a non-null, non-list input object field,
    /// so no finite value could satisfy it.
    #[error(
        "Input object types form an unbreakable cycle of non-null fields: {}",
        circular_field_path.join(" -> "),
    )]
    CircularInputFieldChain {
        circular_field_path: Vec<String>,
    },

    #[error("`{type_name}` cannot implement `{non_interface_type_name}`: it is not an interface")]
    ImplementsNonInterfaceType {
        def_location: loc::FilePosition,
        non_interface_type_name: String,
        type_name: String,
    },

    #[error("`{type_name}` implements `{undefined_interface_name}`, which is not defined")]
    ImplementsUndefinedInterface {
        def_location: loc::FilePosition,
        type_name: String,
        undefined_interface_name: String,
    },

    #[error(
        "Input field `{parent_type_name}.{field_name}` has type \
        `{invalid_type_name}`, which is not an input type"
    )]
    InvalidInputFieldWithOutputType {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        invalid_type_name: String,
        parent_type_name: String,
    },

    #[error(
        "Argument `{type_name}.{field_name}({parameter_name}:)` has type \
        `{invalid_parameter_type}`, but `{interface_name}.{field_name}` \
        declares it as `{expected_parameter_type}`"
    )]
    InvalidInterfaceSpecifiedFieldParameterType {
        def_location: loc::SchemaDefLocation,
        expected_parameter_type: TypeAnnotation,
        field_name: String,
        interface_name: String,
        invalid_parameter_type: TypeAnnotation,
        parameter_name: String,
        type_name: String,
    },

    #[error(
        "`{type_name}.{field_name}` has type `{invalid_field_type}`, which is \
        not a subtype of `{expected_field_type}` as declared by \
        `{interface_name}.{field_name}`"
    )]
    InvalidInterfaceSpecifiedFieldType {
        def_location: loc::FilePosition,
        expected_field_type: TypeAnnotation,
        field_name: String,
        interface_name: String,
        invalid_field_type: TypeAnnotation,
        type_name: String,
    },

    #[error(
        "Output field `{parent_type_name}.{field_name}` has type \
        `{input_type_name}`, which is an input object type"
    )]
    InvalidOutputFieldWithInputType {
        def_location: loc::FilePosition,
        field_name: String,
        input_type_name: String,
        parent_type_name: String,
    },

    #[error(
        "Argument `{owner_name}({parameter_name}:)` has type \
        `{outputonly_type_name}`, which is not an input type"
    )]
    InvalidParameterWithOutputOnlyType {
        def_location: loc::SchemaDefLocation,
        owner_name: String,
        parameter_name: String,
        outputonly_type_name: String,
    },

    #[error(
        "`{type_name}.{field_name}` adds required argument `{parameter_name}` \
        to a field of the `{interface_name}` interface; extra arguments must \
        be optional"
    )]
    InvalidRequiredAdditionalParameterOnInterfaceSpecifiedField {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        interface_name: String,
        parameter_name: String,
        type_name: String,
    },

    #[error(
        "Union `{union_type_name}` lists `{member_type_name}`, which has kind \
        `{}`; union members must be object types",
        member_kind.name(),
    )]
    InvalidUnionMemberTypeKind {
        def_location: loc::FilePosition,
        member_kind: GraphQLTypeKind,
        member_type_name: String,
        union_type_name: String,
    },

    #[error("`{type_name}` is missing field `{field_name}` required by interface `{interface_name}`")]
    MissingInterfaceSpecifiedField {
        def_location: loc::FilePosition,
        field_name: String,
        interface_name: String,
        type_name: String,
    },

    #[error(
        "`{type_name}.{field_name}` is missing argument \
        `{missing_parameter_name}` declared by `{interface_name}.{field_name}`"
    )]
    MissingInterfaceSpecifiedFieldParameter {
        def_location: loc::FilePosition,
        field_name: String,
        interface_name: String,
        missing_parameter_name: String,
        type_name: String,
    },

    #[error(
        "`{type_name}` must also implement `{missing_recursive_interface_name}` \
        (inherited through {})",
        inheritance_path.join(" -> "),
    )]
    MissingRecursiveInterfaceImplementation {
        def_location: loc::FilePosition,
        inheritance_path: Vec<String>,
        missing_recursive_interface_name: String,
        type_name: String,
    },

    #[error("Unknown type `{undefined_type_name}`")]
    UndefinedTypeName {
        ref_location: loc::SchemaDefLocation,
        undefined_type_name: String,
    },
}
