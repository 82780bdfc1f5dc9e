use crate::loc;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::GraphQLTypeKind;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use indexmap::IndexMap;

/// Represents a defined GraphQL type.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Boolean,
    Enum(EnumType),
    Float,
    ID,
    InputObject(InputObjectType),
    Int,
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    String,
    Union(UnionType),
}
impl GraphQLType {
    pub(crate) const BUILTIN_SCALARS: [GraphQLType; 5] = [
        GraphQLType::Boolean,
        GraphQLType::Float,
        GraphQLType::ID,
        GraphQLType::Int,
        GraphQLType::String,
    ];

    pub fn as_enum(&self) -> Option<&EnumType> {
        if let Self::Enum(t) = self { Some(t) } else { None }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        if let Self::InputObject(t) = self { Some(t) } else { None }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        if let Self::Interface(t) = self { Some(t) } else { None }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        if let Self::Object(t) = self { Some(t) } else { None }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        if let Self::Scalar(t) = self { Some(t) } else { None }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        if let Self::Union(t) = self { Some(t) } else { None }
    }

    pub fn def_location(&self) -> loc::SchemaDefLocation {
        match self {
            Self::Boolean | Self::Float | Self::ID | Self::Int | Self::String =>
                loc::SchemaDefLocation::GraphQLBuiltIn,
            Self::Enum(t) => t.def_location.clone().into(),
            Self::InputObject(t) => t.def_location.clone().into(),
            Self::Interface(t) => t.def_location.clone().into(),
            Self::Object(t) => t.def_location.clone().into(),
            Self::Scalar(t) => t.def_location.clone().into(),
            Self::Union(t) => t.def_location.clone().into(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Boolean | Self::Float | Self::ID | Self::Int | Self::String => None,
            Self::Enum(t) => t.description.as_deref(),
            Self::InputObject(t) => t.description.as_deref(),
            Self::Interface(t) => t.description.as_deref(),
            Self::Object(t) => t.description.as_deref(),
            Self::Scalar(t) => t.description.as_deref(),
            Self::Union(t) => t.description.as_deref(),
        }
    }

    /// The output fields of an object or interface type.
    pub fn fields(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            Self::Object(t) => Some(&t.fields),
            Self::Interface(t) => Some(&t.fields),
            _ => None,
        }
    }

    /// Object, interface and union types: the types a selection set can
    /// target.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Boolean | Self::Float | Self::ID | Self::Int | Self::String)
    }

    pub fn is_input_type(&self) -> bool {
        self.is_leaf() || matches!(self, Self::InputObject(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Enum(_)
                | Self::Float
                | Self::ID
                | Self::Int
                | Self::Scalar(_)
                | Self::String
        )
    }

    pub fn is_output_type(&self) -> bool {
        !matches!(self, Self::InputObject(_))
    }

    pub fn kind(&self) -> GraphQLTypeKind {
        GraphQLTypeKind::from(self)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Boolean => "Boolean",
            Self::Float => "Float",
            Self::ID => "ID",
            Self::Int => "Int",
            Self::String => "String",
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Scalar(t) => &t.name,
            Self::Union(t) => &t.name,
        }
    }
}
