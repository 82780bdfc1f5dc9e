use crate::types::GraphQLType;

/// The kind of a [`GraphQLType`], without its payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphQLTypeKind {
    Boolean,
    Enum,
    Float,
    ID,
    InputObject,
    Int,
    Interface,
    Object,
    Scalar,
    String,
    Union,
}
impl GraphQLTypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean
            | Self::Float
            | Self::ID
            | Self::Int
            | Self::String
            | Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::InputObject => "input object",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Union => "union",
        }
    }
}
impl From<&GraphQLType> for GraphQLTypeKind {
    fn from(value: &GraphQLType) -> Self {
        match value {
            GraphQLType::Boolean => Self::Boolean,
            GraphQLType::Enum(_) => Self::Enum,
            GraphQLType::Float => Self::Float,
            GraphQLType::ID => Self::ID,
            GraphQLType::InputObject(_) => Self::InputObject,
            GraphQLType::Int => Self::Int,
            GraphQLType::Interface(_) => Self::Interface,
            GraphQLType::Object(_) => Self::Object,
            GraphQLType::Scalar(_) => Self::Scalar,
            GraphQLType::String => Self::String,
            GraphQLType::Union(_) => Self::Union,
        }
    }
}
