use crate::ast;
use thiserror::Error;

/// A provided variable value could not be coerced to its declared type.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VariableCoercionError {
    #[error("Variable `${variable_name}` got an invalid value: {reason}")]
    InvalidValue {
        variable_name: String,
        variable_type: String,
        reason: String,
        location: ast::Pos,
    },

    #[error("Variable `${variable_name}` of required type `{variable_type}` was not provided")]
    MissingRequired {
        variable_name: String,
        variable_type: String,
        location: ast::Pos,
    },
}
impl VariableCoercionError {
    pub fn location(&self) -> ast::Pos {
        match self {
            Self::InvalidValue { location, .. }
            | Self::MissingRequired { location, .. } => *location,
        }
    }

    pub fn variable_name(&self) -> &str {
        match self {
            Self::InvalidValue { variable_name, .. }
            | Self::MissingRequired { variable_name, .. } => variable_name,
        }
    }
}
