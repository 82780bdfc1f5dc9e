use crate::ast;
use crate::execution::ErrorCode;
use crate::execution::GraphQLError;
use crate::execution::VariableCoercionError;
use crate::operation::OperationSelectionError;
use crate::validation::ValidationError;
use gqlengine_parser::GraphQLLexError;
use gqlengine_parser::GraphQLParseError;
use gqlengine_parser::GraphQLParseErrorKind;
use thiserror::Error;

/// A failure that rejects the whole request before any resolver runs.
#[derive(Clone, Debug, Error)]
pub enum RequestError {
    #[error("Syntax error: {0}")]
    Lex(GraphQLLexError),

    #[error("Failed to parse the request with {} error(s)", .0.len())]
    Parse(Vec<GraphQLParseError>),

    #[error("The request failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    OperationSelection(#[from] OperationSelectionError),

    #[error("Failed to coerce {} variable value(s)", .0.len())]
    VariableCoercion(Vec<VariableCoercionError>),

    #[error("{operation_kind} operations are not supported by this executor")]
    UnsupportedOperation {
        operation_kind: ast::OperationKind,
        location: ast::Pos,
    },
}
impl RequestError {
    /// Classifies a failed parse: a lexical error anywhere in the source
    /// wins over grammar errors, since the grammar errors usually follow
    /// from it.
    pub fn from_parse_errors(errors: Vec<GraphQLParseError>) -> Self {
        let lex_error = errors.iter()
            .find(|err| matches!(err.kind(), GraphQLParseErrorKind::LexerError));
        match lex_error {
            Some(err) => {
                let pos = err.pos();
                Self::Lex(GraphQLLexError {
                    message: err.message().to_string(),
                    line: pos.line,
                    column: pos.column,
                })
            },
            None => Self::Parse(errors),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex(_) | Self::Parse(_) => ErrorCode::GraphQLParseFailed,
            Self::Validation(_) => ErrorCode::GraphQLValidationFailed,
            Self::OperationSelection(_) => ErrorCode::OperationNotFound,
            Self::VariableCoercion(_) | Self::UnsupportedOperation { .. } => {
                ErrorCode::BadUserInput
            },
        }
    }

    /// Renders this failure as outbound `errors` entries.
    pub fn to_graphql_errors(&self, include_locations: bool) -> Vec<GraphQLError> {
        let code = self.code();
        let located = |message: String, locations: Vec<ast::Pos>| {
            let mut error = GraphQLError::new(message, code);
            if include_locations {
                for pos in locations {
                    error = error.at(pos);
                }
            }
            error
        };

        match self {
            Self::Lex(err) => {
                let pos = ast::Pos {
                    line: err.line,
                    column: err.column,
                };
                vec![located(format!("Syntax error: {}", err.message), vec![pos])]
            },
            Self::Parse(errors) => errors.iter()
                .map(|err| located(err.message().to_string(), vec![err.pos()]))
                .collect(),
            Self::Validation(errors) => errors.iter()
                .map(|err| located(err.to_string(), err.locations()))
                .collect(),
            Self::OperationSelection(err) => vec![located(err.to_string(), vec![])],
            Self::VariableCoercion(errors) => errors.iter()
                .map(|err| located(err.to_string(), vec![err.location()]))
                .collect(),
            Self::UnsupportedOperation { location, .. } => {
                vec![located(self.to_string(), vec![*location])]
            },
        }
    }
}
