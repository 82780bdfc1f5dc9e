use thiserror::Error;

/// Picking the operation to run from a document failed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OperationSelectionError {
    #[error("The document contains no operations")]
    NoOperations,

    #[error("Unknown operation named `{name}`")]
    NotFound {
        name: String,
    },

    #[error("The document contains multiple operations, so an operation name must be provided")]
    NameRequired,
}
