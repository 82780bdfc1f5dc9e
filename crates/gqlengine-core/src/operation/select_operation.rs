use crate::operation::OperationSelectionError;
use gqlengine_parser::ast;

/// Picks the operation named `operation_name`, or the only operation in the
/// document when no name is given.
pub fn select_operation<'doc>(
    document: &'doc ast::Document,
    operation_name: Option<&str>,
) -> Result<&'doc ast::OperationDefinition, OperationSelectionError> {
    let mut operations = document.operations();
    match operation_name {
        Some(name) => operations
            .find(|op| op.name.as_deref() == Some(name))
            .ok_or_else(|| OperationSelectionError::NotFound {
                name: name.to_string(),
            }),
        None => {
            let first = operations.next().ok_or(OperationSelectionError::NoOperations)?;
            if operations.next().is_some() {
                return Err(OperationSelectionError::NameRequired);
            }
            Ok(first)
        },
    }
}
