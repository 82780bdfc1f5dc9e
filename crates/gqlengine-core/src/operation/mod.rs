//! Lookups over a parsed executable document: named fragments and the
//! operation a request asks for.

mod fragment_table;
mod operation_selection_error;
mod select_operation;

pub use fragment_table::FragmentTable;
pub use operation_selection_error::OperationSelectionError;
pub use select_operation::select_operation;

#[cfg(test)]
mod tests;
