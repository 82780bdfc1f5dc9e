mod execution_context;
mod execution_context_builder;

pub use execution_context::ExecutionContext;
pub use execution_context_builder::ExecutionContextBuilder;
