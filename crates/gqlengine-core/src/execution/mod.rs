//! Runs validated operations against a [`Schema`](crate::schema::Schema).
//!
//! The [`Executor`] walks the selected operation breadth-first: every
//! sibling field of a level is dispatched before any of them is awaited, so
//! independent resolvers (and the [`BatchLoader`](crate::loader::BatchLoader)
//! loads they issue) overlap. Field errors are collected into the
//! [`Response`] with their response paths; failures that reject the whole
//! request surface as a [`RequestError`].

mod collect_fields;
mod error_code;
mod execution_error_kind;
mod execution_phase;
mod executor;
mod executor_config;
mod graphql_error;
mod input_coercion;
mod request;
mod request_error;
mod response;
mod variable_coercion_error;

pub use error_code::ErrorCode;
pub use execution_error_kind::ExecutionErrorKind;
pub use execution_phase::ExecutionPhase;
pub use executor::Executor;
pub use executor_config::ExecutorConfig;
pub use graphql_error::GraphQLError;
pub use graphql_error::Location;
pub use graphql_error::PathSegment;
pub use request::Request;
pub use request_error::RequestError;
pub use response::Response;
pub use variable_coercion_error::VariableCoercionError;

#[cfg(test)]
mod tests;
