//! The schema-driven half of gqlengine.
//!
//! A [`schema::Schema`] is built once from SDL with a
//! [`schema::SchemaBuilder`], which also binds [`resolver::Resolver`]s to
//! fields. Each request is then parsed (see `gqlengine_parser`), checked by
//! [`validation::validate`] and run by an [`execution::Executor`] against a
//! per-request [`context::ExecutionContext`], whose
//! [`loader::BatchLoader`]s collapse per-item fetches into batched calls.

pub mod context;
pub mod execution;
mod file_reader;
pub mod loader;
pub mod loc;
pub mod operation;
pub mod resolver;
pub mod schema;
pub mod types;
pub mod validation;

pub use file_reader::ReadContentError;
pub use gqlengine_parser::ast;
