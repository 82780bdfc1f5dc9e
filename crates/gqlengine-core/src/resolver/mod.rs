//! How field values are produced.
//!
//! A [`Resolver`] is bound to a field with
//! [`SchemaBuilder::resolver()`](crate::schema::SchemaBuilder::resolver).
//! Fields without a binding read the same-named key off their parent object
//! (see [`PropertyResolver`]).

mod arguments;
mod async_resolver;
mod field_error;
mod property_resolver;
mod resolution;
mod resolved_value;
mod resolver_trait;
mod sync_resolver;

pub use arguments::Arguments;
pub use async_resolver::AsyncResolver;
pub use field_error::FieldError;
pub use property_resolver::PropertyResolver;
pub use resolution::FieldResult;
pub use resolution::Resolution;
pub use resolved_value::ResolvedValue;
pub use resolver_trait::Resolver;
pub use sync_resolver::SyncResolver;
