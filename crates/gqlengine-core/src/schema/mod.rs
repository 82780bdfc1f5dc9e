mod schema;
pub(crate) mod schema_builder;
mod type_validation_error;
mod type_validator;

pub use schema::Schema;
pub use schema_builder::NamedTypeDefLocation;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use type_validation_error::TypeValidationError;
pub(crate) use type_validator::rotate_to_smallest;

#[cfg(test)]
mod tests;
