//! Static checks of an executable document against a [`Schema`].
//!
//! [`validate()`] is pure: it never runs resolvers, and an empty result
//! means the document may be executed.
//!
//! [`Schema`]: crate::schema::Schema

mod input_value_checks;
mod validation_error;
mod validator;

pub use validation_error::ValidationError;
pub use validator::validate;

#[cfg(test)]
mod tests;
