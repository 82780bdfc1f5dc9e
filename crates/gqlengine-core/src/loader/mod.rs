//! Request-scoped batching and caching of keyed fetches.
//!
//! Loads issued by sibling resolvers are collected while a level of the
//! response is being dispatched and then handed to the [`BatchFn`] as one
//! call. Each key is fetched at most once per loader unless caching is
//! disabled or the key is cleared.

mod batch_fn;
mod batch_loader;
mod load_error;
mod loader_options;

pub use batch_fn::BatchFn;
pub use batch_fn::FnBatchFn;
pub use batch_fn::batch_fn;
pub use batch_loader::BatchLoader;
pub use load_error::BatchError;
pub use load_error::LoadError;
pub use loader_options::LoaderOptions;

#[cfg(test)]
mod tests;
