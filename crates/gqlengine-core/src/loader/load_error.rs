use crate::resolver::FieldError;

/// A whole-batch failure reported by a [`BatchFn`](crate::loader::BatchFn).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct BatchError {
    message: String,
}
impl BatchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
impl From<String> for BatchError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
impl From<&str> for BatchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Why a single [`BatchLoader::load()`](crate::loader::BatchLoader::load)
/// produced no value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The batch function failed; every caller in the batch sees the same
    /// error.
    #[error("batch load failed: {0}")]
    Batch(#[from] BatchError),

    /// The batch dispatch ended without delivering a value (for example, its
    /// task panicked).
    #[error("batch dispatch ended before a value was delivered")]
    DispatchFailed,

    /// The batch function returned the wrong number of entries.
    #[error("batch function returned {actual} values for {expected} keys")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },

    #[error("no value found for key")]
    NotFound,
}
impl From<LoadError> for FieldError {
    fn from(err: LoadError) -> Self {
        FieldError::new(err.to_string())
    }
}
