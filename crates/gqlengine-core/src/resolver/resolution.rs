use crate::resolver::FieldError;
use crate::resolver::ResolvedValue;
use futures::future::BoxFuture;
use std::fmt;

pub type FieldResult<T> = std::result::Result<T, FieldError>;

/// What a [`Resolver`](crate::resolver::Resolver) hands back: a value that
/// is available now, or one that will be.
pub enum Resolution {
    Ready(FieldResult<ResolvedValue>),
    Deferred(BoxFuture<'static, FieldResult<ResolvedValue>>),
}
impl Resolution {
    pub fn ready(value: impl Into<ResolvedValue>) -> Self {
        Self::Ready(Ok(value.into()))
    }

    pub fn error(err: impl Into<FieldError>) -> Self {
        Self::Ready(Err(err.into()))
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = FieldResult<ResolvedValue>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Waits for the value. Ready resolutions complete without suspending.
    pub async fn into_result(self) -> FieldResult<ResolvedValue> {
        match self {
            Self::Ready(result) => result,
            Self::Deferred(future) => future.await,
        }
    }
}
impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
