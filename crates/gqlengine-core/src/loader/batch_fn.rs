use crate::loader::BatchError;
use async_trait::async_trait;

/// The backend call behind a [`BatchLoader`](crate::loader::BatchLoader).
///
/// `load` receives distinct keys and must return exactly one entry per key,
/// in the same order. `None` marks a key with no value.
#[async_trait]
pub trait BatchFn<K, V>: Send + Sync
where
    K: Send + Sync + 'static,
    V: Send + 'static,
{
    async fn load(&self, keys: &[K]) -> Result<Vec<Option<V>>, BatchError>;
}

/// A [`BatchFn`] backed by a closure. Built by [`batch_fn()`].
pub struct FnBatchFn<F> {
    func: F,
}

/// Wraps an async closure as a [`BatchFn`].
///
/// ```
/// use gqlengine_core::loader::batch_fn;
/// use gqlengine_core::loader::BatchFn;
///
/// let squares = batch_fn(|keys: Vec<i64>| async move {
///     Ok(keys.into_iter().map(|k| Some(k * k)).collect())
/// });
/// # fn assert_batch_fn(_: &impl BatchFn<i64, i64>) {}
/// # assert_batch_fn(&squares);
/// ```
pub fn batch_fn<K, V, F, Fut>(func: F) -> FnBatchFn<F>
where
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
    F: Fn(Vec<K>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Option<V>>, BatchError>> + Send + 'static,
{
    FnBatchFn { func }
}

#[async_trait]
impl<K, V, F, Fut> BatchFn<K, V> for FnBatchFn<F>
where
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
    F: Fn(Vec<K>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Option<V>>, BatchError>> + Send + 'static,
{
    async fn load(&self, keys: &[K]) -> Result<Vec<Option<V>>, BatchError> {
        (self.func)(keys.to_vec()).await
    }
}
