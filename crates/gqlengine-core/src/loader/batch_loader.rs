use crate::loader::BatchFn;
use crate::loader::LoadError;
use crate::loader::LoaderOptions;
use futures::future::join_all;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use tokio::sync::watch;

/// Consecutive polls of the leading task that add no keys before a pending
/// batch is dispatched.
const SETTLE_ROUNDS: usize = 2;

type Outcome<V> = Option<Result<V, LoadError>>;

/// Collects keyed loads into batched calls to a [`BatchFn`].
///
/// Loads of a key that is already pending or resolved share the same result.
/// Loads of new keys are queued. The load that opened the queue leads the
/// batch: it yields on its own task until a full poll of that task adds no
/// keys, which for an executor means every sibling of the current level has
/// queued its key. The batch call itself runs on a spawned tokio task, so it
/// always completes even if the request that started it is cancelled.
///
/// Cloning a loader is cheap; clones share one queue and cache. Create a
/// new loader for each request.
pub struct BatchLoader<K, V> {
    inner: Arc<LoaderInner<K, V>>,
    name: Arc<str>,
}

struct LoaderInner<K, V> {
    batch_fn: Box<dyn BatchFn<K, V>>,
    options: LoaderOptions,
    state: Mutex<LoaderState<K, V>>,
}

struct LoaderState<K, V> {
    /// Every key that is pending or (when caching) resolved.
    entries: HashMap<K, watch::Receiver<Outcome<V>>>,
    dispatch_scheduled: bool,
    pending: IndexMap<K, watch::Sender<Outcome<V>>>,
}

impl<K, V> BatchLoader<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(batch_fn: impl BatchFn<K, V> + 'static) -> Self {
        Self::with_options(batch_fn, LoaderOptions::default())
    }

    pub fn with_options(batch_fn: impl BatchFn<K, V> + 'static, options: LoaderOptions) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                batch_fn: Box::new(batch_fn),
                options,
                state: Mutex::new(LoaderState {
                    entries: HashMap::new(),
                    dispatch_scheduled: false,
                    pending: IndexMap::new(),
                }),
            }),
            name: Arc::from("loader"),
        }
    }

    /// Labels this loader's dispatches in logs.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Arc::from(name);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.inner.options
    }

    /// Loads one key.
    ///
    /// Must be called from within a tokio runtime: the batch call runs on a
    /// spawned task.
    pub async fn load(&self, key: K) -> Result<V, LoadError> {
        let (mut receiver, leads_batch) = self.enqueue(key);
        if leads_batch {
            let lead = BatchLead {
                inner: Arc::clone(&self.inner),
                name: Arc::clone(&self.name),
            };
            self.inner.settle().await;
            // Dispatches the queue; runs on cancellation too.
            drop(lead);
        }
        let outcome = receiver.wait_for(Option::is_some)
            .await
            .map_err(|_| LoadError::DispatchFailed)?;
        match &*outcome {
            Some(result) => result.clone(),
            None => Err(LoadError::DispatchFailed),
        }
    }

    /// Loads several keys; results come back in the order of `keys`.
    pub async fn load_many(&self, keys: impl IntoIterator<Item = K>) -> Vec<Result<V, LoadError>> {
        join_all(keys.into_iter().map(|key| self.load(key))).await
    }

    /// Seeds the cache with a known value. Does nothing if the key is
    /// already pending or cached.
    pub fn prime(&self, key: K, value: V) {
        let mut state = self.inner.lock_state();
        if !state.entries.contains_key(&key) {
            let (_, receiver) = watch::channel(Some(Ok(value)));
            state.entries.insert(key, receiver);
        }
    }

    /// Evicts one key so the next load fetches it again. Loads already
    /// waiting on the key still receive the pending result.
    pub fn clear(&self, key: &K) {
        self.inner.lock_state().entries.remove(key);
    }

    pub fn clear_all(&self) {
        self.inner.lock_state().entries.clear();
    }

    /// Returns the key's receiver and whether this load opened the queue.
    fn enqueue(&self, key: K) -> (watch::Receiver<Outcome<V>>, bool) {
        let mut state = self.inner.lock_state();
        if let Some(receiver) = state.entries.get(&key) {
            return (receiver.clone(), false);
        }
        // Cleared while still queued.
        if let Some(sender) = state.pending.get(&key) {
            let receiver = sender.subscribe();
            state.entries.insert(key, receiver.clone());
            return (receiver, false);
        }

        let (sender, receiver) = watch::channel(None);
        state.entries.insert(key.clone(), receiver.clone());
        state.pending.insert(key, sender);
        let leads_batch = !state.dispatch_scheduled;
        state.dispatch_scheduled = true;
        (receiver, leads_batch)
    }
}

impl<K, V> LoaderInner<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn lock_state(&self) -> MutexGuard<'_, LoaderState<K, V>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Hands the queued keys to a spawned task that runs the batch calls.
    fn dispatch_pending(self: &Arc<Self>, name: &Arc<str>) {
        let batch: Vec<(K, watch::Sender<Outcome<V>>)> = {
            let mut state = self.lock_state();
            state.dispatch_scheduled = false;
            state.pending.drain(..).collect()
        };
        if batch.is_empty() {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(Self::dispatch(Arc::clone(self), Arc::clone(name), batch));
            },
            Err(_) => {
                tracing::debug!(loader = &**name, "no tokio runtime to dispatch on");
                // Waiters see DispatchFailed; later loads start over.
                let mut state = self.lock_state();
                for (key, _) in &batch {
                    state.entries.remove(key);
                }
            },
        }
    }

    async fn dispatch(
        inner: Arc<Self>,
        name: Arc<str>,
        batch: Vec<(K, watch::Sender<Outcome<V>>)>,
    ) {
        let chunk_size = inner.options.max_batch_size.unwrap_or(batch.len()).max(1);
        let mut chunks = Vec::new();
        let mut batch = batch.into_iter().peekable();
        while batch.peek().is_some() {
            chunks.push(batch.by_ref().take(chunk_size).collect::<Vec<_>>());
        }
        join_all(chunks.into_iter().map(|chunk| inner.run_batch(&name, chunk))).await;
    }

    /// Yields until a full poll of the calling task adds no keys to the
    /// queue.
    async fn settle(&self) {
        let mut seen = self.lock_state().pending.len();
        let mut stable_rounds = 0;
        while stable_rounds < SETTLE_ROUNDS {
            tokio::task::yield_now().await;
            let now = self.lock_state().pending.len();
            if now == seen {
                stable_rounds += 1;
            } else {
                seen = now;
                stable_rounds = 0;
            }
        }
    }

    async fn run_batch(&self, name: &str, chunk: Vec<(K, watch::Sender<Outcome<V>>)>) {
        let keys: Vec<K> = chunk.iter().map(|(key, _)| key.clone()).collect();
        tracing::debug!(loader = name, batch_size = keys.len(), "dispatching batch");

        let results: Vec<Result<V, LoadError>> = match self.batch_fn.load(&keys).await {
            Ok(values) if values.len() == keys.len() => values.into_iter()
                .map(|value| value.ok_or(LoadError::NotFound))
                .collect(),
            Ok(values) => {
                tracing::debug!(
                    loader = name,
                    expected = keys.len(),
                    actual = values.len(),
                    "batch function returned the wrong number of values",
                );
                let err = LoadError::LengthMismatch {
                    expected: keys.len(),
                    actual: values.len(),
                };
                vec![Err(err); keys.len()]
            },
            Err(err) => {
                tracing::debug!(loader = name, error = %err, "batch function failed");
                vec![Err(LoadError::Batch(err)); keys.len()]
            },
        };

        let mut state = self.lock_state();
        for ((key, sender), result) in chunk.into_iter().zip(results) {
            // Failed keys are retried by later loads; NotFound is an answer.
            let keep = self.options.cache
                && matches!(result, Ok(_) | Err(LoadError::NotFound));
            sender.send_replace(Some(result));
            if !keep {
                let ours = sender.subscribe();
                if state.entries.get(&key).is_some_and(|rx| rx.same_channel(&ours)) {
                    state.entries.remove(&key);
                }
            }
        }
    }
}

/// Held by the load leading a batch. Dropping it dispatches the queue.
struct BatchLead<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<LoaderInner<K, V>>,
    name: Arc<str>,
}

impl<K, V> Drop for BatchLead<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.inner.dispatch_pending(&self.name);
    }
}

impl<K, V> Clone for BatchLoader<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
        }
    }
}

impl<K, V> fmt::Debug for BatchLoader<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchLoader")
            .field("name", &self.name)
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}
