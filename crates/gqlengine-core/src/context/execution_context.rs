use crate::context::ExecutionContextBuilder;
use crate::loader::BatchLoader;
use serde_json::Map;
use serde_json::Value;
use std::any::Any;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

pub(crate) type AnyValue = Box<dyn Any + Send + Sync>;

/// Per-request state handed to every resolver.
///
/// Holds the request's coerced variables, caller-supplied values (looked up
/// by type), named [`BatchLoader`]s and a cancellation flag. A context is
/// immutable once built and cheap to clone; clones share loaders and the
/// cancellation flag. Build a fresh one for every request.
#[derive(Clone)]
pub struct ExecutionContext {
    shared: Arc<SharedContext>,
    variables: Arc<Map<String, Value>>,
}

pub(crate) struct SharedContext {
    pub(crate) cancelled: AtomicBool,
    pub(crate) data: HashMap<TypeId, AnyValue>,
    pub(crate) loaders: HashMap<String, AnyValue>,
    pub(crate) root_value: Value,
}

impl ExecutionContext {
    pub fn builder() -> ExecutionContextBuilder {
        ExecutionContextBuilder::new()
    }

    pub(crate) fn from_shared(shared: SharedContext) -> Self {
        Self {
            shared: Arc::new(shared),
            variables: Arc::new(Map::new()),
        }
    }

    /// A context sharing everything with `self` except the variables.
    pub(crate) fn with_variables(&self, variables: Map<String, Value>) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            variables: Arc::new(variables),
        }
    }

    /// Stops new resolver dispatches for every request using this context.
    /// Batch dispatches already in flight still complete.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// The caller-supplied value of type `T`, if one was added with
    /// [`ExecutionContextBuilder::data()`].
    pub fn data<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.shared.data
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// The loader registered under `name`, if its key and value types match.
    pub fn loader<K, V>(&self, name: &str) -> Option<BatchLoader<K, V>>
    where
        K: Clone + Eq + Hash + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        self.shared.loaders
            .get(name)
            .and_then(|loader| loader.downcast_ref::<BatchLoader<K, V>>())
            .cloned()
    }

    /// The value root fields are resolved against.
    pub fn root_value(&self) -> &Value {
        &self.shared.root_value
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// The request's variables after coercion, with defaults applied.
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }
}
impl Default for ExecutionContext {
    fn default() -> Self {
        ExecutionContextBuilder::new().build()
    }
}
impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut loader_names: Vec<&str> = self.shared.loaders.keys().map(String::as_str).collect();
        loader_names.sort_unstable();
        f.debug_struct("ExecutionContext")
            .field("cancelled", &self.is_cancelled())
            .field("data_len", &self.shared.data.len())
            .field("loaders", &loader_names)
            .field("variables", &self.variables)
            .finish()
    }
}
