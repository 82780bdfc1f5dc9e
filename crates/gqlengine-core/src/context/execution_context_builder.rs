use crate::context::ExecutionContext;
use crate::context::execution_context::AnyValue;
use crate::context::execution_context::SharedContext;
use crate::loader::BatchLoader;
use serde_json::Value;
use std::any::Any;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::AtomicBool;

/// Utility for building an [`ExecutionContext`].
///
/// ```
/// use gqlengine_core::context::ExecutionContext;
/// use gqlengine_core::loader::batch_fn;
/// use gqlengine_core::loader::BatchLoader;
///
/// struct CurrentUser(String);
///
/// let users = BatchLoader::new(batch_fn(|ids: Vec<u64>| async move {
///     Ok(ids.iter().map(|id| Some(format!("user-{id}"))).collect())
/// }));
/// let ctx = ExecutionContext::builder()
///     .data(CurrentUser("alice".to_string()))
///     .loader("users", users)
///     .build();
///
/// assert_eq!(ctx.data::<CurrentUser>().unwrap().0, "alice");
/// assert!(ctx.loader::<u64, String>("users").is_some());
/// ```
#[derive(Default)]
pub struct ExecutionContextBuilder {
    data: HashMap<TypeId, AnyValue>,
    loaders: HashMap<String, AnyValue>,
    root_value: Option<Value>,
}
impl ExecutionContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> ExecutionContext {
        ExecutionContext::from_shared(SharedContext {
            cancelled: AtomicBool::new(false),
            data: self.data,
            loaders: self.loaders,
            root_value: self.root_value.unwrap_or_else(|| Value::Object(Default::default())),
        })
    }

    /// Adds a caller-supplied value, retrievable by type with
    /// [`ExecutionContext::data()`]. A second value of the same type replaces
    /// the first.
    pub fn data<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.data.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    /// Registers a loader under `name`. The name also labels the loader's
    /// batch dispatches in logs.
    pub fn loader<K, V>(mut self, name: impl Into<String>, loader: BatchLoader<K, V>) -> Self
    where
        K: Clone + Eq + Hash + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let name = name.into();
        let loader = loader.named(name.as_str());
        self.loaders.insert(name, Box::new(loader));
        self
    }

    /// Sets the value root fields resolve against. Defaults to `{}`.
    pub fn root_value(mut self, root_value: Value) -> Self {
        self.root_value = Some(root_value);
        self
    }
}
