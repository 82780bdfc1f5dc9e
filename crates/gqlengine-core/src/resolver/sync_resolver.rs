use crate::context::ExecutionContext;
use crate::resolver::Arguments;
use crate::resolver::FieldResult;
use crate::resolver::Resolution;
use crate::resolver::ResolvedValue;
use crate::resolver::Resolver;
use std::marker::PhantomData;

/// Adapts a closure that computes its value immediately.
///
/// ```
/// use gqlengine_core::resolver::SyncResolver;
/// use serde_json::json;
///
/// let greeting = SyncResolver::new(|_parent, args, _ctx| {
///     let name: String = args.get_as("name")?;
///     Ok(json!(format!("hello, {name}")))
/// });
/// # let _ = greeting;
/// ```
pub struct SyncResolver<F, R> {
    func: F,
    _output: PhantomData<fn() -> R>,
}
impl<F, R> SyncResolver<F, R>
where
    F: Fn(&serde_json::Value, &Arguments, &ExecutionContext) -> FieldResult<R> + Send + Sync,
    R: Into<ResolvedValue>,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _output: PhantomData,
        }
    }
}
impl<F, R> Resolver for SyncResolver<F, R>
where
    F: Fn(&serde_json::Value, &Arguments, &ExecutionContext) -> FieldResult<R> + Send + Sync,
    R: Into<ResolvedValue>,
{
    fn resolve(
        &self,
        parent: &serde_json::Value,
        args: &Arguments,
        ctx: &ExecutionContext,
    ) -> Resolution {
        Resolution::Ready((self.func)(parent, args, ctx).map(Into::into))
    }
}
