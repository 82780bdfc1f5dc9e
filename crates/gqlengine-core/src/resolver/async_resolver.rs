use crate::context::ExecutionContext;
use crate::resolver::Arguments;
use crate::resolver::FieldResult;
use crate::resolver::Resolution;
use crate::resolver::ResolvedValue;
use crate::resolver::Resolver;
use futures::FutureExt;
use std::marker::PhantomData;

/// Adapts a closure that returns a future.
///
/// The future must be `'static`: copy whatever it needs out of the parent,
/// arguments and context before the `async move` block.
///
/// ```
/// use gqlengine_core::resolver::AsyncResolver;
/// use serde_json::json;
///
/// let author = AsyncResolver::new(|parent, _args, _ctx| {
///     let author_id = parent["authorId"].clone();
///     async move { Ok(json!({ "id": author_id })) }
/// });
/// # let _ = author;
/// ```
pub struct AsyncResolver<F, R> {
    func: F,
    _output: PhantomData<fn() -> R>,
}
impl<F, Fut, R> AsyncResolver<F, R>
where
    F: Fn(&serde_json::Value, &Arguments, &ExecutionContext) -> Fut + Send + Sync,
    Fut: Future<Output = FieldResult<R>> + Send + 'static,
    R: Into<ResolvedValue>,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _output: PhantomData,
        }
    }
}
impl<F, Fut, R> Resolver for AsyncResolver<F, R>
where
    F: Fn(&serde_json::Value, &Arguments, &ExecutionContext) -> Fut + Send + Sync,
    Fut: Future<Output = FieldResult<R>> + Send + 'static,
    R: Into<ResolvedValue>,
{
    fn resolve(
        &self,
        parent: &serde_json::Value,
        args: &Arguments,
        ctx: &ExecutionContext,
    ) -> Resolution {
        let future = (self.func)(parent, args, ctx);
        Resolution::Deferred(future.map(|result| result.map(Into::into)).boxed())
    }
}
