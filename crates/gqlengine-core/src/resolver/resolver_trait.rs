use crate::context::ExecutionContext;
use crate::resolver::Arguments;
use crate::resolver::Resolution;

/// Produces the value of one field for one parent object.
///
/// `parent` is the parent object's data (the root value for root fields).
/// `args` holds the field's arguments after coercion, with defaults applied.
pub trait Resolver: Send + Sync {
    fn resolve(
        &self,
        parent: &serde_json::Value,
        args: &Arguments,
        ctx: &ExecutionContext,
    ) -> Resolution;
}
