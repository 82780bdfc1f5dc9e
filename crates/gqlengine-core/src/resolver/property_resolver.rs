use crate::context::ExecutionContext;
use crate::resolver::Arguments;
use crate::resolver::Resolution;
use crate::resolver::ResolvedValue;
use crate::resolver::Resolver;

/// Reads a named key off the parent JSON object.
///
/// This is what runs for every field without a bound resolver (reading the
/// field's own name). Binding one explicitly maps a field onto a
/// differently-named key.
#[derive(Clone, Debug)]
pub struct PropertyResolver {
    property: String,
}
impl PropertyResolver {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    pub(crate) fn read(parent: &serde_json::Value, property: &str) -> ResolvedValue {
        parent.get(property)
            .cloned()
            .map_or(ResolvedValue::Null, ResolvedValue::from)
    }
}
impl Resolver for PropertyResolver {
    fn resolve(
        &self,
        parent: &serde_json::Value,
        _args: &Arguments,
        _ctx: &ExecutionContext,
    ) -> Resolution {
        Resolution::ready(Self::read(parent, &self.property))
    }
}
