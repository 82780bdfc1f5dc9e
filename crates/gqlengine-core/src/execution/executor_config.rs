/// Knobs for an [`Executor`](crate::execution::Executor).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutorConfig {
    /// Attach source `locations` to outbound errors.
    pub include_error_locations: bool,

    /// Run top-level mutation fields one after another, in request order.
    pub serial_mutations: bool,
}
impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            include_error_locations: true,
            serial_mutations: true,
        }
    }
}
