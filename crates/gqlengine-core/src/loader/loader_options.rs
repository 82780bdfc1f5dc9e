/// Per-loader tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderOptions {
    /// Keep resolved values for the rest of the request. With `false`, a
    /// key is only shared among loads that arrive while it is pending.
    pub cache: bool,

    /// Split dispatches larger than this into several batch calls.
    pub max_batch_size: Option<usize>,
}
impl LoaderOptions {
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }
}
impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            cache: true,
            max_batch_size: None,
        }
    }
}
