use crate::loader::BatchError;
use crate::loader::BatchLoader;
use crate::loader::LoaderOptions;
use crate::loader::batch_fn;
use std::sync::Arc;
use std::sync::Mutex;

pub(super) type CallLog = Arc<Mutex<Vec<Vec<u32>>>>;

/// A loader mapping `k` to `"v{k}"` (and `0` to no value) that records the
/// keys of every batch call.
pub(super) fn recording_loader(options: LoaderOptions) -> (BatchLoader<u32, String>, CallLog) {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);
    let loader = BatchLoader::with_options(
        batch_fn(move |keys: Vec<u32>| {
            recorded.lock().unwrap().push(keys.clone());
            async move {
                Ok(keys.iter()
                    .map(|k| (*k != 0).then(|| format!("v{k}")))
                    .collect())
            }
        }),
        options,
    );
    (loader, calls)
}

pub(super) fn failing_loader(message: &'static str) -> (BatchLoader<u32, String>, CallLog) {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);
    let loader = BatchLoader::new(batch_fn(move |keys: Vec<u32>| {
        recorded.lock().unwrap().push(keys);
        async move { Err::<Vec<Option<String>>, _>(BatchError::new(message)) }
    }));
    (loader, calls)
}

pub(super) fn call_log(calls: &CallLog) -> Vec<Vec<u32>> {
    calls.lock().unwrap().clone()
}
