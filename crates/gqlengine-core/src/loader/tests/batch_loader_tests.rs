use crate::loader::BatchError;
use crate::loader::BatchLoader;
use crate::loader::LoadError;
use crate::loader::LoaderOptions;
use crate::loader::batch_fn;
use crate::loader::tests::utils::call_log;
use crate::loader::tests::utils::failing_loader;
use crate::loader::tests::utils::recording_loader;

#[tokio::test]
async fn concurrent_loads_share_one_batch_call() {
    let (loader, calls) = recording_loader(LoaderOptions::default());

    let (a, b, a_again) = tokio::join!(loader.load(1), loader.load(2), loader.load(1));

    assert_eq!(a, Ok("v1".to_string()));
    assert_eq!(b, Ok("v2".to_string()));
    assert_eq!(a_again, Ok("v1".to_string()));
    assert_eq!(call_log(&calls), vec![vec![1, 2]]);
}

#[tokio::test]
async fn load_many_preserves_request_order_with_duplicates() {
    let (loader, calls) = recording_loader(LoaderOptions::default());

    let results = loader.load_many([3, 1, 3, 2, 1]).await;

    let values: Vec<String> = results.into_iter().map(Result::unwrap).collect();
    assert_eq!(values, ["v3", "v1", "v3", "v2", "v1"]);
    assert_eq!(call_log(&calls), vec![vec![3, 1, 2]]);
}

#[tokio::test]
async fn resolved_keys_are_served_from_cache() {
    let (loader, calls) = recording_loader(LoaderOptions::default());

    assert_eq!(loader.load(7).await, Ok("v7".to_string()));
    assert_eq!(loader.load(7).await, Ok("v7".to_string()));

    assert_eq!(call_log(&calls), vec![vec![7]]);
}

#[tokio::test]
async fn disabling_cache_refetches_resolved_keys() {
    let (loader, calls) = recording_loader(LoaderOptions::default().with_cache(false));

    let (first, same_batch) = tokio::join!(loader.load(7), loader.load(7));
    let later = loader.load(7).await;

    assert_eq!(first, Ok("v7".to_string()));
    assert_eq!(same_batch, Ok("v7".to_string()));
    assert_eq!(later, Ok("v7".to_string()));
    assert_eq!(call_log(&calls), vec![vec![7], vec![7]]);
}

#[tokio::test]
async fn max_batch_size_splits_dispatch() {
    let (loader, calls) = recording_loader(LoaderOptions::default().with_max_batch_size(2));

    let results = loader.load_many(1..=5).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(call_log(&calls), vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[tokio::test]
async fn missing_value_fails_only_that_key() {
    let (loader, _calls) = recording_loader(LoaderOptions::default());

    let (missing, present) = tokio::join!(loader.load(0), loader.load(4));

    assert_eq!(missing, Err(LoadError::NotFound));
    assert_eq!(present, Ok("v4".to_string()));
}

#[tokio::test]
async fn batch_error_fails_every_caller() {
    let (loader, calls) = failing_loader("backend down");

    let results = loader.load_many([1, 2, 1]).await;

    let expected = Err(LoadError::Batch(BatchError::new("backend down")));
    assert_eq!(results, vec![expected.clone(), expected.clone(), expected]);
    assert_eq!(call_log(&calls), vec![vec![1, 2]]);
}

#[tokio::test]
async fn failed_keys_are_retried_by_later_loads() {
    let (loader, calls) = failing_loader("flaky");

    assert!(loader.load(1).await.is_err());
    assert!(loader.load(1).await.is_err());

    assert_eq!(call_log(&calls), vec![vec![1], vec![1]]);
}

#[tokio::test]
async fn wrong_result_length_fails_the_batch() {
    let loader: BatchLoader<u32, u32> = BatchLoader::new(batch_fn(|_keys: Vec<u32>| async {
        Ok(vec![Some(1)])
    }));

    let results = loader.load_many([1, 2]).await;

    let expected = Err(LoadError::LengthMismatch { expected: 2, actual: 1 });
    assert_eq!(results, vec![expected.clone(), expected]);
}

#[tokio::test]
async fn clear_evicts_cached_keys() {
    let (loader, calls) = recording_loader(LoaderOptions::default());

    loader.load(1).await.unwrap();
    loader.load(2).await.unwrap();
    loader.clear(&1);
    loader.load(1).await.unwrap();
    loader.load(2).await.unwrap();
    loader.clear_all();
    loader.load(2).await.unwrap();

    assert_eq!(call_log(&calls), vec![vec![1], vec![2], vec![1], vec![2]]);
}

#[tokio::test]
async fn primed_keys_skip_the_batch_function() {
    let (loader, calls) = recording_loader(LoaderOptions::default());
    loader.prime(9, "primed".to_string());

    assert_eq!(loader.load(9).await, Ok("primed".to_string()));
    assert!(call_log(&calls).is_empty());
}

#[tokio::test]
async fn clones_share_queue_and_cache() {
    let (loader, calls) = recording_loader(LoaderOptions::default());
    let clone = loader.clone();

    let (a, b) = tokio::join!(loader.load(1), clone.load(1));

    assert_eq!(a, b);
    assert_eq!(call_log(&calls), vec![vec![1]]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn loads_resolve_on_multi_thread_runtime() {
    let (loader, calls) = recording_loader(LoaderOptions::default());

    let results = loader.load_many(1..=50).await;

    assert_eq!(results.len(), 50);
    assert!(results.iter().all(Result::is_ok));
    let log = call_log(&calls);
    assert_eq!(log.len(), 1, "{log:?}");
    let mut keys = log[0].clone();
    keys.sort_unstable();
    assert_eq!(keys, (1..=50).collect::<Vec<u32>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sibling_loads_coalesce_on_multi_thread_runtime() {
    let (loader, calls) = recording_loader(LoaderOptions::default());

    for _ in 0..20 {
        loader.clear_all();
        let loads = (1..=30).map(|key| {
            let loader = loader.clone();
            async move {
                tokio::task::yield_now().await;
                loader.load(key % 10 + 1).await
            }
        });
        let results = futures::future::join_all(loads).await;
        assert!(results.iter().all(Result::is_ok));
    }

    let log = call_log(&calls);
    assert_eq!(log.len(), 20);
    assert!(log.iter().all(|keys| keys.len() == 10), "{log:?}");
}

#[tokio::test]
async fn cancelled_leading_load_still_dispatches_queue() {
    let (loader, calls) = recording_loader(LoaderOptions::default());

    let mut leader = Box::pin(loader.load(1));
    let mut follower = Box::pin(loader.load(2));
    // Poll both once so the leader opens the queue and the follower joins it.
    assert!(futures::poll!(leader.as_mut()).is_pending());
    assert!(futures::poll!(follower.as_mut()).is_pending());
    drop(leader);

    assert_eq!(follower.await, Ok("v2".to_string()));
    assert_eq!(call_log(&calls), vec![vec![1, 2]]);
}
