//! Integration tests for the blocking API
//!
//! These run on plain test threads, so caches fall back to the background
//! runtime.

use agecache::{CacheError, MemoryCache};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_blocking_round_trip() {
    init_tracing();
    let cache: MemoryCache<String> = MemoryCache::new().unwrap();

    cache
        .set_blocking("key", Arc::new("value".to_string()))
        .unwrap();
    assert_eq!(
        cache.get_blocking("key").unwrap().as_deref().map(String::as_str),
        Some("value")
    );
    assert_eq!(cache.len_blocking().unwrap(), 1);

    let removed = cache.remove_blocking("key").unwrap();
    assert!(removed.is_some());
    assert_eq!(cache.get_blocking("key").unwrap(), None);
}

#[test]
fn test_blocking_trim_and_clear() {
    init_tracing();
    let cache: MemoryCache<u32> = MemoryCache::new().unwrap();

    cache.set_blocking("old", Arc::new(1)).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    let cutoff = Instant::now();
    cache.set_blocking("new", Arc::new(2)).unwrap();

    assert_eq!(cache.trim_blocking(cutoff).unwrap(), 1);
    assert_eq!(cache.get_blocking("old").unwrap(), None);

    cache.clear_blocking().unwrap();
    assert_eq!(cache.len_blocking().unwrap(), 0);
}

#[test]
fn test_completion_wait() {
    let cache: MemoryCache<u32> = MemoryCache::new().unwrap();

    let pending = cache.set("key", Arc::new(5));
    assert_eq!(pending.operation(), "set");
    pending.wait().unwrap();

    assert_eq!(cache.get("key").wait().unwrap().as_deref(), Some(&5));
}

#[test]
fn test_blocking_inside_hook_is_rejected() {
    let cache: MemoryCache<u32> = MemoryCache::new().unwrap();
    let (tx, rx) = mpsc::channel();
    let tx = std::sync::Mutex::new(tx);

    cache.set_did_remove(move |cache, _, _| {
        let outcome = cache.clear_blocking();
        let _ = tx.lock().unwrap().send(outcome);
    });

    cache.set_blocking("key", Arc::new(1)).unwrap();
    cache.remove_blocking("key").unwrap();

    let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(
        outcome,
        Err(CacheError::ReentrantBlockingCall { operation: "clear" })
    ));
}

#[test]
fn test_blocking_inside_completion_callback_is_rejected() {
    let cache: MemoryCache<u32> = MemoryCache::new().unwrap();
    let (tx, rx) = mpsc::channel();

    cache.get_with("key", move |cache, _, _| {
        let _ = tx.send(cache.len_blocking());
    });

    let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let err = outcome.unwrap_err();
    assert!(matches!(err, CacheError::BlockingInAsyncContext { .. }));
    assert!(err.is_usage_violation());
}

#[test]
fn test_blocking_inside_async_runtime_is_rejected() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let cache: MemoryCache<u32> = MemoryCache::new().unwrap();
        let err = cache.get_blocking("key").unwrap_err();
        assert!(matches!(
            err,
            CacheError::BlockingInAsyncContext { operation: "get" }
        ));

        // The async form works from the same place
        assert_eq!(cache.get("key").await.unwrap(), None);
    });
}

#[test]
fn test_cache_built_in_current_thread_runtime_serves_blocking_callers() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let cache: MemoryCache<u32> = runtime.block_on(async { MemoryCache::new().unwrap() });

    // Nothing drives `runtime` from here on, so work parked on it would
    // never complete
    let worker = cache.clone();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let outcome = worker
            .set_blocking("key", Arc::new(7))
            .and_then(|()| worker.get_blocking("key"));
        let _ = tx.send(outcome);
    });

    let value = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("blocking call on a plain thread hung")
        .unwrap();
    assert_eq!(value.as_deref(), Some(&7));
    drop(runtime);
}

#[test]
fn test_age_limit_with_blocking_api() {
    let cache: MemoryCache<u32> = MemoryCache::builder()
        .age_limit(Duration::from_millis(100))
        .build()
        .unwrap();

    cache.set_blocking("key", Arc::new(1)).unwrap();
    std::thread::sleep(Duration::from_millis(400));

    assert_eq!(cache.get_blocking("key").unwrap(), None);
}
