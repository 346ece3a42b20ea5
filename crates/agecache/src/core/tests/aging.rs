//! Age limit and periodic trim tests

use crate::config::CacheConfig;
use crate::core::MemoryCache;
use crate::errors::Result;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_age_limit_defaults_to_disabled() -> Result<()> {
    let cache: MemoryCache<i32> = MemoryCache::new()?;
    assert_eq!(cache.age_limit(), Duration::ZERO);

    cache.set_age_limit(Duration::from_secs(30));
    assert_eq!(cache.age_limit(), Duration::from_secs(30));

    cache.set_age_limit(Duration::ZERO);
    assert_eq!(cache.age_limit(), Duration::ZERO);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_config_starts_timer() -> Result<()> {
    let config = CacheConfig {
        age_limit: Duration::from_millis(50),
    };
    let cache: MemoryCache<i32> = MemoryCache::with_config(config)?;
    assert_eq!(cache.age_limit(), Duration::from_millis(50));

    cache.set("a", Arc::new(1)).await?;
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(cache.get("a").await?, None);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_periodic_trim_removes_idle_entries() -> Result<()> {
    let cache: MemoryCache<i32> = MemoryCache::new()?;
    cache.set_age_limit(Duration::from_millis(100));

    cache.set("a", Arc::new(1)).await?;
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(cache.get("a").await?, None);
    assert!(cache.stats().evictions >= 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_disabling_age_limit_stops_trimming() -> Result<()> {
    let cache: MemoryCache<i32> = MemoryCache::new()?;
    cache.set_age_limit(Duration::from_millis(100));

    // Let the running timer evict something first
    cache.set("stale", Arc::new(0)).await?;
    let started = std::time::Instant::now();
    while cache.stats().evictions == 0 {
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "periodic trim never ran"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    cache.set_age_limit(Duration::ZERO);
    let evictions = cache.stats().evictions;

    cache.set("a", Arc::new(1)).await?;
    tokio::time::sleep(Duration::from_millis(350)).await;

    assert!(cache.get("a").await?.is_some());
    assert_eq!(cache.stats().evictions, evictions);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_replacing_age_limit_cancels_previous_timer() -> Result<()> {
    let cache: MemoryCache<i32> = MemoryCache::new()?;
    cache.set_age_limit(Duration::from_millis(50));
    cache.set_age_limit(Duration::from_millis(60));
    cache.set_age_limit(Duration::ZERO);

    cache.set("a", Arc::new(1)).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Neither of the earlier timers survived the replacement
    assert!(cache.get("a").await?.is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_recently_read_entry_survives_periodic_trim() -> Result<()> {
    let cache: MemoryCache<i32> = MemoryCache::new()?;
    cache.set_age_limit(Duration::from_millis(400));
    cache.set("a", Arc::new(1)).await?;
    cache.set("b", Arc::new(2)).await?;

    // Ticks land near 400ms, 800ms and 1200ms. At the 800ms tick "a" has
    // been idle for the whole limit while "b" was last read at 700ms.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(cache.get("b").await?.is_some());
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(cache.get("b").await?.is_some());
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(cache.get("a").await?, None);
    assert!(cache.get("b").await?.is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_timer_stops_when_cache_dropped() -> Result<()> {
    let cache: MemoryCache<i32> = MemoryCache::new()?;
    cache.set_age_limit(Duration::from_millis(20));
    let weak = Arc::downgrade(&cache.inner);

    drop(cache);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(weak.upgrade().is_none());
    Ok(())
}
