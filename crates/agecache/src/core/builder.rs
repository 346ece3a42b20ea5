//! Cache builder and initialization

use crate::config::CacheConfig;
use crate::coordinator::Coordinator;
use crate::errors::Result;
use crate::hooks::{EventHooks, HookPoint, ObjectHook};
use crate::runtime;
use crate::stats::CacheStats;
use crate::store::EntryStore;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

use super::types::{AgeTimer, CacheInner, MemoryCache};

/// Builder for [`MemoryCache`]
pub struct MemoryCacheBuilder<V: ?Sized = dyn Any + Send + Sync> {
    config: CacheConfig,
    handle: Option<Handle>,
    hooks: EventHooks<V>,
}

impl<V> Default for MemoryCacheBuilder<V>
where
    V: ?Sized + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryCacheBuilder<V>
where
    V: ?Sized + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            config: CacheConfig::default(),
            handle: None,
            hooks: EventHooks::default(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    pub fn age_limit(mut self, limit: Duration) -> Self {
        self.config.age_limit = limit;
        self
    }

    /// Run cache work on the given runtime instead of the ambient or
    /// background one. The runtime must have its time driver enabled for the
    /// age limit to work.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn will_add<F>(self, hook: F) -> Self
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.hook(HookPoint::WillAdd, hook)
    }

    pub fn did_add<F>(self, hook: F) -> Self
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.hook(HookPoint::DidAdd, hook)
    }

    pub fn will_remove<F>(self, hook: F) -> Self
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.hook(HookPoint::WillRemove, hook)
    }

    pub fn did_remove<F>(self, hook: F) -> Self
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.hook(HookPoint::DidRemove, hook)
    }

    fn hook<F>(mut self, point: HookPoint, hook: F) -> Self
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        let hook: ObjectHook<V> = Arc::new(hook);
        *self.hooks.slot(point) = Some(hook);
        self
    }

    /// Build the cache and start its dispatcher, plus the age timer when an
    /// age limit is configured
    pub fn build(self) -> Result<MemoryCache<V>> {
        let handle = match self.handle {
            Some(handle) => handle,
            None => runtime::current_or_background()?,
        };

        let inner = Arc::new(CacheInner {
            coordinator: Coordinator::new(EntryStore::new(), handle),
            hooks: RwLock::new(self.hooks),
            age_timer: Mutex::new(AgeTimer::default()),
            stats: CacheStats::default(),
        });
        let cache = MemoryCache { inner };

        if self.config.trims_periodically() {
            cache.set_age_limit(self.config.age_limit);
        }

        Ok(cache)
    }
}

impl<V> MemoryCache<V>
where
    V: ?Sized + Send + Sync + 'static,
{
    /// Create a cache with the default configuration
    pub fn new() -> Result<Self> {
        MemoryCacheBuilder::new().build()
    }

    /// Create a cache from a configuration
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        MemoryCacheBuilder::new().config(config).build()
    }

    pub fn builder() -> MemoryCacheBuilder<V> {
        MemoryCacheBuilder::new()
    }

    /// Runtime executing this cache's work
    pub fn handle(&self) -> &Handle {
        self.inner.coordinator.handle()
    }

    /// Snapshot of the operation counters
    pub fn stats(&self) -> crate::stats::StatsSnapshot {
        self.inner.stats.snapshot()
    }
}
