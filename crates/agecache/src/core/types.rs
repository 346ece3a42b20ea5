//! Core cache types and structures

use crate::coordinator::Coordinator;
use crate::hooks::EventHooks;
use crate::stats::CacheStats;
use crate::store::EntryStore;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Thread-safe in-memory key/value cache.
///
/// Values are held by `Arc` and handed back as the same `Arc`; the cache
/// never copies or inspects them. The default value type lets unrelated
/// callers share one cache for arbitrary data.
pub struct MemoryCache<V: ?Sized = dyn Any + Send + Sync> {
    pub(super) inner: Arc<CacheInner<V>>,
}

pub(super) struct CacheInner<V: ?Sized> {
    /// Admission control over the entry store
    pub coordinator: Coordinator<EntryStore<V>>,
    /// Hooks fired around insertions and removals
    pub hooks: RwLock<EventHooks<V>>,
    /// Periodic trim state
    pub age_timer: Mutex<AgeTimer>,
    /// Statistics
    pub stats: CacheStats,
}

#[derive(Default)]
pub(super) struct AgeTimer {
    pub limit: Duration,
    pub task: Option<JoinHandle<()>>,
}

impl<V: ?Sized> Clone for MemoryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: ?Sized> Drop for CacheInner<V> {
    fn drop(&mut self) {
        if let Some(task) = self.age_timer.get_mut().task.take() {
            task.abort();
        }
    }
}

impl<V: ?Sized> std::fmt::Debug for MemoryCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("age_limit", &self.inner.age_timer.lock().limit)
            .field("stats", &self.inner.stats.snapshot())
            .finish()
    }
}

impl<V: ?Sized> MemoryCache<V> {
    /// Whether two handles refer to the same cache
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
