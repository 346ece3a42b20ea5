//! Non-blocking cache operations

use crate::completion::Completion;
use crate::coordinator::ExclusiveScope;
use crate::eviction::expired_keys;
use crate::hooks::HookPoint;
use std::sync::Arc;
use std::time::Instant;

use super::types::MemoryCache;

impl<V> MemoryCache<V>
where
    V: ?Sized + Send + Sync + 'static,
{
    /// Look up the value stored under `key`.
    ///
    /// Runs concurrently with other lookups. A hit queues a refresh of the
    /// entry's recency timestamp behind the lookup rather than holding up
    /// the result for it.
    pub fn get(&self, key: impl Into<String>) -> Completion<Option<Arc<V>>> {
        let (tx, completion) = Completion::channel("get");
        self.submit_get(key.into(), move |_, _, value| {
            let _ = tx.send(value);
        });
        completion
    }

    /// Look up `key` and pass the result to `callback`
    pub fn get_with<F>(&self, key: impl Into<String>, callback: F)
    where
        F: FnOnce(&MemoryCache<V>, &str, Option<Arc<V>>) + Send + 'static,
    {
        self.submit_get(key.into(), callback);
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: Arc<V>) -> Completion<()> {
        let (tx, completion) = Completion::channel("set");
        self.submit_set(key.into(), value, move |_, _, _| {
            let _ = tx.send(());
        });
        completion
    }

    /// Store `value` under `key` and call `callback` once it is visible
    pub fn set_with<F>(&self, key: impl Into<String>, value: Arc<V>, callback: F)
    where
        F: FnOnce(&MemoryCache<V>, &str, Option<Arc<V>>) + Send + 'static,
    {
        self.submit_set(key.into(), value, callback);
    }

    /// Remove the entry for `key`, resolving to the removed value
    pub fn remove(&self, key: impl Into<String>) -> Completion<Option<Arc<V>>> {
        let (tx, completion) = Completion::channel("remove");
        self.submit_remove(key.into(), move |_, _, removed| {
            let _ = tx.send(removed);
        });
        completion
    }

    /// Remove the entry for `key` and pass the removed value to `callback`
    pub fn remove_with<F>(&self, key: impl Into<String>, callback: F)
    where
        F: FnOnce(&MemoryCache<V>, &str, Option<Arc<V>>) + Send + 'static,
    {
        self.submit_remove(key.into(), callback);
    }

    /// Remove every entry last accessed before `cutoff`, resolving to the
    /// number of entries removed. Entries accessed at exactly `cutoff` stay.
    pub fn trim(&self, cutoff: Instant) -> Completion<usize> {
        let (tx, completion) = Completion::channel("trim");
        self.submit_trim(cutoff, move |_, removed| {
            let _ = tx.send(removed);
        });
        completion
    }

    /// Trim to `cutoff` and call `callback` once done
    pub fn trim_with<F>(&self, cutoff: Instant, callback: F)
    where
        F: FnOnce(&MemoryCache<V>) + Send + 'static,
    {
        self.submit_trim(cutoff, move |cache, _| callback(cache));
    }

    /// Remove every entry without firing any hooks
    pub fn clear(&self) -> Completion<()> {
        let (tx, completion) = Completion::channel("clear");
        self.submit_clear(move |_| {
            let _ = tx.send(());
        });
        completion
    }

    /// Clear the cache and call `callback` once done
    pub fn clear_with<F>(&self, callback: F)
    where
        F: FnOnce(&MemoryCache<V>) + Send + 'static,
    {
        self.submit_clear(callback);
    }

    /// Number of entries currently stored
    pub fn len(&self) -> Completion<usize> {
        let (tx, completion) = Completion::channel("len");
        self.inner.coordinator.concurrent("len", move |store| {
            let _ = tx.send(store.len());
        });
        completion
    }

    fn submit_get<F>(&self, key: String, done: F)
    where
        F: FnOnce(&MemoryCache<V>, &str, Option<Arc<V>>) + Send + 'static,
    {
        let cache = self.clone();
        self.inner.coordinator.concurrent("get", move |store| {
            let read_at = Instant::now();
            let value = store.get(&key);
            drop(store);

            if value.is_some() {
                cache.inner.stats.record_hit();
                cache.refresh(key.clone(), read_at);
            } else {
                cache.inner.stats.record_miss();
            }
            done(&cache, &key, value);
        });
    }

    /// Best-effort recency update queued after a successful lookup. A trim
    /// admitted between the lookup and this refresh may still evict the
    /// entry.
    fn refresh(&self, key: String, read_at: Instant) {
        self.inner.coordinator.exclusive("refresh", move |mut store| {
            store.touch(&key, read_at);
        });
    }

    fn submit_set<F>(&self, key: String, value: Arc<V>, done: F)
    where
        F: FnOnce(&MemoryCache<V>, &str, Option<Arc<V>>) + Send + 'static,
    {
        let cache = self.clone();
        self.inner.coordinator.exclusive("set", move |mut store| {
            {
                let scope = ExclusiveScope::enter();
                let hooks = cache.hooks();
                hooks.fire(&scope, HookPoint::WillAdd, &cache, &key, &value);
                store.insert(key.clone(), Arc::clone(&value), Instant::now());
                cache.inner.stats.record_write();
                hooks.fire(&scope, HookPoint::DidAdd, &cache, &key, &value);
            }
            drop(store);

            done(&cache, &key, Some(value));
        });
    }

    fn submit_remove<F>(&self, key: String, done: F)
    where
        F: FnOnce(&MemoryCache<V>, &str, Option<Arc<V>>) + Send + 'static,
    {
        let cache = self.clone();
        self.inner.coordinator.exclusive("remove", move |mut store| {
            let removed = match store.get(&key) {
                Some(value) => {
                    let scope = ExclusiveScope::enter();
                    let hooks = cache.hooks();
                    hooks.fire(&scope, HookPoint::WillRemove, &cache, &key, &value);
                    store.remove(&key);
                    cache.inner.stats.record_removal();
                    hooks.fire(&scope, HookPoint::DidRemove, &cache, &key, &value);
                    Some(value)
                }
                None => None,
            };
            drop(store);

            done(&cache, &key, removed);
        });
    }

    pub(super) fn submit_trim<F>(&self, cutoff: Instant, done: F)
    where
        F: FnOnce(&MemoryCache<V>, usize) + Send + 'static,
    {
        let cache = self.clone();
        self.inner.coordinator.exclusive("trim", move |mut store| {
            let expired = expired_keys(&store, cutoff);
            if !expired.is_empty() {
                let scope = ExclusiveScope::enter();
                let hooks = cache.hooks();
                for key in &expired {
                    if let Some(value) = store.get(key) {
                        hooks.fire(&scope, HookPoint::WillRemove, &cache, key, &value);
                        store.remove(key);
                        hooks.fire(&scope, HookPoint::DidRemove, &cache, key, &value);
                    }
                }
                cache.inner.stats.record_evictions(expired.len() as u64);
                tracing::debug!(
                    "trimmed {} cache entries, {} remaining",
                    expired.len(),
                    store.len()
                );
            }
            drop(store);

            done(&cache, expired.len());
        });
    }

    fn submit_clear<F>(&self, done: F)
    where
        F: FnOnce(&MemoryCache<V>) + Send + 'static,
    {
        let cache = self.clone();
        self.inner.coordinator.exclusive("clear", move |mut store| {
            let removed = store.clear();
            cache.inner.stats.record_clear();
            tracing::debug!("cleared {} cache entries", removed);
            drop(store);

            done(&cache);
        });
    }
}
