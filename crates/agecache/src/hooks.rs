//! Event hooks fired around insertions and removals
//!
//! Hooks run synchronously inside the exclusive context of the mutation they
//! surround, while every other operation on the cache is suspended. A hook may
//! submit further non-blocking operations to the cache, which queue behind the
//! current one, but must not call any of the blocking methods: those fail with
//! [`CacheError::ReentrantBlockingCall`](crate::CacheError::ReentrantBlockingCall).

use crate::core::MemoryCache;
use crate::coordinator::ExclusiveScope;
use std::sync::Arc;

/// Callback receiving the cache, the key and the value being added or removed
pub type ObjectHook<V> = Arc<dyn Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync>;

/// The mutation a hook is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    WillAdd,
    DidAdd,
    WillRemove,
    DidRemove,
}

/// Registered hooks. Cloning is cheap; the cache snapshots the set at the
/// start of every exclusive operation so registration never blocks on one.
pub struct EventHooks<V: ?Sized> {
    will_add: Option<ObjectHook<V>>,
    did_add: Option<ObjectHook<V>>,
    will_remove: Option<ObjectHook<V>>,
    did_remove: Option<ObjectHook<V>>,
}

impl<V: ?Sized> Default for EventHooks<V> {
    fn default() -> Self {
        Self {
            will_add: None,
            did_add: None,
            will_remove: None,
            did_remove: None,
        }
    }
}

impl<V: ?Sized> Clone for EventHooks<V> {
    fn clone(&self) -> Self {
        Self {
            will_add: self.will_add.clone(),
            did_add: self.did_add.clone(),
            will_remove: self.will_remove.clone(),
            did_remove: self.did_remove.clone(),
        }
    }
}

impl<V: ?Sized> EventHooks<V> {
    pub(crate) fn slot(&mut self, point: HookPoint) -> &mut Option<ObjectHook<V>> {
        match point {
            HookPoint::WillAdd => &mut self.will_add,
            HookPoint::DidAdd => &mut self.did_add,
            HookPoint::WillRemove => &mut self.will_remove,
            HookPoint::DidRemove => &mut self.did_remove,
        }
    }

    fn get(&self, point: HookPoint) -> Option<&ObjectHook<V>> {
        match point {
            HookPoint::WillAdd => self.will_add.as_ref(),
            HookPoint::DidAdd => self.did_add.as_ref(),
            HookPoint::WillRemove => self.will_remove.as_ref(),
            HookPoint::DidRemove => self.did_remove.as_ref(),
        }
    }

    pub fn is_set(&self, point: HookPoint) -> bool {
        self.get(point).is_some()
    }

    /// Invoke the hook for `point`, if one is registered. Must be called with
    /// the exclusive guard held.
    pub(crate) fn fire(
        &self,
        _scope: &ExclusiveScope,
        point: HookPoint,
        cache: &MemoryCache<V>,
        key: &str,
        value: &Arc<V>,
    ) {
        if let Some(hook) = self.get(point) {
            tracing::trace!("firing {:?} hook for key '{}'", point, key);
            hook(cache, key, value);
        }
    }
}
