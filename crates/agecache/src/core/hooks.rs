//! Event hook registration

use crate::hooks::{EventHooks, HookPoint, ObjectHook};
use std::sync::Arc;

use super::types::MemoryCache;

impl<V> MemoryCache<V>
where
    V: ?Sized + Send + Sync + 'static,
{
    /// Called just before a value is stored, inside the exclusive context
    pub fn set_will_add<F>(&self, hook: F)
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.register(HookPoint::WillAdd, Arc::new(hook));
    }

    /// Called just after a value is stored, inside the exclusive context
    pub fn set_did_add<F>(&self, hook: F)
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.register(HookPoint::DidAdd, Arc::new(hook));
    }

    /// Called just before a value is removed or trimmed, inside the
    /// exclusive context. Not called by [`clear`](Self::clear).
    pub fn set_will_remove<F>(&self, hook: F)
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.register(HookPoint::WillRemove, Arc::new(hook));
    }

    /// Called just after a value is removed or trimmed, inside the exclusive
    /// context. Not called by [`clear`](Self::clear).
    pub fn set_did_remove<F>(&self, hook: F)
    where
        F: Fn(&MemoryCache<V>, &str, &Arc<V>) + Send + Sync + 'static,
    {
        self.register(HookPoint::DidRemove, Arc::new(hook));
    }

    /// Unregister the hook at `point`
    pub fn clear_hook(&self, point: HookPoint) {
        self.replace_hook(point, None);
    }

    pub fn has_hook(&self, point: HookPoint) -> bool {
        self.inner.hooks.read().is_set(point)
    }

    fn register(&self, point: HookPoint, hook: ObjectHook<V>) {
        self.replace_hook(point, Some(hook));
    }

    fn replace_hook(&self, point: HookPoint, hook: Option<ObjectHook<V>>) {
        *self.inner.hooks.write().slot(point) = hook;
    }

    pub(super) fn hooks(&self) -> EventHooks<V> {
        self.inner.hooks.read().clone()
    }
}
