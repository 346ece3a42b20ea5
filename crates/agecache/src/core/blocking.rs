//! Blocking mirrors of the cache operations
//!
//! Each method submits the same operation as its non-blocking counterpart
//! and parks the calling thread until it completes. Calling any of them from
//! inside an event hook, an exclusive operation or a tokio runtime returns an
//! error immediately instead of deadlocking.

use crate::completion::ensure_blocking_allowed;
use crate::errors::Result;
use std::sync::Arc;
use std::time::Instant;

use super::types::MemoryCache;

impl<V> MemoryCache<V>
where
    V: ?Sized + Send + Sync + 'static,
{
    pub fn get_blocking(&self, key: impl Into<String>) -> Result<Option<Arc<V>>> {
        ensure_blocking_allowed("get")?;
        self.get(key).wait()
    }

    pub fn set_blocking(&self, key: impl Into<String>, value: Arc<V>) -> Result<()> {
        ensure_blocking_allowed("set")?;
        self.set(key, value).wait()
    }

    pub fn remove_blocking(&self, key: impl Into<String>) -> Result<Option<Arc<V>>> {
        ensure_blocking_allowed("remove")?;
        self.remove(key).wait()
    }

    pub fn trim_blocking(&self, cutoff: Instant) -> Result<usize> {
        ensure_blocking_allowed("trim")?;
        self.trim(cutoff).wait()
    }

    pub fn clear_blocking(&self) -> Result<()> {
        ensure_blocking_allowed("clear")?;
        self.clear().wait()
    }

    pub fn len_blocking(&self) -> Result<usize> {
        ensure_blocking_allowed("len")?;
        self.len().wait()
    }
}
