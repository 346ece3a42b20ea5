//! Worker runtime selection
//!
//! Cache work runs on a tokio runtime: the dispatcher and age timer as async
//! tasks, job bodies on its blocking pool. Hosts can supply their own handle;
//! otherwise the cache joins the multi-threaded runtime it was created in.
//! A `current_thread` runtime only makes progress while something is inside
//! its `block_on`, so caches created there, or outside any runtime, use a
//! process-wide background runtime instead.

use crate::errors::{CacheError, Result};
use once_cell::sync::OnceCell;
use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

static BACKGROUND: OnceCell<Runtime> = OnceCell::new();

/// Handle to the process-wide background runtime, starting it on first use
pub fn background_handle() -> Result<Handle> {
    let runtime = BACKGROUND.get_or_try_init(|| {
        tracing::debug!("starting background cache runtime");
        Builder::new_multi_thread()
            .thread_name("agecache-worker")
            .enable_all()
            .build()
            .map_err(|source| CacheError::Runtime { source })
    })?;
    Ok(runtime.handle().clone())
}

/// The multi-threaded runtime the caller is running in, or the background
/// runtime
pub fn current_or_background() -> Result<Handle> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => Ok(handle),
        Ok(_) => {
            tracing::debug!("current runtime is single-threaded, using background runtime");
            background_handle()
        }
        Err(_) => background_handle(),
    }
}
