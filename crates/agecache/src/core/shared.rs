//! Process-wide default cache

use crate::errors::Result;
use crate::runtime;
use once_cell::sync::OnceCell;

use super::builder::MemoryCacheBuilder;
use super::types::MemoryCache;

static SHARED: OnceCell<MemoryCache> = OnceCell::new();

impl MemoryCache {
    /// The process-wide cache, built on first access and never torn down.
    ///
    /// It runs on the background runtime so it stays usable no matter which
    /// runtime first touched it. Hosts that prefer explicit ownership can
    /// build their own cache and pass it around instead.
    pub fn shared() -> Result<&'static MemoryCache> {
        SHARED.get_or_try_init(|| {
            MemoryCacheBuilder::new()
                .runtime(runtime::background_handle()?)
                .build()
        })
    }
}
