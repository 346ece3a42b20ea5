//! In-process key/value cache with recency tracking
//!
//! This crate provides a thread-safe memory cache with:
//! - Parallel lookups, with writes serialized against everything else
//! - Per-entry access timestamps and trimming by cutoff
//! - Periodic trimming driven by an age limit
//! - Hooks around every insertion and removal
//! - Non-blocking, callback and blocking forms of every operation
//!
//! ```no_run
//! use agecache::MemoryCache;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> agecache::Result<()> {
//! let cache: MemoryCache<String> = MemoryCache::builder()
//!     .age_limit(Duration::from_secs(60))
//!     .build()?;
//!
//! cache.set_blocking("greeting", Arc::new("hello".to_string()))?;
//! assert_eq!(
//!     cache.get_blocking("greeting")?.as_deref().map(String::as_str),
//!     Some("hello")
//! );
//!
//! // On memory pressure the host flushes everything, skipping hooks.
//! cache.clear_blocking()?;
//! # Ok(())
//! # }
//! ```

pub mod completion;
pub mod config;
pub mod coordinator;
pub mod core;
pub mod errors;
pub mod eviction;
pub mod hooks;
pub mod runtime;
pub mod stats;
pub mod store;

pub use completion::Completion;
pub use config::CacheConfig;
pub use core::{MemoryCache, MemoryCacheBuilder};
pub use errors::{CacheError, Result};
pub use hooks::{HookPoint, ObjectHook};
pub use stats::StatsSnapshot;
