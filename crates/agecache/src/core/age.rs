//! Periodic trimming driven by the age limit

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

use super::types::{CacheInner, MemoryCache};

impl<V> MemoryCache<V>
where
    V: ?Sized + Send + Sync + 'static,
{
    /// Maximum time an entry may go unaccessed before periodic trimming
    /// removes it. `Duration::ZERO` means periodic trimming is off.
    pub fn age_limit(&self) -> Duration {
        self.inner.age_timer.lock().limit
    }

    /// Set the age limit. A positive limit (re)starts a timer with the same
    /// period that trims entries older than the limit; zero stops it. A trim
    /// already submitted by the old timer still runs.
    pub fn set_age_limit(&self, limit: Duration) {
        let mut timer = self.inner.age_timer.lock();
        if let Some(task) = timer.task.take() {
            task.abort();
        }
        timer.limit = limit;

        if limit.is_zero() {
            tracing::debug!("cache age limit disabled, periodic trim stopped");
            return;
        }

        let inner = Arc::downgrade(&self.inner);
        timer.task = Some(
            self.inner
                .coordinator
                .handle()
                .spawn(run_age_timer(inner, limit)),
        );
        tracing::debug!("cache age limit set to {:?}, periodic trim started", limit);
    }
}

async fn run_age_timer<V>(weak: Weak<CacheInner<V>>, limit: Duration)
where
    V: ?Sized + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + limit, limit);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let Some(inner) = weak.upgrade() else {
            break;
        };
        let cache = MemoryCache { inner };
        match Instant::now().checked_sub(limit) {
            Some(cutoff) => cache.submit_trim(cutoff, |_, _| {}),
            None => tracing::trace!("age limit exceeds process uptime, skipping trim"),
        }
    }
}
