//! Completion signals for submitted operations
//!
//! Every non-blocking cache method enqueues its work immediately and hands
//! back a [`Completion`]. Await it from async code, or call
//! [`Completion::wait`] to block the current thread until the effect of the
//! operation is visible.

use crate::coordinator::ExclusiveScope;
use crate::errors::{CacheError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Resolves once the operation it was returned from has taken effect
#[must_use = "operations run regardless, but their result is only observable through the completion"]
pub struct Completion<T> {
    operation: &'static str,
    rx: oneshot::Receiver<T>,
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("operation", &self.operation)
            .finish()
    }
}

impl<T> Completion<T> {
    pub(crate) fn channel(operation: &'static str) -> (oneshot::Sender<T>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { operation, rx })
    }

    /// Name of the operation this completion belongs to
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Block the calling thread until the operation completes.
    ///
    /// Fails fast instead of deadlocking when called from inside an exclusive
    /// cache operation or event hook, or from a thread driving a tokio
    /// runtime.
    pub fn wait(self) -> Result<T> {
        ensure_blocking_allowed(self.operation)?;
        let operation = self.operation;
        self.rx
            .blocking_recv()
            .map_err(|_| CacheError::Closed { operation })
    }
}

impl<T> Future for Completion<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let operation = this.operation;
        Pin::new(&mut this.rx)
            .poll(cx)
            .map(|result| result.map_err(|_| CacheError::Closed { operation }))
    }
}

/// Refuse blocking calls that could never return
pub(crate) fn ensure_blocking_allowed(operation: &'static str) -> Result<()> {
    if ExclusiveScope::is_active() {
        return Err(CacheError::ReentrantBlockingCall { operation });
    }

    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(CacheError::BlockingInAsyncContext { operation });
    }

    Ok(())
}
