//! Access coordinator
//!
//! Admits concurrent operations in parallel and runs exclusive operations
//! alone. Every submitted job goes through a single dispatcher task which
//! takes the matching guard on a fair `tokio::sync::RwLock` in submission
//! order and hands it to a worker on the blocking pool. Because the lock
//! queues waiters first-in first-out, nothing submitted after an exclusive
//! job can be admitted before it, while a run of concurrent jobs is admitted
//! back to back without waiting for each other to finish.

use std::cell::Cell;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

type ConcurrentJob<T> = Box<dyn FnOnce(OwnedRwLockReadGuard<T>) + Send>;
type ExclusiveJob<T> = Box<dyn FnOnce(OwnedRwLockWriteGuard<T>) + Send>;

enum Job<T> {
    Concurrent(&'static str, ConcurrentJob<T>),
    Exclusive(&'static str, ExclusiveJob<T>),
}

thread_local! {
    static EXCLUSIVE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Marks the current thread as running inside an exclusive operation for as
/// long as it is alive.
pub struct ExclusiveScope {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl ExclusiveScope {
    pub(crate) fn enter() -> Self {
        EXCLUSIVE_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self {
            _not_send: std::marker::PhantomData,
        }
    }

    /// Whether the calling thread is inside an exclusive operation
    pub fn is_active() -> bool {
        EXCLUSIVE_DEPTH.with(|depth| depth.get() > 0)
    }
}

impl Drop for ExclusiveScope {
    fn drop(&mut self) {
        EXCLUSIVE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Serializes exclusive access to `T` against all other access
pub struct Coordinator<T> {
    jobs: UnboundedSender<Job<T>>,
    handle: Handle,
}

impl<T> Coordinator<T>
where
    T: Send + Sync + 'static,
{
    /// Take ownership of `state` and start the dispatcher on `handle`
    pub fn new(state: T, handle: Handle) -> Self {
        let (jobs, queue) = mpsc::unbounded_channel();
        let state = Arc::new(RwLock::new(state));
        handle.spawn(dispatch(state, queue, handle.clone()));
        Self { jobs, handle }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Run `job` with shared access, possibly in parallel with other
    /// concurrent jobs
    pub fn concurrent<F>(&self, operation: &'static str, job: F)
    where
        F: FnOnce(OwnedRwLockReadGuard<T>) + Send + 'static,
    {
        self.submit(Job::Concurrent(operation, Box::new(job)));
    }

    /// Run `job` alone once every earlier job has been admitted and every
    /// running concurrent job has finished
    pub fn exclusive<F>(&self, operation: &'static str, job: F)
    where
        F: FnOnce(OwnedRwLockWriteGuard<T>) + Send + 'static,
    {
        self.submit(Job::Exclusive(operation, Box::new(job)));
    }

    fn submit(&self, job: Job<T>) {
        if let Err(rejected) = self.jobs.send(job) {
            let operation = match rejected.0 {
                Job::Concurrent(operation, _) | Job::Exclusive(operation, _) => operation,
            };
            tracing::warn!(
                "cache dispatcher has shut down, dropping '{}' operation",
                operation
            );
        }
    }
}

async fn dispatch<T>(state: Arc<RwLock<T>>, mut queue: UnboundedReceiver<Job<T>>, handle: Handle)
where
    T: Send + Sync + 'static,
{
    while let Some(job) = queue.recv().await {
        match job {
            Job::Concurrent(operation, run) => {
                let guard = Arc::clone(&state).read_owned().await;
                tracing::trace!("admitted concurrent '{}'", operation);
                handle.spawn_blocking(move || run(guard));
            }
            Job::Exclusive(operation, run) => {
                let guard = Arc::clone(&state).write_owned().await;
                tracing::trace!("admitted exclusive '{}'", operation);
                handle.spawn_blocking(move || run(guard));
            }
        }
    }

    tracing::debug!("cache dispatcher exiting, all handles dropped");
}
