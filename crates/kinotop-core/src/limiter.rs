use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimiterError {
    #[error("limiter capacity must be at least 1")]
    ZeroCapacity,
    #[error("limiter is closed")]
    Closed,
}

/// Bounded concurrency for async tasks.
///
/// At most `capacity` submitted tasks run at any instant. Extra submissions
/// wait in submission order: the semaphore underneath is fair, so a slot freed
/// by a settling task goes to the oldest waiter. A task is not started (its
/// closure is not even called) until it holds a slot.
///
/// Each caller gets back its own task's output, errors included; nothing one
/// task returns affects any other. Cloning shares the same slots.
#[derive(Debug, Clone)]
pub struct Limiter {
    permits: Arc<Semaphore>,
    capacity: usize,
    in_flight: Arc<AtomicUsize>,
}

impl Limiter {
    pub fn new(capacity: usize) -> Result<Self, LimiterError> {
        if capacity == 0 {
            return Err(LimiterError::ZeroCapacity);
        }
        Ok(Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tasks currently holding a slot.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run `task` once a slot is free and return its output.
    ///
    /// The slot is released when the task settles, or when the returned
    /// future is dropped.
    pub async fn submit<F, Fut, T>(&self, task: F) -> Result<T, LimiterError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _permit = self.permits.acquire().await.map_err(|_| LimiterError::Closed)?;
        let _slot = SlotGuard::enter(&self.in_flight);
        Ok(task().await)
    }
}

/// Keeps `in_flight` accurate even when a running task is cancelled.
/// Declared after the permit so it is dropped first.
struct SlotGuard<'a>(&'a AtomicUsize);

impl<'a> SlotGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
