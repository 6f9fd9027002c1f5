//! Background job execution off the controller loop.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Semaphore;

/// Runs futures on the tokio runtime with a bounded concurrency limit.
#[derive(Clone)]
pub struct JobRunner {
    permits: Arc<Semaphore>,
}

impl JobRunner {
    /// Creates a runner allowing `max_jobs` concurrent jobs (at least one).
    pub fn new(max_jobs: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_jobs.max(1))),
        }
    }

    /// Spawns `job`; it waits for a free slot before running.
    pub fn spawn<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            job.await;
        });
    }

    /// Number of free slots.
    #[cfg(test)]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// Flag marking a single in-flight operation.
#[derive(Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    /// Marks the flag busy, or returns `None` if it already is.
    ///
    /// The flag is cleared when the returned guard is dropped.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.0)))
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears its [`BusyFlag`] on drop.
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
