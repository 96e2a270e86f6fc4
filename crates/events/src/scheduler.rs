//! Delayed task submission.
//!
//! The notification store never touches timers directly; it asks a
//! [`Scheduler`] to run a future after a delay and keeps the returned
//! [`ScheduledTask`] so the work can be cancelled. Tasks sleep on the tokio
//! clock, so tests drive them deterministically with a paused runtime.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

/// Spawns delayed work on the current tokio runtime.
///
/// Cloning is cheap; clones share one shutdown token.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    shutdown: CancellationToken,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has elapsed.
    ///
    /// The task is dropped without running if the handle is cancelled or the
    /// scheduler is shut down first.
    pub fn submit<F>(&self, delay: Duration, task: F) -> ScheduledTask
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(delay) => task.await,
            }
        });

        ScheduledTask {
            abort: handle.abort_handle(),
        }
    }

    /// Cancel every pending task submitted through this scheduler.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

/// Handle to a submitted task.
#[derive(Debug)]
pub struct ScheduledTask {
    abort: AbortHandle,
}

impl ScheduledTask {
    /// Cancel the task. A no-op if it already ran.
    pub fn cancel(&self) {
        self.abort.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn counting_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn task_runs_after_delay() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        scheduler.submit(Duration::from_secs(5), counting_task(&counter));

        tokio::time::sleep(Duration::from_millis(4_990)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_runs() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let task = scheduler.submit(Duration::from_secs(1), counting_task(&counter));
        task.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_drops_all_pending_tasks() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        scheduler.submit(Duration::from_secs(1), counting_task(&counter));
        scheduler.clone().submit(Duration::from_secs(3), counting_task(&counter));
        scheduler.shutdown();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
