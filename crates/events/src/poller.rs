//! Periodic driver for the [`BusinessEventWatcher`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::source::{Snapshot, SnapshotSource};
use crate::watcher::BusinessEventWatcher;

/// Background service that feeds fresh snapshots to the watcher.
pub struct WatchLoop {
    watcher: BusinessEventWatcher,
    source: Arc<dyn SnapshotSource>,
}

impl WatchLoop {
    pub fn new(watcher: BusinessEventWatcher, source: Arc<dyn SnapshotSource>) -> Self {
        Self { watcher, source }
    }

    /// Run the poll loop.
    ///
    /// The first tick fires immediately and seeds the watcher. The loop exits
    /// when the provided [`CancellationToken`] is cancelled.
    pub async fn run(mut self, cancel: CancellationToken) {
        let poll_interval = self.watcher.config().poll_interval;
        tracing::info!(
            interval_secs = poll_interval.as_secs(),
            "Business event watcher started"
        );

        let mut interval = tokio::time::interval(poll_interval.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Business event watcher stopping");
                    break;
                }
                _ = interval.tick() => {
                    let snapshot = Snapshot::fetch(self.source.as_ref()).await;
                    let report = self.watcher.observe(snapshot, Utc::now()).await;
                    if report.emitted > 0 || report.suppressed > 0 {
                        tracing::debug!(
                            emitted = report.emitted,
                            suppressed = report.suppressed,
                            "Watcher tick processed"
                        );
                    }
                }
            }
        }
    }
}
