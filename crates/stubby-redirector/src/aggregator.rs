use crate::error::{RedirectorError, Result};
use jiff::Timestamp;
use std::sync::Arc;
use stubby_core::Repository;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// A redirect that happened for `id` and still has to be counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub id: String,
    pub enqueued_at: Timestamp,
}

impl ClickEvent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enqueued_at: Timestamp::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct AggregatorSettings {
    /// Maximum number of queued, not yet applied click events.
    /// Producers wait for a free slot once the queue is full.
    #[builder(default = DEFAULT_QUEUE_CAPACITY)]
    pub capacity: usize,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Producer side of the click queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ClickSender {
    tx: mpsc::Sender<ClickEvent>,
}

impl ClickSender {
    /// Queues one click for `id`.
    ///
    /// Waits while the queue is full; clicks are never dropped. Fails only if
    /// the aggregator is gone.
    pub async fn send(&self, id: impl Into<String>) -> Result<()> {
        self.tx
            .send(ClickEvent::new(id))
            .await
            .map_err(|_| RedirectorError::QueueClosed)
    }

    /// Number of free slots left in the queue right now.
    pub fn available(&self) -> usize {
        self.tx.capacity()
    }

    #[cfg(test)]
    pub(crate) fn disconnected() -> Self {
        let (tx, _rx) = mpsc::channel(1);
        Self { tx }
    }
}

/// Totals reported by the aggregator once its queue has been drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatorReport {
    /// Clicks added to a record.
    pub applied: u64,
    /// Events whose identifier could not be counted (logged and skipped).
    pub failed: u64,
}

/// Handle to the single task that applies click events to the repository.
///
/// The task stops after every [`ClickSender`] has been dropped and the
/// remaining events have been applied.
#[derive(Debug)]
pub struct ClickAggregator {
    handle: JoinHandle<AggregatorReport>,
}

impl ClickAggregator {
    /// Spawns the consumer task on the current tokio runtime.
    pub fn spawn<R: Repository + ?Sized>(
        repository: Arc<R>,
        settings: AggregatorSettings,
    ) -> (ClickSender, Self) {
        let (tx, rx) = mpsc::channel(settings.capacity.max(1));
        let handle = tokio::spawn(run(repository, rx));
        (ClickSender { tx }, Self { handle })
    }

    /// Waits for the queue to drain and returns the totals.
    ///
    /// Only returns once all senders are dropped.
    pub async fn shutdown(self) -> Result<AggregatorReport> {
        self.handle
            .await
            .map_err(|err| RedirectorError::AggregatorFailed(err.to_string()))
    }
}

async fn run<R: Repository + ?Sized>(
    repository: Arc<R>,
    mut rx: mpsc::Receiver<ClickEvent>,
) -> AggregatorReport {
    let mut report = AggregatorReport::default();

    while let Some(event) = rx.recv().await {
        match repository.record_click(&event.id).await {
            Ok(()) => {
                report.applied += 1;
                trace!(
                    id = %event.id,
                    lag = ?Timestamp::now().duration_since(event.enqueued_at),
                    "click applied"
                );
            }
            Err(err) => {
                report.failed += 1;
                warn!(id = %event.id, error = %err, "failed to record click");
            }
        }
    }

    debug!(
        applied = report.applied,
        failed = report.failed,
        "click queue closed, aggregator stopped"
    );
    report
}
