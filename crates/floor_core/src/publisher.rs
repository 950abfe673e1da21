use std::sync::Arc;

use shared::protocol::AssignmentRecord;
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::gateway::SheetGateway;

/// Result of one background push, for anyone watching the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    Pushed { records: usize, message: String },
    Failed { records: usize, error: String },
}

/// Hands snapshots to a background worker so the caller never waits on the
/// gateway. Snapshots that queue up behind a slow push are collapsed into the
/// newest one.
pub struct SnapshotPublisher {
    tx: mpsc::UnboundedSender<Vec<AssignmentRecord>>,
}

impl SnapshotPublisher {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn(
        gateway: Arc<dyn SheetGateway>,
        events: broadcast::Sender<PushEvent>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(gateway, rx, events));
        (Self { tx }, worker)
    }

    /// Queues a snapshot. Returns `false` when the worker has stopped.
    pub fn publish(&self, records: Vec<AssignmentRecord>) -> bool {
        self.tx.send(records).is_ok()
    }
}

async fn run_worker(
    gateway: Arc<dyn SheetGateway>,
    mut rx: mpsc::UnboundedReceiver<Vec<AssignmentRecord>>,
    events: broadcast::Sender<PushEvent>,
) {
    while let Some(mut records) = rx.recv().await {
        let mut superseded = 0usize;
        while let Ok(newer) = rx.try_recv() {
            records = newer;
            superseded += 1;
        }
        if superseded > 0 {
            debug!(superseded, "dropping snapshots replaced by a newer one");
        }

        let count = records.len();
        let event = match gateway.update_sheet(records).await {
            Ok(response) => {
                info!(records = count, message = %response.message, "snapshot pushed");
                PushEvent::Pushed {
                    records: count,
                    message: response.message,
                }
            }
            Err(err) => {
                warn!(records = count, error = %err, "snapshot push failed");
                PushEvent::Failed {
                    records: count,
                    error: err.to_string(),
                }
            }
        };
        let _ = events.send(event);
    }
    debug!("snapshot publisher stopped");
}
