use std::sync::Arc;

use shared::{
    domain::{CompanyId, DropSource, SlotId},
    protocol::SheetUpdateResponse,
};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, info, warn};

pub mod error;
pub mod gateway;
pub mod layout;
pub mod publisher;
pub mod roster;
pub mod store;

pub use error::{GatewayError, SaveError, StoreError};
pub use gateway::{HttpSheetGateway, MissingSheetGateway, PlaceholderSheetGateway, SheetGateway};
pub use publisher::{PushEvent, SnapshotPublisher};
pub use store::{AssignOutcome, AssignmentStore, RemoveOutcome};

/// Message shown to the user after an explicit save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveNotice {
    pub title: String,
    pub description: String,
    pub is_error: bool,
}

impl SaveNotice {
    pub fn from_result(result: &Result<SheetUpdateResponse, SaveError>) -> Self {
        match result {
            Ok(response) => Self {
                title: "Layout saved".to_string(),
                description: response.message.clone(),
                is_error: false,
            },
            Err(err) => Self {
                title: "Error saving layout".to_string(),
                description: err.to_string(),
                is_error: true,
            },
        }
    }
}

/// Owns the assignment state for one editing session and forwards every change
/// to the sheet gateway in the background.
///
/// Must be created inside a tokio runtime.
pub struct FloorPlanController {
    store: AssignmentStore,
    gateway: Arc<dyn SheetGateway>,
    publisher: SnapshotPublisher,
    worker: JoinHandle<()>,
    events: broadcast::Sender<PushEvent>,
}

impl FloorPlanController {
    pub fn new(gateway: Arc<dyn SheetGateway>) -> Self {
        Self::with_store(AssignmentStore::standard(), gateway)
    }

    pub fn with_store(store: AssignmentStore, gateway: Arc<dyn SheetGateway>) -> Self {
        let (events, _) = broadcast::channel(64);
        let (publisher, worker) = SnapshotPublisher::spawn(Arc::clone(&gateway), events.clone());
        Self {
            store,
            gateway,
            publisher,
            worker,
            events,
        }
    }

    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    pub fn subscribe_push_events(&self) -> broadcast::Receiver<PushEvent> {
        self.events.subscribe()
    }

    /// A company tile was dropped on a slot.
    pub fn on_drop(
        &mut self,
        target: &SlotId,
        company_id: &CompanyId,
        source: DropSource,
    ) -> Result<AssignOutcome, StoreError> {
        let outcome = self
            .store
            .assign(target, company_id, source)
            .inspect_err(|err| debug!(error = %err, "drop ignored"))?;
        if outcome == AssignOutcome::Unchanged {
            debug!(slot = %target, company = %company_id, "company already in slot");
            return Ok(outcome);
        }

        info!(slot = %target, company = %company_id, ?outcome, "company assigned");
        self.push_snapshot();
        Ok(outcome)
    }

    /// The remove button on a placed company was pressed.
    pub fn on_remove_requested(
        &mut self,
        company_id: &CompanyId,
    ) -> Result<RemoveOutcome, StoreError> {
        let outcome = self
            .store
            .remove(company_id)
            .inspect_err(|err| debug!(error = %err, "remove ignored"))?;
        info!(company = %company_id, ?outcome, "company returned to pool");

        if outcome != RemoveOutcome::AlreadyUnassigned {
            self.push_snapshot();
        }
        Ok(outcome)
    }

    /// Sends the current layout and waits for the gateway's answer.
    pub async fn save(&self) -> Result<SheetUpdateResponse, SaveError> {
        let records = self.store.snapshot();
        let count = records.len();
        let gateway = Arc::clone(&self.gateway);

        match gateway.update_sheet(records).await {
            Ok(response) => {
                info!(records = count, "layout saved");
                Ok(response)
            }
            Err(source) => {
                error!(records = count, error = %source, "layout save failed");
                Err(SaveError {
                    records: count,
                    source,
                })
            }
        }
    }

    /// Stops accepting pushes and waits for queued ones to finish.
    pub async fn shutdown(self) {
        let Self {
            publisher, worker, ..
        } = self;
        drop(publisher);
        if let Err(err) = worker.await {
            warn!(error = %err, "snapshot publisher ended abnormally");
        }
    }

    fn push_snapshot(&self) {
        if !self.publisher.publish(self.store.snapshot()) {
            warn!("snapshot publisher is gone; change not pushed");
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
