use shared::domain::{CompanyId, SlotId};
use thiserror::Error;

/// A gesture or layout referenced something the store cannot accept. The store
/// is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown slot {0}")]
    UnknownSlot(SlotId),
    #[error("unknown company {0}")]
    UnknownCompany(CompanyId),
    #[error("company {0} is placed in more than one slot")]
    DuplicatePlacement(CompanyId),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid sheet endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("sheet request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sheet endpoint returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("sheet update rejected: {0}")]
    Rejected(String),
    #[error("sheet gateway is unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
#[error("failed to save {records} assignments: {source}")]
pub struct SaveError {
    pub records: usize,
    #[source]
    pub source: GatewayError,
}
