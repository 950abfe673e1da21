use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CompanyId, SectionId};

/// One occupied slot, flattened for the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub section: SectionId,
    pub position: u32,
    pub company_id: CompanyId,
    pub company_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetUpdateRequest {
    pub data: Vec<AssignmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetUpdateResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SheetUpdateResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            updated_at: Some(Utc::now()),
        }
    }
}
