use std::{collections::HashSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{AssignmentRecord, SheetUpdateResponse},
};
use tracing::{debug, info};

/// Backing spreadsheet. Receives the full list of occupied slots on every call
/// and returns a human-readable status line.
#[async_trait]
pub trait SheetWriter: Send + Sync {
    async fn write_rows(&self, rows: &[AssignmentRecord]) -> Result<String, ApiException>;
}

/// Logs the rows it would write. No external sheet is touched.
pub struct LoggingSheetWriter {
    sheet_id: Option<String>,
    delay: Duration,
}

impl LoggingSheetWriter {
    pub fn new(sheet_id: Option<String>, delay: Duration) -> Self {
        Self { sheet_id, delay }
    }
}

#[async_trait]
impl SheetWriter for LoggingSheetWriter {
    async fn write_rows(&self, rows: &[AssignmentRecord]) -> Result<String, ApiException> {
        info!(
            rows = rows.len(),
            sheet_id = self.sheet_id.as_deref().unwrap_or("<unset>"),
            "placeholder: would update sheet"
        );
        debug!(?rows, "placeholder sheet rows");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(match &self.sheet_id {
            Some(sheet_id) => format!(
                "This is a placeholder. {} rows would be written to sheet {sheet_id}.",
                rows.len()
            ),
            None => "This is a placeholder. No actual Google Sheet was updated.".to_string(),
        })
    }
}

#[derive(Clone)]
pub struct ApiContext {
    pub sheet: Arc<dyn SheetWriter>,
}

pub fn update_sheet_route() -> &'static str {
    "/api/update-sheet"
}

pub async fn update_sheet(
    ctx: &ApiContext,
    rows: Vec<AssignmentRecord>,
) -> Result<SheetUpdateResponse, ApiError> {
    validate_rows(&rows)?;
    let message = ctx.sheet.write_rows(&rows).await?;
    Ok(SheetUpdateResponse::ok(message))
}

fn validate_rows(rows: &[AssignmentRecord]) -> Result<(), ApiError> {
    let mut companies = HashSet::new();
    let mut positions = HashSet::new();

    for row in rows {
        if row.section.as_str().trim().is_empty() || row.company_id.as_str().trim().is_empty() {
            return Err(validation("section and companyId must not be empty"));
        }
        if row.position == 0 {
            return Err(validation(format!(
                "position in section {} must start at 1",
                row.section
            )));
        }
        if !companies.insert(&row.company_id) {
            return Err(validation(format!(
                "company {} appears in more than one slot",
                row.company_id
            )));
        }
        if !positions.insert((&row.section, row.position)) {
            return Err(validation(format!(
                "slot {} in section {} is listed twice",
                row.position, row.section
            )));
        }
    }
    Ok(())
}

fn validation(message: impl Into<String>) -> ApiError {
    ApiError::new(ErrorCode::Validation, message)
}
