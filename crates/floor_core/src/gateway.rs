use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiError,
    protocol::{AssignmentRecord, SheetUpdateRequest, SheetUpdateResponse},
};
use tracing::{debug, info};
use url::Url;

use crate::error::GatewayError;

pub const UPDATE_SHEET_ROUTE: &str = "api/update-sheet";
pub const SIMULATED_SHEET_DELAY: Duration = Duration::from_secs(1);

/// Destination for assignment snapshots. Every call carries the complete
/// layout, so implementations never need earlier calls to make sense of a
/// later one.
#[async_trait]
pub trait SheetGateway: Send + Sync {
    async fn update_sheet(
        &self,
        records: Vec<AssignmentRecord>,
    ) -> Result<SheetUpdateResponse, GatewayError>;
}

/// Stands in for the spreadsheet: logs what would be written and succeeds
/// after a fixed delay.
pub struct PlaceholderSheetGateway {
    delay: Duration,
}

impl PlaceholderSheetGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for PlaceholderSheetGateway {
    fn default() -> Self {
        Self::new(SIMULATED_SHEET_DELAY)
    }
}

#[async_trait]
impl SheetGateway for PlaceholderSheetGateway {
    async fn update_sheet(
        &self,
        records: Vec<AssignmentRecord>,
    ) -> Result<SheetUpdateResponse, GatewayError> {
        info!(
            records = records.len(),
            "placeholder: snapshot would be sent to the sheet"
        );
        debug!(?records, "placeholder sheet payload");
        tokio::time::sleep(self.delay).await;
        Ok(SheetUpdateResponse::ok(
            "This is a placeholder. In a real app, data would be sent to Google Sheets.",
        ))
    }
}

pub struct MissingSheetGateway;

#[async_trait]
impl SheetGateway for MissingSheetGateway {
    async fn update_sheet(
        &self,
        _records: Vec<AssignmentRecord>,
    ) -> Result<SheetUpdateResponse, GatewayError> {
        Err(GatewayError::Unavailable)
    }
}

/// Posts snapshots to the update-sheet endpoint of a floor-plan server.
pub struct HttpSheetGateway {
    http: Client,
    endpoint: Url,
}

impl HttpSheetGateway {
    pub fn new(server_url: &str) -> Result<Self, GatewayError> {
        let mut base = server_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)?.join(UPDATE_SHEET_ROUTE)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SheetGateway for HttpSheetGateway {
    async fn update_sheet(
        &self,
        records: Vec<AssignmentRecord>,
    ) -> Result<SheetUpdateResponse, GatewayError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&SheetUpdateRequest { data: records })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|err| err.message)
                .unwrap_or(body);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: SheetUpdateResponse = res.json().await?;
        if !body.success {
            return Err(GatewayError::Rejected(body.message));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_joined_onto_server_url() {
        let gateway = HttpSheetGateway::new("http://127.0.0.1:8443").expect("gateway");
        assert_eq!(
            gateway.endpoint().as_str(),
            "http://127.0.0.1:8443/api/update-sheet"
        );

        let nested = HttpSheetGateway::new("http://fair.example/planner/").expect("gateway");
        assert_eq!(
            nested.endpoint().as_str(),
            "http://fair.example/planner/api/update-sheet"
        );
    }

    #[test]
    fn rejects_unparseable_server_url() {
        assert!(matches!(
            HttpSheetGateway::new("not a url"),
            Err(GatewayError::Endpoint(_))
        ));
    }

    #[tokio::test]
    async fn placeholder_always_succeeds() {
        let gateway = PlaceholderSheetGateway::new(Duration::ZERO);
        let response = gateway.update_sheet(Vec::new()).await.expect("update");
        assert!(response.success);
        assert!(response.message.contains("placeholder"));
    }
}
