use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{SheetUpdateRequest, SheetUpdateResponse},
};
use sheet_api::{update_sheet, update_sheet_route, ApiContext, LoggingSheetWriter};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

mod config;

use config::load_settings;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let api = ApiContext {
        sheet: Arc::new(LoggingSheetWriter::new(
            settings.sheet_id.clone(),
            Duration::from_millis(settings.sheet_delay_ms),
        )),
    };

    let state = AppState { api };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, sheet_id = ?settings.sheet_id, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(update_sheet_route(), post(http_update_sheet))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_update_sheet(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SheetUpdateRequest>, JsonRejection>,
) -> Result<Json<SheetUpdateResponse>, (StatusCode, Json<ApiError>)> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejected update-sheet body");
        (
            rejection.status(),
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;

    let rows = req.data.len();
    let response = update_sheet(&state.api, req.data).await.map_err(|e| {
        warn!(rows, code = ?e.code, message = %e.message, "sheet update failed");
        (status_for(e.code), Json(e))
    })?;
    info!(rows, "sheet updated");
    Ok(Json(response))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body, body::Body, http::Request};
    use tower::ServiceExt;

    fn test_app(max_body_bytes: usize) -> Router {
        let api = ApiContext {
            sheet: Arc::new(LoggingSheetWriter::new(None, Duration::ZERO)),
        };
        build_router(Arc::new(AppState { api }), max_body_bytes)
    }

    fn update_request(body: impl Into<Body>) -> Request<Body> {
        Request::post("/api/update-sheet")
            .header("content-type", "application/json")
            .body(body.into())
            .expect("request")
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let request = Request::get("/healthz")
            .body(Body::empty())
            .expect("request");
        let response = test_app(1024).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(body.as_ref(), b"ok");
    }

    #[tokio::test]
    async fn update_sheet_accepts_snapshot() {
        let payload = serde_json::json!({
            "data": [
                { "section": "B-Top", "position": 1, "companyId": "company-1", "companyName": "Apple" },
                { "section": "B-Top", "position": 2, "companyId": "company-2", "companyName": "Google" },
            ]
        });
        let response = test_app(64 * 1024)
            .oneshot(update_request(payload.to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let dto: SheetUpdateResponse = serde_json::from_slice(&body).expect("json");
        assert!(dto.success);
        assert!(dto.message.contains("placeholder"));
    }

    #[tokio::test]
    async fn empty_snapshot_is_accepted() {
        let response = test_app(1024)
            .oneshot(update_request(r#"{"data":[]}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_returns_error_envelope() {
        let response = test_app(1024)
            .oneshot(update_request(r#"{"rows": 3}"#))
            .await
            .expect("response");
        assert!(response.status().is_client_error());

        let body = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let err: ApiError = serde_json::from_slice(&body).expect("json");
        assert!(matches!(err.code, ErrorCode::Validation));
    }

    #[tokio::test]
    async fn duplicate_company_is_a_bad_request() {
        let payload = serde_json::json!({
            "data": [
                { "section": "B-Top", "position": 1, "companyId": "company-1", "companyName": "Apple" },
                { "section": "C-Top", "position": 1, "companyId": "company-1", "companyName": "Apple" },
            ]
        });
        let response = test_app(64 * 1024)
            .oneshot(update_request(payload.to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let padding = "x".repeat(4096);
        let payload = format!(r#"{{"data":[],"padding":"{padding}"}}"#);
        let response = test_app(512)
            .oneshot(update_request(payload))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
