//! System endpoints: the gateway's own liveness probe.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
struct LivenessResponse {
    status: String,
    service: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Gateway liveness.
///
/// Reports only the gateway process itself; it does not touch upstreams
/// and therefore always answers `200`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Gateway liveness",
    description = "Returns gateway process status, version, and current timestamp. Never depends on upstream availability.",
    responses(
        (status = 200, description = "Gateway is up", body = LivenessResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
