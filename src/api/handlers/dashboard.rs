//! Dashboard aggregation endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DashboardResponse, HealthReport};
use crate::app_state::AppState;

/// `GET /api/dashboard` — Cross-service dashboard composition.
///
/// Fans out to the event, vendor, and invoice services in parallel and
/// merges the results. Always answers `200`: a failed upstream degrades
/// its fields to defaults instead of failing the response.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    summary = "Composed dashboard view",
    description = "Merges event, vendor, and invoice analytics into one payload. Unavailable upstreams contribute defaults and are listed in `degradedServices`.",
    responses(
        (status = 200, description = "Best-effort composite, possibly degraded", body = DashboardResponse),
    )
)]
pub async fn dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.compose().await)
}

/// `GET /api/dashboard/health` — Upstream reachability report.
///
/// Probes the aggregation dependencies in parallel. Always answers `200`;
/// outages show up in the report body, never as an endpoint failure.
#[utoipa::path(
    get,
    path = "/api/dashboard/health",
    tag = "Dashboard",
    summary = "Aggregation dependency health",
    description = "Parallel health probe across the registered upstream services with per-service reachability flags.",
    responses(
        (status = 200, description = "Reachability report", body = HealthReport),
    )
)]
pub async fn dashboard_health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.health.probe_all().await)
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/dashboard/health", get(dashboard_health_handler))
}
