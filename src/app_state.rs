//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{DashboardService, Forwarder, HealthService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 1:1 passthrough relay for the proxied routes.
    pub forwarder: Arc<Forwarder>,
    /// Dashboard fan-out aggregator.
    pub dashboard: Arc<DashboardService>,
    /// Upstream health fan-out.
    pub health: Arc<HealthService>,
}
