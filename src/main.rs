//! eventide-gateway server entry point.
//!
//! Starts the Axum HTTP server with the forwarding and aggregation
//! endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use eventide_gateway::api;
use eventide_gateway::app_state::AppState;
use eventide_gateway::config::GatewayConfig;
use eventide_gateway::domain::RouteTable;
use eventide_gateway::service::{DashboardService, Forwarder, HealthService};
use eventide_gateway::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting eventide-gateway");

    // Build the route table; an ambiguous configuration fails startup here.
    let table = Arc::new(RouteTable::from_config(&config)?);

    // Build the service layer around one shared outbound client
    let client = UpstreamClient::new()?;
    let forwarder = Arc::new(Forwarder::new(
        client.clone(),
        Arc::clone(&table),
        Duration::from_secs(config.forward_timeout_secs),
    ));
    let dashboard = Arc::new(DashboardService::new(client.clone(), &config));
    let health = Arc::new(HealthService::new(client, &config));

    // Build application state
    let app_state = AppState {
        forwarder,
        dashboard,
        health,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS policy: permissive when no origins are configured, otherwise the
/// exact configured list.
fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
