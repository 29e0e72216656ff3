//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Gateway-local endpoints are registered explicitly; everything else
//! falls through to the forwarding handler, which consults the route
//! table.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete gateway router.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
        .fallback(handlers::proxy::forward_request)
}
