//! REST endpoint handlers organized by resource.

pub mod currency;
pub mod dashboard;
pub mod proxy;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the gateway-local resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::routes())
        .merge(currency::routes())
}
