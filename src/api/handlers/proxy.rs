//! Passthrough handler: the router fallback that relays everything the
//! gateway does not serve itself.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use crate::app_state::AppState;
use crate::error::GatewayError;

/// Largest inbound body the gateway will buffer for forwarding.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Relays an unmatched request to its upstream via the route table.
///
/// The upstream's status code and body are returned verbatim; an upstream
/// that answered, with any status, never produces a gateway error.
///
/// # Errors
///
/// `404` when no route prefix matches, `400` when the inbound body exceeds
/// the buffer limit, `502` when the upstream produced no response.
pub async fn forward_request(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    let query = parts.uri.query().map(String::from);

    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| GatewayError::InvalidRequest(format!("unreadable request body: {e}")))?;

    let upstream = state
        .forwarder
        .forward(
            &parts.method,
            &path,
            query.as_deref(),
            &parts.headers,
            bytes.to_vec(),
        )
        .await?;

    let status = StatusCode::from_u16(upstream.status)
        .map_err(|e| GatewayError::Internal(format!("invalid upstream status: {e}")))?;
    let mut builder = Response::builder().status(status);
    if let Some(content_type) = upstream.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder
        .body(Body::from(upstream.body))
        .map_err(|e| GatewayError::Internal(format!("response assembly failed: {e}")))
}
