//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and the fixed JSON error shape the
//! gateway emits for every failure it originates itself. Responses the
//! upstream services produce — including their own error statuses — are
//! never wrapped in this type; they pass through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Closed classification of upstream call outcomes.
///
/// This is the complete set of ways a gateway-mediated call can go wrong;
/// there is no open-ended variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The upstream did not respond within the per-call bound.
    Timeout,
    /// Connection refused, DNS failure, or other network-level error.
    Unreachable,
    /// The upstream responded with a non-2xx status. Passed through on the
    /// forwarding path, treated as "no data" on the aggregation path.
    UpstreamError,
    /// A bug in gateway logic itself.
    InternalError,
}

impl FailureKind {
    /// Stable wire label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Unreachable => "unreachable",
            Self::UpstreamError => "upstream_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured JSON error response body.
///
/// All gateway-originated error responses follow this shape:
/// ```json
/// {
///   "error": "unreachable",
///   "details": "event service unreachable: connection refused"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short machine-readable label identifying the failure kind.
    pub error: String,
    /// Human-readable message naming the failed service where applicable.
    pub details: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant               | HTTP Status               |
/// |-----------------------|---------------------------|
/// | `UpstreamTimeout`     | 502 Bad Gateway           |
/// | `UpstreamUnreachable` | 502 Bad Gateway           |
/// | `RouteNotFound`       | 404 Not Found             |
/// | `InvalidRequest`      | 400 Bad Request           |
/// | `Internal`            | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The targeted upstream did not respond within the timeout bound.
    #[error("{service} service timed out")]
    UpstreamTimeout {
        /// Name of the upstream service that timed out.
        service: &'static str,
    },

    /// The targeted upstream could not be reached at all.
    #[error("{service} service unreachable: {reason}")]
    UpstreamUnreachable {
        /// Name of the unreachable upstream service.
        service: &'static str,
        /// Network-level failure description.
        reason: String,
    },

    /// No route table entry matches the requested path.
    #[error("no route matches {0}")]
    RouteNotFound(String),

    /// The inbound request is malformed (e.g. oversized body, bad params).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal gateway error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the stable `error` field label for this variant.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::UpstreamTimeout { .. } => FailureKind::Timeout.as_str(),
            Self::UpstreamUnreachable { .. } => FailureKind::Unreachable.as_str(),
            Self::RouteNotFound(_) => "not_found",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Internal(_) => FailureKind::InternalError.as_str(),
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamTimeout { .. } | Self::UpstreamUnreachable { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.kind_label().to_string(),
            details: self.to_string(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
