//! Typed HTTP client for upstream service calls.
//!
//! [`UpstreamClient`] wraps a single shared [`reqwest::Client`], so all
//! outbound calls draw from one connection pool. Each call carries its own
//! timeout; there are no retries and no side effects beyond the single
//! network request. Any HTTP response, success or error status alike, is
//! returned verbatim as [`UpstreamResponse`]; status interpretation belongs
//! to the caller.

use std::time::Duration;

use crate::domain::UpstreamService;
use crate::error::{FailureKind, GatewayError};

/// A single outbound request, fully specified by the caller.
#[derive(Debug)]
pub struct UpstreamRequest<'a> {
    /// Target service, used for failure attribution.
    pub service: UpstreamService,
    /// HTTP method.
    pub method: reqwest::Method,
    /// Full target URL, path already rewritten.
    pub url: String,
    /// `Authorization` header value, forwarded verbatim when present.
    /// The gateway never interprets or validates the token.
    pub authorization: Option<&'a str>,
    /// `Content-Type` header value.
    pub content_type: Option<&'a str>,
    /// Request body; `None` for bodiless methods.
    pub body: Option<Vec<u8>>,
    /// Per-call timeout.
    pub timeout: Duration,
}

/// A response received from an upstream, any status.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status code, verbatim.
    pub status: u16,
    /// `Content-Type` of the upstream response, if any.
    pub content_type: Option<String>,
    /// Response body, verbatim.
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// Whether the upstream answered with a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A call that produced no HTTP response at all.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{service} service {kind}: {message}")]
pub struct UpstreamFailure {
    /// Name of the service the call targeted.
    pub service: &'static str,
    /// Closed failure classification; only [`FailureKind::Timeout`] and
    /// [`FailureKind::Unreachable`] originate here.
    pub kind: FailureKind,
    /// Underlying transport error description.
    pub message: String,
}

impl From<UpstreamFailure> for GatewayError {
    fn from(failure: UpstreamFailure) -> Self {
        match failure.kind {
            FailureKind::Timeout => Self::UpstreamTimeout {
                service: failure.service,
            },
            _ => Self::UpstreamUnreachable {
                service: failure.service,
                reason: failure.message,
            },
        }
    }
}

/// Shared outbound HTTP client.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Builds the client with the gateway's user agent. Timeouts are set
    /// per call, not on the client, so each call's bound stays independent.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("eventide-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Internal(format!("http client init failed: {e}")))?;
        Ok(Self { http })
    }

    /// Issues one request and returns the upstream's response verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamFailure`] with [`FailureKind::Timeout`] when the
    /// per-call bound expires, or [`FailureKind::Unreachable`] on any
    /// network-level failure (connection refused, DNS, reset mid-body).
    pub async fn call(
        &self,
        request: UpstreamRequest<'_>,
    ) -> Result<UpstreamResponse, UpstreamFailure> {
        let service = request.service.name();

        let mut builder = self
            .http
            .request(request.method, &request.url)
            .timeout(request.timeout);
        if let Some(auth) = request.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::classify(service, &e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify(service, &e))?
            .to_vec();

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    /// Convenience for the bodiless `GET` calls the aggregator and health
    /// fan-out issue.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`UpstreamClient::call`].
    pub async fn get(
        &self,
        service: UpstreamService,
        url: String,
        timeout: Duration,
    ) -> Result<UpstreamResponse, UpstreamFailure> {
        self.call(UpstreamRequest {
            service,
            method: reqwest::Method::GET,
            url,
            authorization: None,
            content_type: None,
            body: None,
            timeout,
        })
        .await
    }

    fn classify(service: &'static str, error: &reqwest::Error) -> UpstreamFailure {
        let kind = if error.is_timeout() {
            FailureKind::Timeout
        } else {
            FailureKind::Unreachable
        };
        UpstreamFailure {
            service,
            kind,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;

    async fn spawn_server(app: Router) -> String {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn client() -> UpstreamClient {
        let Ok(client) = UpstreamClient::new() else {
            panic!("client init failed");
        };
        client
    }

    #[tokio::test]
    async fn unreachable_upstream_is_classified() {
        let result = client()
            .get(
                UpstreamService::Auth,
                // Port 1 is never listening.
                "http://127.0.0.1:1/health".to_string(),
                Duration::from_secs(2),
            )
            .await;

        let Err(failure) = result else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind, FailureKind::Unreachable);
        assert_eq!(failure.service, "auth");
    }

    #[tokio::test]
    async fn silent_upstream_times_out() {
        // A listener that accepts connections but never answers.
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let _hold = socket;
                    tokio::time::sleep(Duration::from_secs(30)).await;
                });
            }
        });

        let result = client()
            .get(
                UpstreamService::Event,
                format!("http://{addr}/health"),
                Duration::from_millis(200),
            )
            .await;

        let Err(failure) = result else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert_eq!(failure.service, "event");
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_classified() {
        let app = Router::new().route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "nothing here") }),
        );
        let base = spawn_server(app).await;

        let result = client()
            .get(
                UpstreamService::Vendor,
                format!("{base}/missing"),
                Duration::from_secs(2),
            )
            .await;

        let Ok(response) = result else {
            panic!("any HTTP response is a successful call");
        };
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.body, b"nothing here");
    }

    #[tokio::test]
    async fn authorization_is_forwarded_verbatim() {
        let app = Router::new().route(
            "/whoami",
            get(|headers: HeaderMap| async move {
                headers
                    .get(axum::http::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("missing")
                    .to_string()
            }),
        );
        let base = spawn_server(app).await;

        let result = client()
            .call(UpstreamRequest {
                service: UpstreamService::Auth,
                method: reqwest::Method::GET,
                url: format!("{base}/whoami"),
                authorization: Some("Bearer opaque-token"),
                content_type: None,
                body: None,
                timeout: Duration::from_secs(2),
            })
            .await;

        let Ok(response) = result else {
            panic!("expected response");
        };
        assert_eq!(response.body, b"Bearer opaque-token");
    }
}
