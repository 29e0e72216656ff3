//! 1:1 request forwarding to a single upstream service.
//!
//! The forwarder is a thin synchronous relay: route lookup, path rewrite,
//! one upstream call, verbatim response passthrough. It is not a
//! resilience layer: no retries, no response reinterpretation. An
//! upstream's own error status (404, 500, …) passes through unchanged;
//! only a call that produced no response at all becomes a gateway `502`.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, Method, header};

use crate::domain::RouteTable;
use crate::error::GatewayError;
use crate::upstream::{UpstreamClient, UpstreamRequest, UpstreamResponse};

/// Relay for all passthrough routes.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: UpstreamClient,
    table: Arc<RouteTable>,
    timeout: Duration,
}

impl Forwarder {
    /// Creates a forwarder over the given route table.
    #[must_use]
    pub fn new(client: UpstreamClient, table: Arc<RouteTable>, timeout: Duration) -> Self {
        Self {
            client,
            table,
            timeout,
        }
    }

    /// Forwards one inbound request to its upstream.
    ///
    /// Method and body are copied unchanged (body dropped for `GET`); the
    /// `authorization` header is copied verbatim when present and omitted
    /// otherwise; `content-type` defaults to `application/json`. The query
    /// string is preserved.
    ///
    /// # Errors
    ///
    /// [`GatewayError::RouteNotFound`] when no prefix matches,
    /// [`GatewayError::UpstreamTimeout`] / [`GatewayError::UpstreamUnreachable`]
    /// when the upstream produced no response.
    pub async fn forward(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        headers: &HeaderMap,
        body: Vec<u8>,
    ) -> Result<UpstreamResponse, GatewayError> {
        let matched = self
            .table
            .match_path(path)
            .ok_or_else(|| GatewayError::RouteNotFound(path.to_string()))?;
        let service = matched.route.service;
        let target = matched.route.target_url(matched.suffix, query);

        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json");
        let body = if *method == Method::GET {
            None
        } else {
            Some(body)
        };

        let outbound = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|_| GatewayError::InvalidRequest(format!("unsupported method {method}")))?;

        let result = self
            .client
            .call(UpstreamRequest {
                service,
                method: outbound,
                url: target.clone(),
                authorization,
                content_type: Some(content_type),
                body,
                timeout: self.timeout,
            })
            .await;

        match result {
            Ok(response) => {
                tracing::info!(
                    method = %method,
                    path,
                    target = %target,
                    status = response.status,
                    "forwarded request"
                );
                Ok(response)
            }
            Err(failure) => {
                tracing::warn!(
                    method = %method,
                    path,
                    target = %target,
                    kind = failure.kind.as_str(),
                    "forward failed: {}",
                    failure.message
                );
                Err(failure.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{PathRewrite, Route, UpstreamService};
    use axum::Router;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use axum::routing::{any, get};

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

    fn forwarder_for(base_url: String, prefix: &str, rewrite: PathRewrite) -> Forwarder {
        let Ok(client) = UpstreamClient::new() else {
            panic!("client init failed");
        };
        let Ok(table) = RouteTable::new(vec![Route {
            prefix: prefix.to_string(),
            service: UpstreamService::Event,
            base_url,
            rewrite,
        }]) else {
            panic!("valid table");
        };
        Forwarder::new(client, Arc::new(table), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn forwards_method_body_and_auth() {
        let app = Router::new().route(
            "/echo",
            any(
                |method: Method, headers: HeaderMap, body: Bytes| async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("none");
                    format!(
                        "{method}|{auth}|{}",
                        String::from_utf8_lossy(&body)
                    )
                },
            ),
        );
        let base = spawn_server(app).await;
        let forwarder = forwarder_for(base, "/api/events", PathRewrite::Passthrough);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Bearer tok"),
        );

        let Ok(response) = forwarder
            .forward(
                &Method::POST,
                "/api/events/echo",
                None,
                &headers,
                b"{\"name\":\"launch\"}".to_vec(),
            )
            .await
        else {
            panic!("forward failed");
        };
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            b"POST|Bearer tok|{\"name\":\"launch\"}"
        );
    }

    #[tokio::test]
    async fn get_requests_carry_no_body() {
        let app = Router::new().route(
            "/echo",
            any(|body: Bytes| async move { format!("len={}", body.len()) }),
        );
        let base = spawn_server(app).await;
        let forwarder = forwarder_for(base, "/api/events", PathRewrite::Passthrough);

        let Ok(response) = forwarder
            .forward(
                &Method::GET,
                "/api/events/echo",
                None,
                &HeaderMap::new(),
                b"ignored".to_vec(),
            )
            .await
        else {
            panic!("forward failed");
        };
        assert_eq!(response.body, b"len=0");
    }

    #[tokio::test]
    async fn rewrite_and_query_reach_the_upstream() {
        let app = Router::new().route(
            "/events/{id}",
            get(
                |axum::extract::Path(id): axum::extract::Path<String>,
                 axum::extract::RawQuery(q): axum::extract::RawQuery| async move {
                    format!("{id}:{}", q.unwrap_or_default())
                },
            ),
        );
        let base = spawn_server(app).await;
        let forwarder = forwarder_for(base, "/api/events", PathRewrite::Prepend("/events"));

        let Ok(response) = forwarder
            .forward(
                &Method::GET,
                "/api/events/42",
                Some("expand=schedules"),
                &HeaderMap::new(),
                Vec::new(),
            )
            .await
        else {
            panic!("forward failed");
        };
        assert_eq!(response.body, b"42:expand=schedules");
    }

    #[tokio::test]
    async fn upstream_error_status_passes_through() {
        let app = Router::new().route(
            "/gone",
            get(|| async { (StatusCode::NOT_FOUND, "not here") }),
        );
        let base = spawn_server(app).await;
        let forwarder = forwarder_for(base, "/api/events", PathRewrite::Passthrough);

        let Ok(response) = forwarder
            .forward(
                &Method::GET,
                "/api/events/gone",
                None,
                &HeaderMap::new(),
                Vec::new(),
            )
            .await
        else {
            panic!("a 404 from the upstream is still a forwarded response");
        };
        assert_eq!(response.status, 404);
        assert_eq!(response.body, b"not here");
    }

    #[tokio::test]
    async fn unreachable_upstream_becomes_bad_gateway() {
        let forwarder = forwarder_for(
            "http://127.0.0.1:1".to_string(),
            "/api/events",
            PathRewrite::Passthrough,
        );

        let result = forwarder
            .forward(
                &Method::GET,
                "/api/events/1",
                None,
                &HeaderMap::new(),
                Vec::new(),
            )
            .await;

        let Err(err) = result else {
            panic!("expected failure");
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn unrouted_path_is_not_found() {
        let forwarder = forwarder_for(
            "http://127.0.0.1:1".to_string(),
            "/api/events",
            PathRewrite::Passthrough,
        );

        let result = forwarder
            .forward(
                &Method::GET,
                "/api/unknown/1",
                None,
                &HeaderMap::new(),
                Vec::new(),
            )
            .await;

        let Err(err) = result else {
            panic!("expected failure");
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
