//! Parallel health fan-out over the registered upstream services.
//!
//! Probes the four aggregation dependencies (auth, event, vendor,
//! invoice) concurrently. A failed or timed-out probe marks that service
//! down without aborting the others, and the endpoint built on top of
//! this service always answers `200`: upstream unavailability is data
//! here, not an error.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;

use crate::api::dto::{HealthReport, OverallStatus};
use crate::config::GatewayConfig;
use crate::domain::UpstreamService;
use crate::upstream::UpstreamClient;

/// Name the health report attributes itself to.
const REPORTER: &str = "dashboard-aggregation";

/// Probes every registered upstream in parallel.
#[derive(Debug, Clone)]
pub struct HealthService {
    client: UpstreamClient,
    probes: Vec<(UpstreamService, String)>,
    timeout: Duration,
}

impl HealthService {
    /// Registers the aggregation dependencies from configuration.
    #[must_use]
    pub fn new(client: UpstreamClient, config: &GatewayConfig) -> Self {
        let register = [
            UpstreamService::Auth,
            UpstreamService::Event,
            UpstreamService::Vendor,
            UpstreamService::Invoice,
        ];
        let probes = register
            .into_iter()
            .map(|service| (service, service.base_url(config).to_string()))
            .collect();
        Self {
            client,
            probes,
            timeout: Duration::from_secs(config.health_timeout_secs),
        }
    }

    /// Issues one `GET /health` per registered service, all in parallel,
    /// each with its own timeout, and derives the aggregate status.
    ///
    /// A service counts as reachable only on a 2xx answer. All-reachable
    /// derives `healthy`; anything less derives `degraded`.
    pub async fn probe_all(&self) -> HealthReport {
        let checks = self.probes.iter().map(|(service, base)| {
            let client = self.client.clone();
            let service = *service;
            let url = format!("{base}/health");
            let timeout = self.timeout;
            async move {
                let reachable = match client.get(service, url, timeout).await {
                    Ok(response) => response.is_success(),
                    Err(failure) => {
                        tracing::warn!(
                            service = failure.service,
                            kind = failure.kind.as_str(),
                            "health probe failed: {}",
                            failure.message
                        );
                        false
                    }
                };
                (service.name(), reachable)
            }
        });

        let dependencies: BTreeMap<&'static str, bool> = join_all(checks).await.into_iter().collect();
        let status = HealthReport::derive_status(&dependencies);
        if status != OverallStatus::Healthy {
            tracing::warn!(?dependencies, "one or more upstreams are unreachable");
        }

        HealthReport {
            status,
            service: REPORTER,
            dependencies,
            timestamp: Utc::now(),
        }
    }
}
