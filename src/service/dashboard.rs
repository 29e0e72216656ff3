//! Dashboard composition: the 1:N parallel aggregator.
//!
//! One inbound request fans out into three concurrent upstream calls
//! (event analytics, vendor analytics, invoice list) and merges them into
//! the fixed dashboard schema. The merge is best-effort: a failed,
//! non-2xx, or malformed contribution defaults to zero/empty and the
//! service is listed as degraded; the endpoint always answers `200`.
//! All calls run with independent timeouts, so worst-case latency is the
//! slowest single call, not the sum.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::api::dto::{DashboardResponse, ScheduleEntry};
use crate::config::GatewayConfig;
use crate::domain::UpstreamService;
use crate::upstream::UpstreamClient;

/// Analytics payload from `GET {event}/events/analytics`.
///
/// `totalOutstanding` and `allUpcomingSchedulesCount` are intentionally
/// not read back: both are recomputed from merged data.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EventAnalytics {
    total_client_payments: f64,
    total_budgets: f64,
    total_events: u64,
    total_upcoming_events: u64,
    all_upcoming_schedules: Vec<ScheduleEntry>,
}

/// Analytics payload from `GET {vendor}/vendors/analytics`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VendorAnalytics {
    total_vendors: u64,
}

/// Composes the dashboard view from the upstream fan-out.
#[derive(Debug, Clone)]
pub struct DashboardService {
    client: UpstreamClient,
    event_base: String,
    vendor_base: String,
    invoice_base: String,
    timeout: Duration,
}

impl DashboardService {
    /// Creates the aggregator with the configured upstream addresses and
    /// per-call timeout.
    #[must_use]
    pub fn new(client: UpstreamClient, config: &GatewayConfig) -> Self {
        Self {
            client,
            event_base: config.event_service_url.clone(),
            vendor_base: config.vendor_service_url.clone(),
            invoice_base: config.invoice_service_url.clone(),
            timeout: Duration::from_secs(config.forward_timeout_secs),
        }
    }

    /// Runs the fan-out and merges the results.
    ///
    /// Never fails: every upstream contribution is optional. All three
    /// calls are dispatched at the same instant and joined structurally;
    /// the calls are read-only, so composing twice against unchanged
    /// upstream state yields identical output.
    pub async fn compose(&self) -> DashboardResponse {
        let (event, vendor, invoices) = tokio::join!(
            self.fetch_json::<EventAnalytics>(
                UpstreamService::Event,
                format!("{}/events/analytics", self.event_base),
            ),
            self.fetch_json::<VendorAnalytics>(
                UpstreamService::Vendor,
                format!("{}/vendors/analytics", self.vendor_base),
            ),
            self.fetch_json::<Vec<serde_json::Value>>(
                UpstreamService::Invoice,
                format!("{}/invoices", self.invoice_base),
            ),
        );

        let mut degraded = Vec::new();
        let event = event.unwrap_or_else(|| {
            degraded.push(UpstreamService::Event.name());
            EventAnalytics::default()
        });
        let vendor = vendor.unwrap_or_else(|| {
            degraded.push(UpstreamService::Vendor.name());
            VendorAnalytics::default()
        });
        let invoices = invoices.unwrap_or_else(|| {
            degraded.push(UpstreamService::Invoice.name());
            Vec::new()
        });

        let mut schedules = event.all_upcoming_schedules;
        schedules.sort_by(ScheduleEntry::date_ordering);

        DashboardResponse {
            total_client_payments: event.total_client_payments,
            total_budgets: event.total_budgets,
            total_outstanding: event.total_budgets - event.total_client_payments,
            total_events: event.total_events,
            total_upcoming_events: event.total_upcoming_events,
            total_invoices_sent: invoices.len() as u64,
            total_vendors: vendor.total_vendors,
            all_upcoming_schedules_count: schedules.len() as u64,
            all_upcoming_schedules: schedules,
            degraded_services: degraded,
        }
    }

    /// Fetches and decodes one contribution. Any failure — transport,
    /// non-2xx status, or undecodable body — is logged and collapses to
    /// `None` ("no data"); it never aborts the other calls.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        service: UpstreamService,
        url: String,
    ) -> Option<T> {
        let response = match self.client.get(service, url, self.timeout).await {
            Ok(response) => response,
            Err(failure) => {
                tracing::warn!(
                    service = failure.service,
                    kind = failure.kind.as_str(),
                    "dashboard contribution unavailable: {}",
                    failure.message
                );
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(
                service = service.name(),
                status = response.status,
                "dashboard contribution returned an error status"
            );
            return None;
        }

        match serde_json::from_slice(&response.body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    service = service.name(),
                    "dashboard contribution is not valid JSON: {e}"
                );
                None
            }
        }
    }
}
