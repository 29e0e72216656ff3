//! Identity of the backend services the gateway fronts.

use crate::config::GatewayConfig;

/// One of the independently deployed backend services.
///
/// The set is fixed at compile time; the gateway never discovers
/// upstreams at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    /// User, role, and permission management.
    Auth,
    /// Events, payments, schedules, and event analytics.
    Event,
    /// Vendor directory and vendor analytics.
    Vendor,
    /// Invoice records.
    Invoice,
    /// Template rendering and SMTP delivery.
    Email,
}

impl UpstreamService {
    /// Every registered upstream, in route-table order.
    pub const ALL: [Self; 5] = [
        Self::Auth,
        Self::Event,
        Self::Vendor,
        Self::Invoice,
        Self::Email,
    ];

    /// Stable wire name used in logs, health reports, and error payloads.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Event => "event",
            Self::Vendor => "vendor",
            Self::Invoice => "invoice",
            Self::Email => "email",
        }
    }

    /// Resolves this service's base URL from the gateway configuration.
    #[must_use]
    pub fn base_url(self, config: &GatewayConfig) -> &str {
        match self {
            Self::Auth => &config.auth_service_url,
            Self::Event => &config.event_service_url,
            Self::Vendor => &config.vendor_service_url,
            Self::Invoice => &config.invoice_service_url,
            Self::Email => &config.email_service_url,
        }
    }
}

impl std::fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
