//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The configuration is constructed once
//! at startup and passed by reference into the route table and services;
//! nothing reads the process environment after boot.

use std::net::SocketAddr;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Base URL of the auth service.
    pub auth_service_url: String,

    /// Base URL of the event service.
    pub event_service_url: String,

    /// Base URL of the vendor service.
    pub vendor_service_url: String,

    /// Base URL of the invoice service.
    pub invoice_service_url: String,

    /// Base URL of the email service.
    pub email_service_url: String,

    /// Per-call timeout in seconds for forwarded and aggregated requests.
    pub forward_timeout_secs: u64,

    /// Per-probe timeout in seconds for the health fan-out.
    pub health_timeout_secs: u64,

    /// Allowed CORS origins. Empty means allow any origin.
    pub allowed_origins: Vec<String>,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the well-known local addresses of each upstream when a
    /// variable is not set. Calls `dotenvy::dotenv().ok()` to optionally
    /// load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let auth_service_url = base_url_env("AUTH_SERVICE_URL", "http://auth:3001");
        let event_service_url = base_url_env("EVENT_SERVICE_URL", "http://event:3002");
        let vendor_service_url = base_url_env("VENDOR_SERVICE_URL", "http://vendor:3003");
        let invoice_service_url = base_url_env("INVOICE_SERVICE_URL", "http://invoice:3004");
        let email_service_url = base_url_env("EMAIL_SERVICE_URL", "http://email:3005");

        let forward_timeout_secs = parse_env("FORWARD_TIMEOUT_SECS", 30);
        let health_timeout_secs = parse_env("HEALTH_TIMEOUT_SECS", 5);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            listen_addr,
            auth_service_url,
            event_service_url,
            vendor_service_url,
            invoice_service_url,
            email_service_url,
            forward_timeout_secs,
            health_timeout_secs,
            allowed_origins,
        })
    }
}

/// Reads an upstream base URL, trimming any trailing slash so route
/// rewrites can concatenate paths without doubling separators.
fn base_url_env(key: &str, default: &str) -> String {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim_end_matches('/').to_string()
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
