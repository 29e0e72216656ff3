//! # eventide-gateway
//!
//! Forwarding and aggregation API gateway for the eventide
//! event-management microservices (auth, event, vendor, invoice, email).
//!
//! The gateway owns no data and makes no business decisions. It does two
//! things: relay a request to exactly one upstream (1:1 forwarding via a
//! validated longest-prefix route table), and compose views that span
//! several upstreams (1:N fan-out for the dashboard and the health
//! report), tolerating partial failure in the fan-out case.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │     ├── dashboard / health / currency endpoints
//!     │     └── fallback → Forwarder
//!     │
//!     ├── Forwarder, DashboardService, HealthService (service/)
//!     │
//!     ├── RouteTable, UpstreamService, currency catalog (domain/)
//!     │
//!     └── UpstreamClient (upstream/) ── auth / event / vendor / invoice / email
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod upstream;
