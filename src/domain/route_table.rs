//! Static longest-prefix routing from public path prefixes to upstreams.
//!
//! The table is built once at startup from [`GatewayConfig`] and never
//! mutated. Ambiguity that cannot be resolved by prefix length (two routes
//! with the same prefix) is rejected at construction time, so a
//! misconfigured gateway fails to boot instead of routing by registration
//! order.

use crate::config::GatewayConfig;
use crate::domain::UpstreamService;

/// How the matched public path is rewritten before hitting the upstream.
///
/// A closed enum rather than an arbitrary function: the full set of
/// rewrites the gateway performs is known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRewrite {
    /// Forward the path suffix to the upstream unchanged.
    Passthrough,
    /// Prepend a fixed segment to the path suffix
    /// (e.g. `/123` → `/events/123`).
    Prepend(&'static str),
}

impl PathRewrite {
    /// Applies the rewrite to the path suffix left after prefix removal.
    #[must_use]
    pub fn apply(self, suffix: &str) -> String {
        match self {
            Self::Passthrough => suffix.to_string(),
            Self::Prepend(head) => format!("{head}{suffix}"),
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    /// Public path prefix, e.g. `/api/events`. Never ends with `/`.
    pub prefix: String,
    /// Upstream service this prefix forwards to.
    pub service: UpstreamService,
    /// Upstream base URL without a trailing slash.
    pub base_url: String,
    /// Rewrite applied to the suffix after the prefix.
    pub rewrite: PathRewrite,
}

impl Route {
    /// Builds the full target URL for a matched request.
    ///
    /// An empty suffix (request path equals the prefix) is normalized to
    /// `/`, matching what the upstream would see behind a mounted router.
    /// The query string is preserved verbatim when present.
    #[must_use]
    pub fn target_url(&self, suffix: &str, query: Option<&str>) -> String {
        let suffix = if suffix.is_empty() { "/" } else { suffix };
        let rewritten = self.rewrite.apply(suffix);
        match query {
            Some(q) => format!("{}{}?{}", self.base_url, rewritten, q),
            None => format!("{}{}", self.base_url, rewritten),
        }
    }
}

/// Error raised while validating the route table at startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteTableError {
    /// Two routes share the same prefix; length cannot disambiguate them.
    #[error("ambiguous route configuration: duplicate prefix {0}")]
    DuplicatePrefix(String),

    /// A prefix does not begin with `/`.
    #[error("route prefix must start with '/': {0}")]
    InvalidPrefix(String),
}

/// A successful route lookup: the matched route plus the path suffix
/// remaining after the prefix.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The winning (most specific) route.
    pub route: &'a Route,
    /// Path after the prefix, beginning with `/` or empty.
    pub suffix: &'a str,
}

/// Immutable longest-prefix-match routing table.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Validates and builds a route table.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] on a duplicate or malformed prefix.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        for (i, route) in routes.iter().enumerate() {
            if !route.prefix.starts_with('/') {
                return Err(RouteTableError::InvalidPrefix(route.prefix.clone()));
            }
            if routes
                .iter()
                .skip(i + 1)
                .any(|other| other.prefix == route.prefix)
            {
                return Err(RouteTableError::DuplicatePrefix(route.prefix.clone()));
            }
        }
        Ok(Self { routes })
    }

    /// Builds the gateway's standard table: one prefix per upstream.
    ///
    /// `/api/events` prepends `/events` because the event service mounts
    /// its routers under that segment; every other upstream receives the
    /// bare suffix.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] if the static route set is ambiguous.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, RouteTableError> {
        let entry = |prefix: &str, service: UpstreamService, rewrite: PathRewrite| Route {
            prefix: prefix.to_string(),
            service,
            base_url: service.base_url(config).to_string(),
            rewrite,
        };

        Self::new(vec![
            entry("/api/auth", UpstreamService::Auth, PathRewrite::Passthrough),
            entry(
                "/api/events",
                UpstreamService::Event,
                PathRewrite::Prepend("/events"),
            ),
            entry(
                "/api/vendors",
                UpstreamService::Vendor,
                PathRewrite::Passthrough,
            ),
            entry(
                "/api/invoices",
                UpstreamService::Invoice,
                PathRewrite::Passthrough,
            ),
            entry(
                "/api/email",
                UpstreamService::Email,
                PathRewrite::Passthrough,
            ),
        ])
    }

    /// Finds the most specific route for `path`.
    ///
    /// Prefix matching respects segment boundaries: `/api/auth` matches
    /// `/api/auth` and `/api/auth/login` but never `/api/authx`. When
    /// several prefixes match, the longest wins.
    #[must_use]
    pub fn match_path<'a>(&'a self, path: &'a str) -> Option<RouteMatch<'a>> {
        self.routes
            .iter()
            .filter_map(|route| {
                let suffix = Self::prefix_suffix(&route.prefix, path)?;
                Some((route, suffix))
            })
            .max_by_key(|(route, _)| route.prefix.len())
            .map(|(route, suffix)| RouteMatch { route, suffix })
    }

    /// Returns the registered routes.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the suffix after `prefix` if `path` matches it at a segment
    /// boundary, `None` otherwise.
    fn prefix_suffix<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(prefix)?;
        if rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn route(prefix: &str, service: UpstreamService, rewrite: PathRewrite) -> Route {
        Route {
            prefix: prefix.to_string(),
            service,
            base_url: format!("http://{}:3000", service.name()),
            rewrite,
        }
    }

    fn table() -> RouteTable {
        let Ok(table) = RouteTable::new(vec![
            route("/api/auth", UpstreamService::Auth, PathRewrite::Passthrough),
            route(
                "/api/events",
                UpstreamService::Event,
                PathRewrite::Prepend("/events"),
            ),
            route(
                "/api/vendors",
                UpstreamService::Vendor,
                PathRewrite::Passthrough,
            ),
        ]) else {
            panic!("valid table");
        };
        table
    }

    #[test]
    fn matches_prefix_and_returns_suffix() {
        let table = table();
        let Some(m) = table.match_path("/api/auth/login") else {
            panic!("expected match");
        };
        assert_eq!(m.route.service, UpstreamService::Auth);
        assert_eq!(m.suffix, "/login");
    }

    #[test]
    fn exact_prefix_match_has_empty_suffix() {
        let table = table();
        let Some(m) = table.match_path("/api/vendors") else {
            panic!("expected match");
        };
        assert_eq!(m.route.service, UpstreamService::Vendor);
        assert_eq!(m.suffix, "");
    }

    #[test]
    fn prefix_requires_segment_boundary() {
        let table = table();
        assert!(table.match_path("/api/authx").is_none());
        assert!(table.match_path("/api/eventsy/1").is_none());
    }

    #[test]
    fn unknown_path_does_not_match() {
        let table = table();
        assert!(table.match_path("/api/unknown").is_none());
        assert!(table.match_path("/health").is_none());
    }

    #[test]
    fn longest_prefix_wins() {
        let Ok(table) = RouteTable::new(vec![
            route("/api", UpstreamService::Auth, PathRewrite::Passthrough),
            route(
                "/api/events",
                UpstreamService::Event,
                PathRewrite::Passthrough,
            ),
        ]) else {
            panic!("valid table");
        };

        let Some(m) = table.match_path("/api/events/123") else {
            panic!("expected match");
        };
        assert_eq!(m.route.service, UpstreamService::Event);

        let Some(m) = table.match_path("/api/other") else {
            panic!("expected match");
        };
        assert_eq!(m.route.service, UpstreamService::Auth);
    }

    #[test]
    fn duplicate_prefix_is_rejected_at_load() {
        let result = RouteTable::new(vec![
            route("/api/auth", UpstreamService::Auth, PathRewrite::Passthrough),
            route(
                "/api/auth",
                UpstreamService::Email,
                PathRewrite::Passthrough,
            ),
        ]);
        assert_eq!(
            result.map(|_| ()),
            Err(RouteTableError::DuplicatePrefix("/api/auth".to_string()))
        );
    }

    #[test]
    fn prefix_without_leading_slash_is_rejected() {
        let result = RouteTable::new(vec![route(
            "api/auth",
            UpstreamService::Auth,
            PathRewrite::Passthrough,
        )]);
        assert_eq!(
            result.map(|_| ()),
            Err(RouteTableError::InvalidPrefix("api/auth".to_string()))
        );
    }

    #[test]
    fn target_url_applies_rewrite_and_query() {
        let table = table();
        let Some(m) = table.match_path("/api/events/123/schedules") else {
            panic!("expected match");
        };
        assert_eq!(
            m.route.target_url(m.suffix, Some("page=2")),
            "http://event:3000/events/123/schedules?page=2"
        );
    }

    #[test]
    fn target_url_normalizes_empty_suffix() {
        let table = table();
        let Some(m) = table.match_path("/api/events") else {
            panic!("expected match");
        };
        assert_eq!(m.route.target_url(m.suffix, None), "http://event:3000/events/");

        let Some(m) = table.match_path("/api/auth") else {
            panic!("expected match");
        };
        assert_eq!(m.route.target_url(m.suffix, None), "http://auth:3000/");
    }

    #[test]
    fn from_config_registers_all_five_upstreams() {
        let config = crate::config::GatewayConfig {
            listen_addr: "127.0.0.1:3000".parse().unwrap_or_else(|_| panic!("addr")),
            auth_service_url: "http://auth:3001".to_string(),
            event_service_url: "http://event:3002".to_string(),
            vendor_service_url: "http://vendor:3003".to_string(),
            invoice_service_url: "http://invoice:3004".to_string(),
            email_service_url: "http://email:3005".to_string(),
            forward_timeout_secs: 30,
            health_timeout_secs: 5,
            allowed_origins: vec![],
        };
        let Ok(table) = RouteTable::from_config(&config) else {
            panic!("static route set must be unambiguous");
        };
        assert_eq!(table.routes().len(), 5);

        let Some(m) = table.match_path("/api/invoices/42") else {
            panic!("expected match");
        };
        assert_eq!(
            m.route.target_url(m.suffix, None),
            "http://invoice:3004/42"
        );
    }
}
