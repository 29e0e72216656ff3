//! Health fan-out DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Aggregate health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every probed dependency answered 2xx.
    Healthy,
    /// At least one dependency is down. Partial outage is always
    /// `degraded`, never `unhealthy`.
    Degraded,
    /// Reserved for the probe process itself failing catastrophically.
    Unhealthy,
}

/// Result of one parallel probe pass over the registered upstreams.
///
/// Derived on every call, never stored.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthReport {
    /// Derived overall status.
    pub status: OverallStatus,
    /// Name of the reporting component.
    #[schema(value_type = String)]
    pub service: &'static str,
    /// Reachability per probed upstream.
    #[schema(value_type = Object)]
    pub dependencies: BTreeMap<&'static str, bool>,
    /// Probe time.
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    /// Derives the overall status from per-service flags: `healthy` only
    /// when every probe succeeded, `degraded` otherwise.
    #[must_use]
    pub fn derive_status(dependencies: &BTreeMap<&'static str, bool>) -> OverallStatus {
        if dependencies.values().all(|ok| *ok) {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn all_reachable_is_healthy() {
        let deps = BTreeMap::from([("auth", true), ("event", true)]);
        assert_eq!(HealthReport::derive_status(&deps), OverallStatus::Healthy);
    }

    #[test]
    fn any_unreachable_is_degraded() {
        let deps = BTreeMap::from([("auth", true), ("event", false)]);
        assert_eq!(HealthReport::derive_status(&deps), OverallStatus::Degraded);
    }

    #[test]
    fn statuses_serialize_lowercase() {
        let Ok(healthy) = serde_json::to_value(OverallStatus::Healthy) else {
            panic!("serialize failed");
        };
        assert_eq!(healthy, serde_json::json!("healthy"));
        let Ok(degraded) = serde_json::to_value(OverallStatus::Degraded) else {
            panic!("serialize failed");
        };
        assert_eq!(degraded, serde_json::json!("degraded"));
    }
}
