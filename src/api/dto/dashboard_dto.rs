//! Dashboard aggregation DTOs.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One upcoming schedule entry contributed by an upstream.
///
/// Only the date is interpreted (for merge ordering); every other field a
/// service attaches is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntry {
    /// Schedule date, RFC 3339 timestamp or plain `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Remaining upstream fields, passed through verbatim.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ScheduleEntry {
    /// Millisecond timestamp parsed from the date, when parseable.
    fn timestamp_millis(&self) -> Option<i64> {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.date) {
            return Some(dt.timestamp_millis());
        }
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis())
    }

    /// Date-ascending ordering for the merged schedule list. Entries with
    /// unparseable dates sort after parseable ones, by raw string.
    #[must_use]
    pub fn date_ordering(a: &Self, b: &Self) -> Ordering {
        match (a.timestamp_millis(), b.timestamp_millis()) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.date.cmp(&b.date)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.date.cmp(&b.date),
        }
    }
}

/// The composed dashboard view assembled from the upstream fan-out.
///
/// The schema is fixed: a failed or malformed upstream contribution
/// defaults to `0` / empty rather than failing the response, and the
/// services that defaulted are named in `degradedServices` so callers can
/// tell "no activity" apart from "no data".
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Sum of client payments across all events.
    pub total_client_payments: f64,
    /// Sum of all event budgets.
    pub total_budgets: f64,
    /// `totalBudgets − totalClientPayments`, computed post-merge.
    pub total_outstanding: f64,
    /// Number of events.
    pub total_events: u64,
    /// Events with a future date.
    pub total_upcoming_events: u64,
    /// Number of invoice records.
    pub total_invoices_sent: u64,
    /// Number of vendors.
    pub total_vendors: u64,
    /// Merged future schedule entries, date ascending.
    pub all_upcoming_schedules: Vec<ScheduleEntry>,
    /// Length of `allUpcomingSchedules`.
    pub all_upcoming_schedules_count: u64,
    /// Upstreams whose contribution defaulted. Omitted when empty, so a
    /// fully healthy response carries exactly the fixed schema.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<String>)]
    pub degraded_services: Vec<&'static str>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn entry(date: &str) -> ScheduleEntry {
        ScheduleEntry {
            date: date.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn orders_plain_dates_ascending() {
        let mut entries = vec![entry("2025-06-01"), entry("2025-03-01"), entry("2025-04-15")];
        entries.sort_by(ScheduleEntry::date_ordering);
        let dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-03-01", "2025-04-15", "2025-06-01"]);
    }

    #[test]
    fn mixes_rfc3339_and_plain_dates() {
        let mut entries = vec![
            entry("2025-03-02T08:00:00Z"),
            entry("2025-03-01"),
            entry("2025-03-02T07:30:00Z"),
        ];
        entries.sort_by(ScheduleEntry::date_ordering);
        let dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2025-03-01", "2025-03-02T07:30:00Z", "2025-03-02T08:00:00Z"]
        );
    }

    #[test]
    fn unparseable_dates_sort_last() {
        let mut entries = vec![entry("someday"), entry("2025-03-01")];
        entries.sort_by(ScheduleEntry::date_ordering);
        let Some(first) = entries.first() else {
            panic!("non-empty");
        };
        assert_eq!(first.date, "2025-03-01");
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = r#"{"date":"2025-03-01","title":"load-in","venue":"hall A"}"#;
        let Ok(entry) = serde_json::from_str::<ScheduleEntry>(raw) else {
            panic!("parse failed");
        };
        assert_eq!(entry.date, "2025-03-01");
        let Ok(back) = serde_json::to_value(&entry) else {
            panic!("serialize failed");
        };
        assert_eq!(back.get("title"), Some(&serde_json::json!("load-in")));
        assert_eq!(back.get("venue"), Some(&serde_json::json!("hall A")));
    }

    #[test]
    fn degraded_marker_is_omitted_when_empty() {
        let response = DashboardResponse {
            total_client_payments: 0.0,
            total_budgets: 0.0,
            total_outstanding: 0.0,
            total_events: 0,
            total_upcoming_events: 0,
            total_invoices_sent: 0,
            total_vendors: 0,
            all_upcoming_schedules: vec![],
            all_upcoming_schedules_count: 0,
            degraded_services: vec![],
        };
        let Ok(value) = serde_json::to_value(&response) else {
            panic!("serialize failed");
        };
        assert!(value.get("degradedServices").is_none());
        assert_eq!(value.get("totalClientPayments"), Some(&serde_json::json!(0.0)));
    }
}
