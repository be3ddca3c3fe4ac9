//! Request and response types for series queries.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::metric::MetricKind;

/// Half-open time range `[from, to)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Range start, inclusive (epoch ms).
    pub from: i64,
    /// Range end, exclusive (epoch ms).
    pub to: i64,
}

impl TimeRange {
    /// Width of the range in milliseconds; never negative.
    pub fn span_ms(&self) -> i64 {
        self.to.saturating_sub(self.from).max(0)
    }
}

/// A host-supplied template variable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedVar {
    /// Display text of the variable.
    #[serde(default)]
    pub text: String,
    /// Substitution value.
    pub value: String,
}

/// One query target: a metric plus optional per-target coordinate
/// overrides. Overrides are template strings expanded against the request's
/// scoped variables before being parsed and validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    /// Reference id assigned by the host, echoed back on the frame.
    #[serde(default)]
    pub ref_id: String,
    /// Requested metric. An absent or empty target skips the whole entry.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub target: Option<MetricKind>,
    /// Hidden targets are skipped without error.
    #[serde(default)]
    pub hide: bool,
    /// Optional latitude override (template string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    /// Optional longitude override (template string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

/// Deserialize a metric key, mapping an absent or empty string to `None`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<MetricKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(key) => MetricKind::from_key(key)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown metric '{}'", key))),
    }
}

/// Inbound series query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesQueryRequest {
    /// Requested time range.
    pub range: TimeRange,
    /// Maximum number of points per series.
    #[serde(default = "default_max_data_points")]
    pub max_data_points: usize,
    /// Scoped variables available for template expansion.
    #[serde(default)]
    pub scoped_vars: HashMap<String, ScopedVar>,
    /// Query targets.
    #[serde(default)]
    pub targets: Vec<QueryTarget>,
}

fn default_max_data_points() -> usize {
    100
}

/// Column-oriented time series produced for one query target.
///
/// Times are strictly increasing epoch milliseconds; `times` and `values`
/// always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesFrame {
    /// Reference id of the originating target.
    pub ref_id: String,
    /// Display name of the metric.
    pub name: String,
    /// Sample times (epoch ms).
    pub times: Vec<i64>,
    /// Sample values, converted per the metric's unit rule.
    pub values: Vec<f64>,
}

impl SeriesFrame {
    /// Create an empty frame for a target.
    pub fn new(ref_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            name: name.into(),
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append one sample.
    pub fn push(&mut self, time_ms: i64, value: f64) {
        self.times.push(time_ms);
        self.values.push(value);
    }

    /// Number of samples in the frame.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the frame holds no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_span_never_negative() {
        let range = TimeRange { from: 100, to: 50 };
        assert_eq!(range.span_ms(), 0);
        let range = TimeRange { from: 0, to: 250 };
        assert_eq!(range.span_ms(), 250);
    }

    #[test]
    fn test_target_empty_string_deserializes_to_none() {
        let target: QueryTarget =
            serde_json::from_str(r#"{"refId": "A", "target": ""}"#).unwrap();
        assert_eq!(target.target, None);
        assert!(!target.hide);
    }

    #[test]
    fn test_target_with_overrides() {
        let target: QueryTarget = serde_json::from_str(
            r#"{"refId": "B", "target": "moon_altitude", "latitude": "$lat", "hide": true}"#,
        )
        .unwrap();
        assert_eq!(target.target, Some(MetricKind::MoonAltitude));
        assert_eq!(target.latitude.as_deref(), Some("$lat"));
        assert!(target.hide);
        assert_eq!(target.longitude, None);
    }

    #[test]
    fn test_target_unknown_metric_is_an_error() {
        let result: Result<QueryTarget, _> =
            serde_json::from_str(r#"{"refId": "A", "target": "sun_distance"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request: SeriesQueryRequest =
            serde_json::from_str(r#"{"range": {"from": 0, "to": 1000}}"#).unwrap();
        assert_eq!(request.max_data_points, 100);
        assert!(request.targets.is_empty());
        assert!(request.scoped_vars.is_empty());
    }

    #[test]
    fn test_frame_push_keeps_columns_aligned() {
        let mut frame = SeriesFrame::new("A", "Sun altitude");
        assert!(frame.is_empty());
        frame.push(1000, 1.5);
        frame.push(2000, -3.25);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.times, vec![1000, 2000]);
        assert_eq!(frame.values, vec![1.5, -3.25]);
    }
}
