//! Request and response types for annotation queries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::query::TimeRange;

/// A single annotation returned to the host.
///
/// Point events mark a named astronomical instant; region events span an
/// interval (`time` to `time_end`) and carry a fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationEvent {
    /// Event time (epoch ms); start time for regions.
    pub time: i64,
    /// Region end time (epoch ms); absent for point events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<i64>,
    /// Display title.
    pub title: String,
    /// Longer description.
    pub text: String,
    /// Tags attached to the event.
    pub tags: Vec<String>,
    /// True for interval (region) events.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_region: bool,
    /// Fill color for regions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Inbound annotation query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationQueryRequest {
    /// Requested time range.
    pub range: TimeRange,
    /// Comma/whitespace-separated event-name allowlist; absent or `all`
    /// means every event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Timezone the host is displaying in; day boundaries and the synthetic
    /// noon/midnight events follow it.
    #[serde(default)]
    pub timezone: DisplayTimezone,
}

/// The host's display timezone.
///
/// Annotation days are iterated in this timezone so that region boundaries
/// and the synthetic noon/midnight markers line up with the host's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayTimezone {
    /// Coordinated universal time.
    #[default]
    Utc,
    /// The server's local timezone (host sent `browser`/`local`).
    Local,
    /// A named IANA timezone.
    Named(Tz),
}

impl DisplayTimezone {
    /// Calendar date containing `time_ms` in this timezone.
    pub fn date_of(&self, time_ms: i64) -> NaiveDate {
        let utc = DateTime::<Utc>::from_timestamp_millis(time_ms)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        match self {
            DisplayTimezone::Utc => utc.date_naive(),
            DisplayTimezone::Local => utc.with_timezone(&chrono::Local).date_naive(),
            DisplayTimezone::Named(tz) => utc.with_timezone(tz).date_naive(),
        }
    }

    /// Epoch-ms instant of a naive wall-clock time in this timezone.
    ///
    /// DST ambiguity resolves to the earlier instant; a nonexistent wall
    /// time (spring-forward gap) falls back to its UTC reading.
    pub fn instant_ms(&self, naive: NaiveDateTime) -> i64 {
        match self {
            DisplayTimezone::Utc => Utc.from_utc_datetime(&naive).timestamp_millis(),
            DisplayTimezone::Local => resolve_local(chrono::Local.from_local_datetime(&naive), naive),
            DisplayTimezone::Named(tz) => resolve_local(tz.from_local_datetime(&naive), naive),
        }
    }
}

fn resolve_local<T: TimeZone>(result: LocalResult<DateTime<T>>, naive: NaiveDateTime) -> i64 {
    match result {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earlier, _) => earlier.timestamp_millis(),
        LocalResult::None => Utc.from_utc_datetime(&naive).timestamp_millis(),
    }
}

impl fmt::Display for DisplayTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTimezone::Utc => write!(f, "utc"),
            DisplayTimezone::Local => write!(f, "browser"),
            DisplayTimezone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl Serialize for DisplayTimezone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DisplayTimezone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "" | "utc" | "UTC" => Ok(DisplayTimezone::Utc),
            "browser" | "local" => Ok(DisplayTimezone::Local),
            name => Tz::from_str(name)
                .map(DisplayTimezone::Named)
                .map_err(|_| D::Error::custom(format!("unknown timezone '{}'", name))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_point_event_serialization_omits_region_fields() {
        let event = AnnotationEvent {
            time: 1000,
            time_end: None,
            title: "Sunrise".to_string(),
            text: "Top edge of the sun appears on the horizon".to_string(),
            tags: vec!["sun".to_string()],
            is_region: false,
            color: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("timeEnd").is_none());
        assert!(json.get("isRegion").is_none());
        assert!(json.get("color").is_none());
    }

    #[test]
    fn test_region_event_serialization() {
        let event = AnnotationEvent {
            time: 1000,
            time_end: Some(2000),
            title: "Night".to_string(),
            text: "Astronomical night".to_string(),
            tags: vec![],
            is_region: true,
            color: Some("rgba(0, 0, 30, 0.5)".to_string()),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["timeEnd"], 2000);
        assert_eq!(json["isRegion"], true);
    }

    #[test]
    fn test_timezone_deserialization() {
        let utc: DisplayTimezone = serde_json::from_str("\"utc\"").unwrap();
        assert_eq!(utc, DisplayTimezone::Utc);
        let browser: DisplayTimezone = serde_json::from_str("\"browser\"").unwrap();
        assert_eq!(browser, DisplayTimezone::Local);
        let named: DisplayTimezone = serde_json::from_str("\"Europe/Berlin\"").unwrap();
        assert_eq!(named, DisplayTimezone::Named(chrono_tz::Europe::Berlin));
        let bogus: Result<DisplayTimezone, _> = serde_json::from_str("\"Mars/Olympus\"");
        assert!(bogus.is_err());
    }

    #[test]
    fn test_utc_midnight_round_trip() {
        let tz = DisplayTimezone::Utc;
        // 2023-03-15 00:00:00 UTC
        let midnight_ms = 1_678_838_400_000;
        let date = tz.date_of(midnight_ms);
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
        assert_eq!(
            tz.instant_ms(NaiveDateTime::new(date, NaiveTime::MIN)),
            midnight_ms
        );
    }

    #[test]
    fn test_named_timezone_shifts_day_boundary() {
        let tz = DisplayTimezone::Named(chrono_tz::Asia::Tokyo);
        // 2023-03-15 22:00:00 UTC is already 2023-03-16 in Tokyo
        let late_ms = 1_678_917_600_000;
        assert_eq!(
            tz.date_of(late_ms),
            NaiveDate::from_ymd_opt(2023, 3, 16).unwrap()
        );
        // Tokyo midnight is 9 hours ahead of UTC midnight
        let date = NaiveDate::from_ymd_opt(2023, 3, 16).unwrap();
        let tokyo_midnight = tz.instant_ms(NaiveDateTime::new(date, NaiveTime::MIN));
        let utc_midnight = DisplayTimezone::Utc.instant_ms(NaiveDateTime::new(date, NaiveTime::MIN));
        assert_eq!(utc_midnight - tokyo_midnight, 9 * 3600 * 1000);
    }
}
