//! Metric definitions for series queries.

use serde::{Deserialize, Serialize};

/// The fixed set of metrics a series query target can name.
///
/// Each metric maps to a display title and a unit rule: altitudes and
/// azimuths are computed in radians by the astronomy library and converted
/// to degrees, illumination is a dimensionless fraction, and moon distance
/// is passed through in the library's native kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    MoonIllumination,
    MoonAltitude,
    MoonAzimuth,
    MoonDistance,
    SunAltitude,
    SunAzimuth,
}

impl MetricKind {
    /// All metrics, in the order they are presented to the host.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::MoonIllumination,
        MetricKind::MoonAltitude,
        MetricKind::MoonAzimuth,
        MetricKind::MoonDistance,
        MetricKind::SunAltitude,
        MetricKind::SunAzimuth,
    ];

    /// Wire key of this metric.
    pub fn key(&self) -> &'static str {
        match self {
            MetricKind::MoonIllumination => "moon_illumination",
            MetricKind::MoonAltitude => "moon_altitude",
            MetricKind::MoonAzimuth => "moon_azimuth",
            MetricKind::MoonDistance => "moon_distance",
            MetricKind::SunAltitude => "sun_altitude",
            MetricKind::SunAzimuth => "sun_azimuth",
        }
    }

    /// Parse a wire key. Returns `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Self> {
        MetricKind::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Display title used as the series name.
    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::MoonIllumination => "Moon illumination",
            MetricKind::MoonAltitude => "Moon altitude",
            MetricKind::MoonAzimuth => "Moon azimuth",
            MetricKind::MoonDistance => "Moon distance",
            MetricKind::SunAltitude => "Sun altitude",
            MetricKind::SunAzimuth => "Sun azimuth",
        }
    }
}
