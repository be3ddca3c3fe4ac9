//! Thin wrapper over the external astronomy library.
//!
//! This is the only module that talks to `suncalc`. It exposes positions in
//! radians, distances in kilometers, and event times as epoch-millisecond
//! maps keyed by the catalog keys used throughout the crate. The library is
//! trusted to never fail for finite timestamps and in-bounds coordinates,
//! so everything here is infallible; event times that cannot be produced
//! for a given day (polar day/night, moonless days) are simply absent from
//! the returned map. The library exposes moon positions only, so moon
//! rise/set times are derived here by scanning the altitude for horizon
//! crossings.

use suncalc::Timestamp;

/// Milliseconds per calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

const MS_PER_HOUR: i64 = 3_600_000;

/// Event times further than this from the queried day are treated as
/// absent. Guards against nonsense timestamps for days on which an event
/// does not occur (e.g. astronomical night during polar summer).
const PLAUSIBLE_WINDOW_MS: i64 = 2 * MS_PER_DAY;

/// Altitude at which the moon's upper limb touches the horizon, radians
/// (mean refraction plus semi-diameter, as in SunCalc).
const MOON_HORIZON_CORRECTION: f64 = 0.133;

/// Sun position for an instant and observer location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Altitude above the horizon, radians.
    pub altitude_rad: f64,
    /// Azimuth, radians.
    pub azimuth_rad: f64,
}

/// Moon position for an instant and observer location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    /// Altitude above the horizon, radians.
    pub altitude_rad: f64,
    /// Azimuth, radians.
    pub azimuth_rad: f64,
    /// Distance from the observer to the moon, kilometers. NaN in the
    /// unexpected case that the library supplies none.
    pub distance_km: f64,
}

/// Sun position at `time_ms` for an observer at (`latitude`, `longitude`).
pub fn sun_position(time_ms: i64, latitude: f64, longitude: f64) -> SunPosition {
    let pos = suncalc::get_position(Timestamp(time_ms), latitude, longitude);
    SunPosition {
        altitude_rad: pos.altitude,
        azimuth_rad: pos.azimuth,
    }
}

/// Moon position at `time_ms` for an observer at (`latitude`, `longitude`).
pub fn moon_position(time_ms: i64, latitude: f64, longitude: f64) -> MoonPosition {
    let pos = suncalc::moon_pos(Timestamp(time_ms), latitude, longitude);
    MoonPosition {
        altitude_rad: pos.altitude,
        azimuth_rad: pos.azimuth,
        distance_km: pos.distance.unwrap_or(f64::NAN),
    }
}

/// Illuminated fraction of the moon at `time_ms`, in `[0, 1]`.
pub fn moon_illumination_fraction(time_ms: i64) -> f64 {
    suncalc::moon_illumination(Timestamp(time_ms)).fraction
}

/// Named sun event times for the day containing `day_ms`, keyed by catalog
/// key. Events the library cannot resolve for that day are omitted.
pub fn sun_event_times(day_ms: i64, latitude: f64, longitude: f64) -> Vec<(&'static str, i64)> {
    let t = suncalc::get_times(Timestamp(day_ms), latitude, longitude, None);
    let entries = [
        ("dawn", t.dawn),
        ("dusk", t.dusk),
        ("goldenHour", t.golden_hour),
        ("goldenHourEnd", t.golden_hour_end),
        ("nadir", t.nadir),
        ("nauticalDawn", t.nautical_dawn),
        ("nauticalDusk", t.nautical_dusk),
        ("night", t.night),
        ("nightEnd", t.night_end),
        ("solarNoon", t.solar_noon),
        ("sunrise", t.sunrise),
        ("sunriseEnd", t.sunrise_end),
        ("sunset", t.sunset),
        ("sunsetStart", t.sunset_start),
    ];
    entries
        .into_iter()
        .map(|(key, ts)| (key, ts.0))
        .filter(|&(_, ts)| is_plausible(day_ms, ts))
        .collect()
}

/// Moonrise and moonset for the 24 hours centered on `day_ms`. The keys
/// carry a `moon` prefix so they never collide with sun event keys. The map
/// is sparse: on some days the moon neither rises nor sets.
///
/// Crossings of the corrected horizon altitude are located by sampling the
/// moon's altitude hourly and interpolating each pair of intervals with a
/// quadratic, the same scan SunCalc uses for its moon times.
pub fn moon_event_times(day_ms: i64, latitude: f64, longitude: f64) -> Vec<(&'static str, i64)> {
    let start_ms = day_ms - MS_PER_DAY / 2;
    let altitude = |hour: i64| {
        moon_position(start_ms + hour * MS_PER_HOUR, latitude, longitude).altitude_rad
            - MOON_HORIZON_CORRECTION
    };

    let mut h0 = altitude(0);
    let mut rise_hour: Option<f64> = None;
    let mut set_hour: Option<f64> = None;

    let mut i = 1i64;
    while i <= 23 {
        let h1 = altitude(i);
        let h2 = altitude(i + 1);

        // Quadratic through (i-1, h0), (i, h1), (i+1, h2) in the local
        // coordinate x = hour - i.
        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        if a.abs() > f64::EPSILON {
            let xe = -b / (2.0 * a);
            let ye = (a * xe + b) * xe + h1;
            let d = b * b - 4.0 * a * h1;
            if d >= 0.0 {
                let dx = d.sqrt() / (2.0 * a.abs());
                let mut x1 = xe - dx;
                let x2 = xe + dx;
                let mut roots = 0;
                if x1.abs() <= 1.0 {
                    roots += 1;
                }
                if x2.abs() <= 1.0 {
                    roots += 1;
                }
                if x1 < -1.0 {
                    x1 = x2;
                }

                if roots == 1 {
                    if h0 < 0.0 {
                        rise_hour = Some(i as f64 + x1);
                    } else {
                        set_hour = Some(i as f64 + x1);
                    }
                } else if roots == 2 {
                    rise_hour = Some(i as f64 + if ye < 0.0 { x2 } else { x1 });
                    set_hour = Some(i as f64 + if ye < 0.0 { x1 } else { x2 });
                }

                if rise_hour.is_some() && set_hour.is_some() {
                    break;
                }
            }
        }
        h0 = h2;
        i += 2;
    }

    let to_ms = |hour: f64| start_ms + (hour * MS_PER_HOUR as f64) as i64;
    let mut entries = Vec::with_capacity(2);
    if let Some(hour) = rise_hour {
        entries.push(("moonrise", to_ms(hour)));
    }
    if let Some(hour) = set_hour {
        entries.push(("moonset", to_ms(hour)));
    }
    entries
}

fn is_plausible(day_ms: i64, event_ms: i64) -> bool {
    (event_ms - day_ms).abs() <= PLAUSIBLE_WINDOW_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-03-15 12:00:00 UTC
    const NOON_MS: i64 = 1_678_881_600_000;
    const GREENWICH_LAT: f64 = 51.4769;
    const GREENWICH_LON: f64 = 0.0;

    #[test]
    fn test_sun_position_in_radian_bounds() {
        let pos = sun_position(NOON_MS, GREENWICH_LAT, GREENWICH_LON);
        assert!(pos.altitude_rad.abs() <= std::f64::consts::FRAC_PI_2);
        assert!(pos.azimuth_rad.abs() <= std::f64::consts::PI);
    }

    #[test]
    fn test_moon_distance_is_roughly_lunar() {
        let pos = moon_position(NOON_MS, GREENWICH_LAT, GREENWICH_LON);
        // Perigee ~356k km, apogee ~407k km
        assert!(
            pos.distance_km > 300_000.0 && pos.distance_km < 450_000.0,
            "unexpected moon distance {}",
            pos.distance_km
        );
    }

    #[test]
    fn test_moon_illumination_is_a_fraction() {
        let fraction = moon_illumination_fraction(NOON_MS);
        assert!((0.0..=1.0).contains(&fraction));
    }

    #[test]
    fn test_sun_event_times_cover_sunrise_and_sunset() {
        let times = sun_event_times(NOON_MS, GREENWICH_LAT, GREENWICH_LON);
        let keys: Vec<&str> = times.iter().map(|&(k, _)| k).collect();
        assert!(keys.contains(&"sunrise"));
        assert!(keys.contains(&"sunset"));
        assert!(keys.contains(&"solarNoon"));
        for &(key, ts) in &times {
            assert!(
                (ts - NOON_MS).abs() <= PLAUSIBLE_WINDOW_MS,
                "event {} outside plausibility window",
                key
            );
        }
    }

    #[test]
    fn test_moon_event_times_are_prefixed() {
        let times = moon_event_times(NOON_MS, GREENWICH_LAT, GREENWICH_LON);
        for &(key, _) in &times {
            assert!(key.starts_with("moon"), "unexpected key {}", key);
        }
    }

    #[test]
    fn test_moon_times_mark_horizon_crossings() {
        // Last-quarter moon at Greenwich: rises after midnight, sets
        // mid-morning, so both crossings fall inside the day.
        let times = moon_event_times(NOON_MS, GREENWICH_LAT, GREENWICH_LON);
        let keys: Vec<&str> = times.iter().map(|&(k, _)| k).collect();
        assert!(keys.contains(&"moonrise"), "expected a moonrise");
        assert!(keys.contains(&"moonset"), "expected a moonset");
        for &(key, ts) in &times {
            assert!(
                (ts - NOON_MS).abs() <= MS_PER_DAY / 2,
                "{} outside its day",
                key
            );
            let before = moon_position(ts - MS_PER_HOUR / 2, GREENWICH_LAT, GREENWICH_LON)
                .altitude_rad;
            let after = moon_position(ts + MS_PER_HOUR / 2, GREENWICH_LAT, GREENWICH_LON)
                .altitude_rad;
            if key == "moonrise" {
                assert!(after > before, "moon should be climbing through moonrise");
            } else {
                assert!(before > after, "moon should be sinking through moonset");
            }
        }
    }
}
