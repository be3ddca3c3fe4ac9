//! Static annotation event catalog.
//!
//! Maps every producible event key to its display metadata. The catalog is
//! built once and read-only for the life of the process; the annotation
//! synthesizer is constructed so that every key it emits has an entry here.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Pseudo-key gating the night region (this day's `night` to the next
/// day's `nightEnd`).
pub const NIGHT_REGION: &str = "nightRegion";

/// Pseudo-key gating the daylight region (`sunrise` to `sunset`).
pub const SUN_REGION: &str = "sunRegion";

/// Display metadata for one event key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMeta {
    /// Display title.
    pub title: &'static str,
    /// Longer description.
    pub text: &'static str,
    /// Tags attached to emitted events.
    pub tags: &'static [&'static str],
    /// Fill color; set only for region keys.
    pub color: Option<&'static str>,
}

const fn point(title: &'static str, text: &'static str, tags: &'static [&'static str]) -> EventMeta {
    EventMeta {
        title,
        text,
        tags,
        color: None,
    }
}

static CATALOG: Lazy<BTreeMap<&'static str, EventMeta>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "dawn",
            point("Dawn", "Morning civil twilight starts", &["sun"]),
        ),
        (
            "dusk",
            point("Dusk", "Evening nautical twilight starts", &["sun"]),
        ),
        (
            "goldenHour",
            point("Golden hour", "Evening golden hour starts", &["sun"]),
        ),
        (
            "goldenHourEnd",
            point("Golden hour end", "Morning golden hour ends", &["sun"]),
        ),
        (
            "nadir",
            point("Nadir", "Darkest moment of the night, sun is in the lowest position", &["sun"]),
        ),
        (
            "nauticalDawn",
            point("Nautical dawn", "Morning nautical twilight starts", &["sun"]),
        ),
        (
            "nauticalDusk",
            point("Nautical dusk", "Evening astronomical twilight starts", &["sun"]),
        ),
        (
            "night",
            point("Night", "Dark enough for astronomical observations", &["sun"]),
        ),
        (
            "nightEnd",
            point("Night end", "Morning astronomical twilight starts", &["sun"]),
        ),
        (
            "solarNoon",
            point("Solar noon", "Sun is in the highest position", &["sun"]),
        ),
        (
            "sunrise",
            point("Sunrise", "Top edge of the sun appears on the horizon", &["sun"]),
        ),
        (
            "sunriseEnd",
            point("Sunrise end", "Bottom edge of the sun touches the horizon", &["sun"]),
        ),
        (
            "sunset",
            point("Sunset", "Sun disappears below the horizon", &["sun"]),
        ),
        (
            "sunsetStart",
            point("Sunset start", "Bottom edge of the sun touches the horizon", &["sun"]),
        ),
        ("moonrise", point("Moonrise", "Moon appears on the horizon", &["moon"])),
        ("moonset", point("Moonset", "Moon disappears below the horizon", &["moon"])),
        ("noon", point("Noon", "Local noon", &["time"])),
        ("midnight", point("Midnight", "Local midnight", &["time"])),
        (
            NIGHT_REGION,
            EventMeta {
                title: "Night",
                text: "From astronomical dusk to astronomical dawn",
                tags: &["sun", "night"],
                color: Some("rgba(0, 0, 30, 0.5)"),
            },
        ),
        (
            SUN_REGION,
            EventMeta {
                title: "Daylight",
                text: "From sunrise to sunset",
                tags: &["sun", "daylight"],
                color: Some("rgba(255, 200, 0, 0.2)"),
            },
        ),
    ])
});

/// Look up the metadata for an event key.
pub fn lookup(key: &str) -> Option<&'static EventMeta> {
    CATALOG.get(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_producible_key_has_an_entry() {
        // Keys the synthesizer can emit: suncalc sun times, prefixed moon
        // times, and the synthetic fixed points.
        let producible = [
            "dawn",
            "dusk",
            "goldenHour",
            "goldenHourEnd",
            "nadir",
            "nauticalDawn",
            "nauticalDusk",
            "night",
            "nightEnd",
            "solarNoon",
            "sunrise",
            "sunriseEnd",
            "sunset",
            "sunsetStart",
            "moonrise",
            "moonset",
            "noon",
            "midnight",
        ];
        for key in producible {
            assert!(lookup(key).is_some(), "missing catalog entry for {}", key);
        }
    }

    #[test]
    fn test_region_keys_carry_colors() {
        assert!(lookup(NIGHT_REGION).unwrap().color.is_some());
        assert!(lookup(SUN_REGION).unwrap().color.is_some());
        assert!(lookup("sunrise").unwrap().color.is_none());
    }
}
