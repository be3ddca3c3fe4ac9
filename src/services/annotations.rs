//! Annotation synthesizer.
//!
//! Walks the requested range one calendar day at a time (in the host's
//! display timezone), merges the oracle's sun and moon event times with the
//! synthetic noon/midnight fixed points, filters them by the requested
//! allowlist, and appends the night and daylight region events. Annotation
//! queries never fail: an over-long range degrades to an empty result.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveTime, TimeDelta};

use crate::models::catalog::{self, EventMeta, NIGHT_REGION, SUN_REGION};
use crate::models::{AnnotationEvent, AnnotationQueryRequest, DatasourceConfig, DisplayTimezone};
use crate::oracle::{self, MS_PER_DAY};

/// Longest range the synthesizer will iterate, as a cost-control policy
/// against unbounded per-day work.
const MAX_SPAN_DAYS: i64 = 366;

/// Run an annotation query against the configuration.
///
/// Events are emitted in per-day order, within each day in catalog-key
/// order followed by the night and daylight regions; the host is
/// responsible for any display-time sorting. A range wider than one year
/// returns an empty list.
pub fn run_annotation_query(
    config: &DatasourceConfig,
    request: &AnnotationQueryRequest,
) -> Vec<AnnotationEvent> {
    let range = request.range;
    if range.span_ms() > MAX_SPAN_DAYS * MS_PER_DAY {
        log::debug!(
            "annotation range wider than {} days, returning no events",
            MAX_SPAN_DAYS
        );
        return Vec::new();
    }

    let allowlist = Allowlist::parse(request.query.as_deref());
    let tz = request.timezone;
    let mut events = Vec::new();

    // Iterate one day past the range end so the trailing night region can
    // resolve its end timestamp from the following day's data.
    let limit_ms = range.to.saturating_add(MS_PER_DAY);
    let mut date = tz.date_of(range.from);
    loop {
        let midnight_ms = tz.instant_ms(date.and_time(NaiveTime::MIN));
        if midnight_ms >= limit_ms {
            break;
        }
        synthesize_day(&mut events, config, &allowlist, tz, date, midnight_ms);
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    events
}

/// Emit all events for one calendar day.
fn synthesize_day(
    events: &mut Vec<AnnotationEvent>,
    config: &DatasourceConfig,
    allowlist: &Allowlist,
    tz: DisplayTimezone,
    date: chrono::NaiveDate,
    midnight_ms: i64,
) {
    let noon_ms = tz.instant_ms(date.and_time(NaiveTime::MIN) + TimeDelta::hours(12));
    let (lat, lon) = (config.latitude, config.longitude);

    // Merged per-day event map; moon keys are `moon`-prefixed by the oracle
    // wrapper so they never collide with sun keys.
    let mut day_events: BTreeMap<&'static str, i64> = BTreeMap::new();
    day_events.extend(oracle::sun_event_times(noon_ms, lat, lon));
    day_events.extend(oracle::moon_event_times(noon_ms, lat, lon));
    day_events.insert("noon", noon_ms);
    day_events.insert("midnight", midnight_ms);

    // Next day's sun times, needed only to close the trailing night region.
    let next_day: BTreeMap<&'static str, i64> =
        oracle::sun_event_times(noon_ms + MS_PER_DAY, lat, lon)
            .into_iter()
            .collect();

    for (&key, &time) in &day_events {
        if !allowlist.allows(key) {
            continue;
        }
        match catalog::lookup(key) {
            Some(meta) => events.push(point_event(time, meta)),
            None => log::warn!("no catalog entry for event key '{}'", key),
        }
    }

    // Regions are derived from the raw per-day data, independent of whether
    // their underlying point events passed the filter above.
    if allowlist.allows(NIGHT_REGION) {
        if let (Some(&start), Some(&end), Some(meta)) = (
            day_events.get("night"),
            next_day.get("nightEnd"),
            catalog::lookup(NIGHT_REGION),
        ) {
            events.push(region_event(start, end, meta));
        }
    }
    if allowlist.allows(SUN_REGION) {
        if let (Some(&start), Some(&end), Some(meta)) = (
            day_events.get("sunrise"),
            day_events.get("sunset"),
            catalog::lookup(SUN_REGION),
        ) {
            events.push(region_event(start, end, meta));
        }
    }
}

fn point_event(time: i64, meta: &EventMeta) -> AnnotationEvent {
    AnnotationEvent {
        time,
        time_end: None,
        title: meta.title.to_string(),
        text: meta.text.to_string(),
        tags: meta.tags.iter().map(|t| t.to_string()).collect(),
        is_region: false,
        color: None,
    }
}

fn region_event(start: i64, end: i64, meta: &EventMeta) -> AnnotationEvent {
    AnnotationEvent {
        time: start,
        time_end: Some(end),
        title: meta.title.to_string(),
        text: meta.text.to_string(),
        tags: meta.tags.iter().map(|t| t.to_string()).collect(),
        is_region: true,
        color: meta.color.map(|c| c.to_string()),
    }
}

/// Parsed event-name allowlist. `None` means the wildcard.
struct Allowlist(Option<HashSet<String>>);

impl Allowlist {
    /// Parse a comma/whitespace-separated filter string. An absent or empty
    /// string, or one containing `all`, allows every event.
    fn parse(query: Option<&str>) -> Self {
        let Some(raw) = query else {
            return Allowlist(None);
        };
        let keys: HashSet<String> = raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        if keys.is_empty() || keys.contains("all") {
            Allowlist(None)
        } else {
            Allowlist(Some(keys))
        }
    }

    fn allows(&self, key: &str) -> bool {
        self.0.as_ref().map_or(true, |keys| keys.contains(key))
    }
}
