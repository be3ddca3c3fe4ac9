//! Series sampler.
//!
//! Steps the requested time range at a fixed interval, querying the
//! astronomy oracle once per sample, and assembles one column-oriented
//! frame per active target. Coordinate problems accumulate across the
//! whole request and abort it as a single combined error, so a caller
//! sees every validation failure at once and never receives partial data.

use std::collections::HashMap;

use crate::error::{QueryError, QueryResult};
use crate::models::{
    DatasourceConfig, MetricKind, QueryTarget, ScopedVar, SeriesFrame, SeriesQueryRequest,
    TimeRange,
};
use crate::oracle;
use crate::services::{template, validation};

/// Run a series query against the configuration.
///
/// Hidden and empty targets are skipped. Frames are returned in the order
/// of the surviving targets; sample times are strictly increasing and
/// start at the range's `from`.
///
/// # Errors
/// Fails if any target's resolved coordinates are out of bounds or not
/// numeric. All problems are gathered in one pass and joined into a single
/// error message; no frames are returned in that case.
pub fn run_series_query(
    config: &DatasourceConfig,
    request: &SeriesQueryRequest,
) -> QueryResult<Vec<SeriesFrame>> {
    let step_ms = sample_step_ms(&request.range, request.max_data_points);
    let mut frames = Vec::new();
    let mut problems = Vec::new();

    for target in &request.targets {
        let metric = match target.target {
            Some(metric) if !target.hide => metric,
            _ => {
                log::debug!("skipping hidden or empty target '{}'", target.ref_id);
                continue;
            }
        };
        let (latitude, longitude, target_problems) =
            resolve_coordinates(config, target, &request.scoped_vars);
        if target_problems.is_empty() {
            frames.push(sample_series(
                &target.ref_id,
                metric,
                &request.range,
                step_ms,
                latitude,
                longitude,
            ));
        } else {
            problems.extend(target_problems);
        }
    }

    if problems.is_empty() {
        Ok(frames)
    } else {
        Err(QueryError::from_problems(problems))
    }
}

/// Sampling interval for a range and point budget.
///
/// `ceil(span / max_data_points)`, clamped to at least one millisecond so a
/// degenerate budget or zero-width range can never stall the sampling loop.
pub(crate) fn sample_step_ms(range: &TimeRange, max_data_points: usize) -> i64 {
    let span = range.span_ms();
    let n = max_data_points.max(1) as i64;
    ((span + n - 1) / n).max(1)
}

/// Resolve the effective coordinates for one target.
///
/// Overrides are template-expanded and parsed; a parse failure is recorded
/// and the configured value stands in so bounds checking still covers the
/// other axis. The shared validator then reports any out-of-range value,
/// which also catches an invalid stored configuration.
fn resolve_coordinates(
    config: &DatasourceConfig,
    target: &QueryTarget,
    scoped_vars: &HashMap<String, ScopedVar>,
) -> (f64, f64, Vec<String>) {
    let mut problems = Vec::new();

    let latitude = resolve_axis(
        "Latitude",
        target.latitude.as_deref(),
        config.latitude,
        &target.ref_id,
        scoped_vars,
        &mut problems,
    );
    let longitude = resolve_axis(
        "Longitude",
        target.longitude.as_deref(),
        config.longitude,
        &target.ref_id,
        scoped_vars,
        &mut problems,
    );

    for message in validation::validate_coordinates(latitude, longitude) {
        problems.push(format!("Target {}: {}", target.ref_id, message));
    }
    (latitude, longitude, problems)
}

fn resolve_axis(
    axis: &str,
    override_value: Option<&str>,
    configured: f64,
    ref_id: &str,
    scoped_vars: &HashMap<String, ScopedVar>,
    problems: &mut Vec<String>,
) -> f64 {
    let Some(raw) = override_value.filter(|v| !v.is_empty()) else {
        return configured;
    };
    let expanded = template::expand(raw, scoped_vars);
    match expanded.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            problems.push(format!(
                "Target {}: {} '{}' is not a number.",
                ref_id, axis, expanded
            ));
            configured
        }
    }
}

/// Materialize one frame by stepping the range and querying the oracle.
fn sample_series(
    ref_id: &str,
    metric: MetricKind,
    range: &TimeRange,
    step_ms: i64,
    latitude: f64,
    longitude: f64,
) -> SeriesFrame {
    let mut frame = SeriesFrame::new(ref_id, metric.title());
    let mut time = range.from;
    while time < range.to {
        frame.push(time, sample_metric(metric, time, latitude, longitude));
        time += step_ms;
    }
    frame
}

/// One oracle sample, converted per the metric's unit rule.
fn sample_metric(metric: MetricKind, time_ms: i64, latitude: f64, longitude: f64) -> f64 {
    match metric {
        MetricKind::MoonIllumination => oracle::moon_illumination_fraction(time_ms),
        MetricKind::MoonAltitude => {
            oracle::moon_position(time_ms, latitude, longitude)
                .altitude_rad
                .to_degrees()
        }
        MetricKind::MoonAzimuth => {
            oracle::moon_position(time_ms, latitude, longitude)
                .azimuth_rad
                .to_degrees()
        }
        MetricKind::MoonDistance => oracle::moon_position(time_ms, latitude, longitude).distance_km,
        MetricKind::SunAltitude => {
            oracle::sun_position(time_ms, latitude, longitude)
                .altitude_rad
                .to_degrees()
        }
        MetricKind::SunAzimuth => {
            oracle::sun_position(time_ms, latitude, longitude)
                .azimuth_rad
                .to_degrees()
        }
    }
}
