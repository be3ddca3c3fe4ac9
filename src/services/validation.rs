//! Coordinate validation and the health check.
//!
//! The same pure validator backs both call sites: the health check reports
//! problems as a structured status object, the series sampler reports them
//! as an aggregated query error.

use serde::{Deserialize, Serialize};

use crate::models::DatasourceConfig;

/// Validate a coordinate pair against the configuration bounds.
///
/// Bounds are inclusive: latitude in `[-90, 90]`, longitude in
/// `[-360, 360]`. Returns one human-readable message per violated bound;
/// an empty list means the pair is valid. Non-finite values fail both
/// checks' range tests and are reported the same way.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Vec<String> {
    let mut problems = Vec::new();
    if !(-90.0..=90.0).contains(&latitude) {
        problems.push(format!("Latitude '{}' not in range -90 to 90.", latitude));
    }
    if !(-360.0..=360.0).contains(&longitude) {
        problems.push(format!(
            "Longitude '{}' not in range -360 to 360.",
            longitude
        ));
    }
    problems
}

/// Outcome of a health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `success` or `error`.
    pub status: HealthState,
    /// Short title for display.
    pub title: String,
    /// Detail message; joins all validation problems on error.
    pub message: String,
}

/// Health check status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Success,
    Error,
}

/// Check that the stored configuration is usable.
///
/// Never fails: configuration problems are reported in the returned status
/// rather than as an error.
pub fn health_check(config: &DatasourceConfig) -> HealthStatus {
    let problems = validate_coordinates(config.latitude, config.longitude);
    if problems.is_empty() {
        HealthStatus {
            status: HealthState::Success,
            title: "Success".to_string(),
            message: "Datasource is working".to_string(),
        }
    } else {
        HealthStatus {
            status: HealthState::Error,
            title: "Error".to_string(),
            message: problems.join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_latitudes_are_accepted() {
        assert!(validate_coordinates(90.0, 0.0).is_empty());
        assert!(validate_coordinates(-90.0, 0.0).is_empty());
        assert!(validate_coordinates(0.0, 360.0).is_empty());
        assert!(validate_coordinates(0.0, -360.0).is_empty());
    }

    #[test]
    fn test_latitude_91_is_rejected() {
        let problems = validate_coordinates(91.0, 0.0);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Latitude"));
    }

    #[test]
    fn test_both_axes_reported_at_once() {
        let problems = validate_coordinates(-90.5, 400.0);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("Latitude"));
        assert!(problems[1].contains("Longitude"));
    }

    #[test]
    fn test_nan_is_rejected() {
        let problems = validate_coordinates(f64::NAN, 0.0);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Latitude"));
    }

    #[test]
    fn test_health_check_success() {
        let status = health_check(&DatasourceConfig::new(0.0, 0.0));
        assert_eq!(status.status, HealthState::Success);
        assert_eq!(
            serde_json::to_value(&status).unwrap()["status"],
            "success"
        );
    }

    #[test]
    fn test_health_check_reports_longitude_problem() {
        let status = health_check(&DatasourceConfig::new(0.0, 361.0));
        assert_eq!(status.status, HealthState::Error);
        assert!(status.message.contains("Longitude"));
    }
}
