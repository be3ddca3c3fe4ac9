//! Error types for datasource queries.
//!
//! The datasource has exactly one failure mode: a latitude or longitude
//! that is out of range or not numeric after template expansion. Range
//! problems are accumulated across all targets of a request and surfaced
//! as a single combined error; annotation queries never fail.

use thiserror::Error;

/// Result type for datasource query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error raised by a series query or health check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// One or more coordinate values were out of bounds or unparseable.
    /// The message joins every per-target problem with a single space.
    #[error("{0}")]
    InvalidCoordinates(String),
}

impl QueryError {
    /// Build an error from a list of accumulated problem messages.
    pub fn from_problems(problems: Vec<String>) -> Self {
        QueryError::InvalidCoordinates(problems.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_problems_joins_with_single_space() {
        let err = QueryError::from_problems(vec![
            "Latitude out of range.".to_string(),
            "Longitude out of range.".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Latitude out of range. Longitude out of range."
        );
    }
}
