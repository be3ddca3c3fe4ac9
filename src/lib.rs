//! # Sun & Moon Datasource Backend
//!
//! Backend for a dashboard data-source plugin that supplies sun and moon
//! time-series metrics (position, illumination, distance) and calendar
//! annotations (sunrise, sunset, moon rise/set, day and night regions).
//! All astronomical computation is delegated to the `suncalc` crate; this
//! crate owns the query-to-series materialization loop and the per-day
//! annotation synthesis.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Query/response data types, metric definitions, the static
//!   event catalog, and datasource configuration
//! - [`services`]: Series sampler, annotation synthesizer, coordinate
//!   validation, health check, and template expansion
//! - [`oracle`]: Thin wrapper over the external astronomy library
//! - [`http`]: Axum-based HTTP server exposing the datasource contract
//!   (`/query`, `/annotations`, `/health`)
//!
//! All request handling is stateless: every query runs start-to-finish
//! against the read-only configuration and the read-only event catalog.

pub mod error;
pub mod models;
pub mod oracle;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{QueryError, QueryResult};
pub use models::{
    AnnotationEvent, AnnotationQueryRequest, DatasourceConfig, DisplayTimezone, MetricKind,
    QueryTarget, ScopedVar, SeriesFrame, SeriesQueryRequest, TimeRange,
};
pub use services::{
    health_check, run_annotation_query, run_series_query, validate_coordinates, HealthState,
    HealthStatus,
};
