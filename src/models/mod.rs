//! Data model for datasource queries and responses.
//!
//! This module contains the request/response types exchanged with the
//! dashboard host, the metric definitions, the static annotation event
//! catalog, and the datasource configuration.

pub mod annotation;
pub mod catalog;
pub mod config;
pub mod metric;
pub mod query;

pub use annotation::{AnnotationEvent, AnnotationQueryRequest, DisplayTimezone};
pub use catalog::EventMeta;
pub use config::DatasourceConfig;
pub use metric::MetricKind;
pub use query::{QueryTarget, ScopedVar, SeriesFrame, SeriesQueryRequest, TimeRange};
