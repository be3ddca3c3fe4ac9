//! Data Transfer Objects for the HTTP API.
//!
//! The wire types are the library's own request/response models, which
//! already derive Serialize/Deserialize; they are re-exported here so the
//! HTTP surface is visible in one place.

pub use crate::models::{
    AnnotationEvent, AnnotationQueryRequest, QueryTarget, ScopedVar, SeriesFrame,
    SeriesQueryRequest, TimeRange,
};
pub use crate::services::{HealthState, HealthStatus};
