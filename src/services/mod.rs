//! Service layer: the request handlers invoked by the host.
//!
//! Three independent, stateless operations share one configuration: the
//! series sampler, the annotation synthesizer, and the health check. None
//! of them depends on another; each runs a request start-to-finish against
//! the read-only configuration and static event catalog.

pub mod annotations;
pub mod series;
pub mod template;
pub mod validation;

pub use annotations::run_annotation_query;
pub use series::run_series_query;
pub use template::expand;
pub use validation::{health_check, validate_coordinates, HealthState, HealthStatus};
