//! HTTP handlers for the datasource API.
//!
//! Each handler corresponds to one endpoint of the datasource contract and
//! delegates to the service layer for the actual work.

use axum::{extract::State, Json};

use super::dto::{AnnotationEvent, AnnotationQueryRequest, HealthStatus, SeriesFrame, SeriesQueryRequest};
use super::error::AppError;
use super::state::AppState;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Validates the stored configuration. Always returns 200; configuration
/// problems are reported inside the status body.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(services::health_check(&state.config))
}

/// POST /query
///
/// Run a series query. Coordinate validation failures abort the whole
/// request with a 400 carrying every accumulated problem.
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<SeriesQueryRequest>,
) -> HandlerResult<Vec<SeriesFrame>> {
    let frames = services::run_series_query(&state.config, &request)?;
    Ok(Json(frames))
}

/// POST /annotations
///
/// Run an annotation query. Never fails; an over-long range yields an
/// empty list.
pub async fn annotations(
    State(state): State<AppState>,
    Json(request): Json<AnnotationQueryRequest>,
) -> Json<Vec<AnnotationEvent>> {
    Json(services::run_annotation_query(&state.config, &request))
}
