//! HTTP server module for the datasource backend.
//!
//! This module provides an axum-based HTTP server that exposes the
//! datasource to the dashboard host over the SimpleJSON-style contract:
//! `POST /query` for time series, `POST /annotations` for calendar events,
//! and `GET /health` for the configuration check. Handlers are thin
//! wrappers over the service layer; all business logic lives there.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
