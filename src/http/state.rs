//! Application state for the HTTP server.

use crate::models::DatasourceConfig;

/// Shared application state passed to all handlers.
///
/// The configuration is read-only for the life of the process, so cloning
/// the state per request is cheap and no locking is needed.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configured observer location.
    pub config: DatasourceConfig,
}

impl AppState {
    /// Create a new application state with the given configuration.
    pub fn new(config: DatasourceConfig) -> Self {
        Self { config }
    }
}
