//! Application state for the HTTP server.

use crate::config::EngineConfig;
use crate::db::repository::SiteRepository;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for site/scene storage
    pub repository: Arc<dyn SiteRepository>,
    /// Engine configuration applied to coverage runs (query parameters may
    /// override individual thresholds per request)
    pub config: EngineConfig,
}

impl AppState {
    /// Create a new application state with the given repository and config.
    pub fn new(repository: Arc<dyn SiteRepository>, config: EngineConfig) -> Self {
        Self { repository, config }
    }
}
