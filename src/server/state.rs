//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::services::sheets::RateSheetService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap cloning into worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Rate-sheet store
    pub sheets: Arc<RateSheetService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, sheets: Arc<RateSheetService>) -> Self {
        Self {
            config: Arc::new(config),
            sheets,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
