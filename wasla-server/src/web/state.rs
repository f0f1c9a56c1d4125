//! Application state for the web layer.

use std::sync::Arc;

use crate::directory::StationDirectory;
use crate::nearest::NearestConfig;

/// Shared application state.
///
/// Holds only read-only handles; every request reads its own station
/// snapshot through the directory.
#[derive(Clone)]
pub struct AppState {
    /// Source of station snapshots
    pub directory: Arc<dyn StationDirectory>,

    /// Nearest-station search configuration
    pub config: Arc<NearestConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: impl StationDirectory + 'static, config: NearestConfig) -> Self {
        Self {
            directory: Arc::new(directory),
            config: Arc::new(config),
        }
    }
}
