//! Configuration for nearest-station lookups.

/// Number of stations returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 5;

/// Configuration parameters for nearest-station search.
#[derive(Debug, Clone)]
pub struct NearestConfig {
    /// Maximum number of stations returned when no limit is requested.
    pub default_limit: usize,
}

impl NearestConfig {
    /// Create a new configuration with the given default limit.
    pub fn new(default_limit: usize) -> Self {
        Self { default_limit }
    }

    /// Resolve a requested limit against the default.
    ///
    /// There is no upper bound; a limit above the station count returns
    /// every eligible station.
    pub fn limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit)
    }
}

impl Default for NearestConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NearestConfig::default();
        assert_eq!(config.default_limit, 5);
    }

    #[test]
    fn limit_falls_back_to_default() {
        let config = NearestConfig::new(3);
        assert_eq!(config.limit(None), 3);
        assert_eq!(config.limit(Some(10)), 10);
        assert_eq!(config.limit(Some(500)), 500);
    }
}
