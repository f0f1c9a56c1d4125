//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::directory::CentralServerConfig;
use crate::nearest::NearestConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// Central Server connection settings
    pub central_server: CentralServerConfig,

    /// Serve stations from this JSON file instead of the Central Server
    pub stations_file: Option<PathBuf>,

    /// Nearest-station search configuration
    pub nearest: NearestConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();

        if let Some(value) = get("WASLA_BIND_ADDR") {
            config.bind_addr = parse("WASLA_BIND_ADDR", &value)?;
        }

        if let Some(url) = get("CENTRAL_SERVER_URL") {
            config.central_server = CentralServerConfig::new(url);
        }

        if let Some(token) = get("CENTRAL_SERVER_TOKEN") {
            config.central_server = config.central_server.with_token(token);
        }

        if let Some(value) = get("CENTRAL_SERVER_TIMEOUT_SECS") {
            let secs: u64 = parse("CENTRAL_SERVER_TIMEOUT_SECS", &value)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "CENTRAL_SERVER_TIMEOUT_SECS",
                    value,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.central_server = config
                .central_server
                .with_timeout(Duration::from_secs(secs));
        }

        config.stations_file = get("WASLA_STATIONS_FILE").map(PathBuf::from);

        if let Some(value) = get("WASLA_DEFAULT_LIMIT") {
            config.nearest = NearestConfig::new(parse("WASLA_DEFAULT_LIMIT", &value)?);
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            central_server: CentralServerConfig::default(),
            stations_file: None,
            nearest: NearestConfig::default(),
        }
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
