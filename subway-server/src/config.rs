//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Listen address variable.
pub const ADDR_VAR: &str = "SUBWAY_ADDR";

/// Seed network file variable.
pub const NETWORK_VAR: &str = "SUBWAY_NETWORK";

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,

    /// Seed network to load at startup; the catalog starts empty without one
    pub network_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            network_path: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from `SUBWAY_ADDR` and `SUBWAY_NETWORK`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(ADDR_VAR).ok(),
            std::env::var(NETWORK_VAR).ok(),
        )
    }

    /// Build configuration from raw variable values. Empty values count as unset.
    pub fn from_vars(addr: Option<String>, network: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = addr.filter(|v| !v.trim().is_empty()) {
            config.addr = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddr {
                    var: ADDR_VAR,
                    value,
                })?;
        }

        config.network_path = network
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}
