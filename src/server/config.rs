use std::net::{Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

use thiserror::Error;

pub const PORT_ENV_VAR: &str = "PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT is not set")]
    MissingPort,

    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Listen settings for the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_port_var(std::env::var(PORT_ENV_VAR).ok())
    }

    fn from_port_var(value: Option<String>) -> Result<Self, ConfigError> {
        let value = value
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingPort)?;

        let port = value
            .trim()
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort { value, source })?;

        Ok(Self { port })
    }

    /// All interfaces on the configured port.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
