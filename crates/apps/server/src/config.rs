use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_ADDR: &str = "127.0.0.1:54321";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CLIMATE_API_ADDR {value:?}: {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// JSON snapshot of the tables; in-memory only when unset.
    pub data_file: Option<PathBuf>,
    /// Reject requests without an `Authorization: Bearer` header.
    pub require_auth: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 54321)),
            data_file: None,
            require_auth: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("CLIMATE_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = raw.parse().map_err(|source| ConfigError::Addr {
            value: raw.clone(),
            source,
        })?;

        let data_file = env::var("CLIMATE_DATA_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            addr,
            data_file,
            require_auth: env_var_bool("CLIMATE_REQUIRE_AUTH", false),
        })
    }
}

fn env_var_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
