//! Server configuration.
//!
//! # Environment Variables
//!
//! - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
//! - `STORE_BACKEND`: `redis` (default) | `memory`
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `STATIC_DIR`: Built frontend served for non-API paths (default: `frontend/dist`)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("STORE_BACKEND must be 'redis' or 'memory', got '{0}'")]
    UnknownBackend(String),

    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" | "in_memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownBackend(value.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub redis_url: String,
    pub store_backend: StoreBackend,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_backend = match get("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::Redis,
        };
        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            redis_url: get("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_owned()),
            store_backend,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            static_dir: get("STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.store_backend, StoreBackend::Redis);
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, PathBuf::from("frontend/dist"));
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("REDIS_URL", "redis://cache:6380/2"),
            ("STORE_BACKEND", "memory"),
            ("HOST", "127.0.0.1"),
            ("PORT", "5000"),
            ("STATIC_DIR", "/srv/app"),
        ])
        .unwrap();
        assert_eq!(config.redis_url, "redis://cache:6380/2");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:5000");
        assert_eq!(config.static_dir, PathBuf::from("/srv/app"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("REDIS_URL", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
    }

    #[rstest]
    #[case("abc")]
    #[case("70000")]
    #[case("-1")]
    fn rejects_bad_port(#[case] port: &str) {
        assert_eq!(
            config_from(&[("PORT", port)]),
            Err(ConfigError::InvalidPort(port.to_owned()))
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        assert_eq!(
            config_from(&[("STORE_BACKEND", "mongo")]),
            Err(ConfigError::UnknownBackend("mongo".to_owned()))
        );
    }

    #[test]
    fn bad_host_is_reported_at_bind_time() {
        let config = config_from(&[("HOST", "not a host")]).unwrap();
        assert!(matches!(config.socket_addr(), Err(ConfigError::InvalidAddress(_))));
    }
}
