//! Process settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/gameserver";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    /// Schema holding the game tables. Must be a valid PostgreSQL identifier.
    pub database_schema: String,
    pub database_max_connections: u32,
    /// Default game-server base URL for `/server/overview`. Requests may override it.
    pub server_base_url: Option<String>,
    pub server_timeout: Duration,
    pub bind_address: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server_timeout_secs: u64 = parse_or(get("SERVER_TIMEOUT_SECS"), "SERVER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if server_timeout_secs == 0 {
            return Err(ConfigError::Settings("SERVER_TIMEOUT_SECS must be greater than 0".into()));
        }

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            database_schema: get("DATABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
            database_max_connections: parse_or(get("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", 5)?,
            server_base_url: get("SERVER_BASE_URL"),
            server_timeout: Duration::from_secs(server_timeout_secs),
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(get("PORT"), "PORT", 8000)?,
        })
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::Settings(format!("{} has invalid value '{}'", key, v))),
    }
}
