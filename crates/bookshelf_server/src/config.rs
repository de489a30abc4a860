//! Server configuration.
//!
//! Configuration is read from environment variables with development
//! defaults:
//! - `BOOKSHELF_BIND`: bind host (default `127.0.0.1`)
//! - `PORT` or `BOOKSHELF_PORT`: bind port (default `3000`)
//! - `BOOKSHELF_DB_PATH`: SQLite file, or `:memory:` (default `bookshelf.db`)
//! - `BOOKSHELF_RESET_SCHEMA`: recreate all tables at startup (default `true`)
//! - `BOOKSHELF_LOG_LEVEL`: trace|debug|info|warn|error (default per build mode)
//! - `BOOKSHELF_LOG_DIR`: absolute log directory; stdout when unset

use bookshelf_core::logging::normalize_level;
use bookshelf_core::{default_log_level, LogTarget, LoggingError};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_BIND_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_DB_PATH: &str = "bookshelf.db";
const IN_MEMORY_DB_PATH: &str = ":memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port value `{0}`")]
    InvalidPort(String),
    #[error("invalid bind address `{addr}`: {reason}")]
    InvalidBindAddress { addr: String, reason: String },
    #[error("invalid boolean `{value}` for {key}; expected true|false")]
    InvalidBool { key: &'static str, value: String },
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Where the catalog database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseLocation,
    /// Drop and recreate every catalog table when the server starts.
    pub reset_schema: bool,
    pub log_level: &'static str,
    pub log_target: LogTarget,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("BOOKSHELF_BIND").unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());
        let port_str = lookup("PORT")
            .or_else(|| lookup("BOOKSHELF_PORT"))
            .unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_str
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_str.clone()))?;

        let addr = format!("{host}:{port}");
        let bind_addr = addr
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidBindAddress {
                addr: addr.clone(),
                reason: err.to_string(),
            })?;

        let database = match lookup("BOOKSHELF_DB_PATH") {
            Some(path) if path.trim() == IN_MEMORY_DB_PATH => DatabaseLocation::InMemory,
            Some(path) if !path.trim().is_empty() => {
                DatabaseLocation::File(PathBuf::from(path.trim()))
            }
            _ => DatabaseLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
        };

        let reset_schema = match lookup("BOOKSHELF_RESET_SCHEMA") {
            Some(value) => parse_bool("BOOKSHELF_RESET_SCHEMA", &value)?,
            None => true,
        };

        let log_level = match lookup("BOOKSHELF_LOG_LEVEL") {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };

        let log_target = match lookup("BOOKSHELF_LOG_DIR") {
            Some(dir) => LogTarget::directory(&dir)?,
            None => LogTarget::Stdout,
        };

        Ok(Self {
            bind_addr,
            database,
            reset_schema,
            log_level,
            log_target,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DatabaseLocation, ServerConfig};
    use bookshelf_core::LogTarget;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("bookshelf.db"))
        );
        assert!(config.reset_schema);
        assert_eq!(config.log_target, LogTarget::Stdout);
    }

    #[test]
    fn port_prefers_generic_port_variable() {
        let config = config_from(&[("PORT", "8080"), ("BOOKSHELF_PORT", "9090")]).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);

        let config = config_from(&[("BOOKSHELF_PORT", "9090")]).unwrap();
        assert_eq!(config.bind_addr.port(), 9090);
    }

    #[test]
    fn memory_database_and_flags_are_parsed() {
        let config = config_from(&[
            ("BOOKSHELF_DB_PATH", ":memory:"),
            ("BOOKSHELF_RESET_SCHEMA", "false"),
            ("BOOKSHELF_LOG_LEVEL", "WARNING"),
        ])
        .unwrap();
        assert_eq!(config.database, DatabaseLocation::InMemory);
        assert!(!config.reset_schema);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("PORT", "http")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            config_from(&[("BOOKSHELF_BIND", "not a host")]),
            Err(ConfigError::InvalidBindAddress { .. })
        ));
        assert!(matches!(
            config_from(&[("BOOKSHELF_RESET_SCHEMA", "maybe")]),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert!(matches!(
            config_from(&[("BOOKSHELF_LOG_DIR", "relative/logs")]),
            Err(ConfigError::Logging(_))
        ));
    }
}
