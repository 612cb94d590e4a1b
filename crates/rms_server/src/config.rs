//! Process configuration from environment variables.
//!
//! `main` loads an optional `.env` file first (via `dotenvy`), then reads:
//!
//! | Variable            | Default                |
//! |---------------------|------------------------|
//! | `RMS_BIND_ADDR`     | `0.0.0.0:8000`         |
//! | `RMS_DATABASE_PATH` | `data/rms.db`          |
//! | `RMS_API_PREFIX`    | `/api/v1`              |
//! | `RMS_LOG_LEVEL`     | `debug` / `info` by build |
//! | `RMS_LOG_DIR`       | unset (stderr only)    |
//!
//! `RMS_DATABASE_PATH=:memory:` selects a process-local in-memory database.

use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE_PATH: &str = "data/rms.db";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
const MEMORY_DATABASE: &str = ":memory:";

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseLocation,
    /// Normalized: starts with `/`, no trailing `/`; empty means unprefixed.
    pub api_prefix: String,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<String>,
}

/// A configuration variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_text = get("RMS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_text.parse::<SocketAddr>().map_err(|err| ConfigError {
            key: "RMS_BIND_ADDR",
            message: format!("`{bind_text}` is not a socket address: {err}"),
        })?;

        let database = match get("RMS_DATABASE_PATH") {
            Some(path) if path == MEMORY_DATABASE => DatabaseLocation::Memory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
        };

        let api_prefix = normalize_prefix(
            &get("RMS_API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        )?;

        let log_level = get("RMS_LOG_LEVEL")
            .unwrap_or_else(|| rms_core::default_log_level().to_string());

        let log_dir = get("RMS_LOG_DIR");
        if let Some(dir) = log_dir.as_deref() {
            if !std::path::Path::new(dir).is_absolute() {
                return Err(ConfigError {
                    key: "RMS_LOG_DIR",
                    message: format!("must be an absolute path, got `{dir}`"),
                });
            }
        }

        Ok(Self {
            bind_addr,
            database,
            api_prefix,
            log_level,
            log_dir,
        })
    }
}

fn normalize_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigError {
            key: "RMS_API_PREFIX",
            message: format!("must start with `/`, got `{raw}`"),
        });
    }
    if trimmed.contains(':') || trimmed.contains('*') {
        return Err(ConfigError {
            key: "RMS_API_PREFIX",
            message: format!("must not contain route parameters, got `{raw}`"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{DatabaseLocation, ServerConfig, DEFAULT_DATABASE_PATH};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, super::ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH))
        );
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.log_level, rms_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn overrides_are_parsed_and_normalized() {
        let config = config_from(&[
            ("RMS_BIND_ADDR", "127.0.0.1:9100"),
            ("RMS_DATABASE_PATH", ":memory:"),
            ("RMS_API_PREFIX", "/api/v2/"),
            ("RMS_LOG_LEVEL", "warn"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9100");
        assert_eq!(config.database, DatabaseLocation::Memory);
        assert_eq!(config.api_prefix, "/api/v2");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("RMS_API_PREFIX", "  "), ("RMS_LOG_DIR", "")]).unwrap();
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            config_from(&[("RMS_BIND_ADDR", "nowhere")]).unwrap_err().key,
            "RMS_BIND_ADDR"
        );
        assert_eq!(
            config_from(&[("RMS_API_PREFIX", "api")]).unwrap_err().key,
            "RMS_API_PREFIX"
        );
        assert_eq!(
            config_from(&[("RMS_LOG_DIR", "relative/logs")]).unwrap_err().key,
            "RMS_LOG_DIR"
        );
    }
}
