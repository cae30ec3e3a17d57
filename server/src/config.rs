//! Environment-driven configuration for the API service, the schema
//! initializer and the proxy.
//!
//! # Design
//! Every binary reads the same variables through `Config::from_env`. Parsing
//! goes through `Config::from_lookup` so tests can feed a plain map instead of
//! mutating the process environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

pub const DEFAULT_API_PORT: u16 = 3000;
pub const DEFAULT_PROXY_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got {value:?}")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name} must be a boolean (true/false), got {value:?}")]
    InvalidBool { name: &'static str, value: String },

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
}

/// Connection settings for the PostgreSQL server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub admin_name: String,
    pub ssl: bool,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Options for the target database holding the `todos` table.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.options_for(&self.name)
    }

    /// Options for the administrative database used to issue `CREATE DATABASE`.
    pub fn admin_connect_options(&self) -> PgConnectOptions {
        self.options_for(&self.admin_name)
    }

    fn options_for(&self, database: &str) -> PgConnectOptions {
        let ssl_mode = if self.ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        };
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(database)
            .ssl_mode(ssl_mode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
    pub proxy_port: u16,
    pub api_url: String,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            host: get("DB_HOST", "localhost"),
            port: parse_port("DB_PORT", lookup("DB_PORT"), 5432)?,
            user: get("DB_USER", "postgres"),
            password: get("DB_PASSWORD", ""),
            name: get("DB_NAME", "todos"),
            admin_name: get("DB_ADMIN_NAME", "postgres"),
            ssl: parse_bool("DB_SSL", lookup("DB_SSL"), false)?,
            max_connections: parse_count("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 10)?,
        };

        Ok(Self {
            database,
            host: get("HOST", "0.0.0.0"),
            port: parse_port("PORT", lookup("PORT"), DEFAULT_API_PORT)?,
            proxy_port: parse_port("PROXY_PORT", lookup("PROXY_PORT"), DEFAULT_PROXY_PORT)?,
            api_url: get("API_URL", "http://127.0.0.1:3000")
                .trim_end_matches('/')
                .to_string(),
            static_dir: PathBuf::from(get("STATIC_DIR", "dist")),
        })
    }

    pub fn api_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(&self.host, self.port)
    }

    pub fn proxy_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(&self.host, self.proxy_port)
    }
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let raw = format!("{host}:{port}");
    raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
}

fn parse_port(name: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) if v.trim().is_empty() => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort { name, value: v }),
    }
}

fn parse_count(
    name: &'static str,
    value: Option<String>,
    default: u32,
) -> Result<u32, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => match v.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value: v }),
        },
    }
}

fn parse_bool(
    name: &'static str,
    value: Option<String>,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { name, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, DEFAULT_API_PORT);
        assert_eq!(cfg.proxy_port, DEFAULT_PROXY_PORT);
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.port, 5432);
        assert_eq!(cfg.database.name, "todos");
        assert_eq!(cfg.database.admin_name, "postgres");
        assert!(!cfg.database.ssl);
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn reads_database_settings() {
        let cfg = config(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "tasks"),
            ("DB_SSL", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.database.host, "db.internal");
        assert_eq!(cfg.database.port, 6543);
        assert_eq!(cfg.database.user, "app");
        assert_eq!(cfg.database.password, "secret");
        assert_eq!(cfg.database.name, "tasks");
        assert!(cfg.database.ssl);
    }

    #[test]
    fn ssl_toggle_accepts_common_spellings() {
        for on in ["1", "yes", "ON", "True"] {
            assert!(config(&[("DB_SSL", on)]).unwrap().database.ssl, "{on}");
        }
        for off in ["0", "no", "off", "FALSE"] {
            assert!(!config(&[("DB_SSL", off)]).unwrap().database.ssl, "{off}");
        }
    }

    #[test]
    fn rejects_garbage_ssl_toggle() {
        let err = config(&[("DB_SSL", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { name: "DB_SSL", .. }));
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { name: "PORT", .. }));
    }

    #[test]
    fn rejects_zero_pool_size() {
        let err = config(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn empty_port_falls_back_to_default() {
        let cfg = config(&[("PORT", "")]).unwrap();
        assert_eq!(cfg.port, DEFAULT_API_PORT);
    }

    #[test]
    fn api_url_trailing_slash_is_stripped() {
        let cfg = config(&[("API_URL", "http://api:3000/")]).unwrap();
        assert_eq!(cfg.api_url, "http://api:3000");
    }

    #[test]
    fn builds_listen_addresses() {
        let cfg = config(&[("HOST", "127.0.0.1"), ("PORT", "4000")]).unwrap();
        assert_eq!(cfg.api_addr().unwrap().to_string(), "127.0.0.1:4000");
        assert_eq!(cfg.proxy_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_unparseable_host() {
        let cfg = config(&[("HOST", "not a host")]).unwrap();
        assert!(matches!(cfg.api_addr(), Err(ConfigError::InvalidAddress(_))));
    }
}
