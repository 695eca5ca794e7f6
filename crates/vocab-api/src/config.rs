//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `postgres://localhost/vocab` |
//! | `HOST` / `PORT` | `0.0.0.0` / `3000` |
//! | `ALLOWED_ORIGINS` | `*` (comma-separated list, or `*` for any) |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `VOCAB_TRANSLATE_TIMEOUT_MS` | `2000` |
//! | `LOG_FORMAT` | `text` (`json` for structured output) |
//! | `LOG_FILE` | unset (stdout) |
//! | `LOG_ANSI` | auto |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use vocab_core::{defaults, Error, Result};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/vocab";

/// CORS origin policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin; extension pages have opaque `chrome-extension://` origins.
    Any,
    List(Vec<HeaderValue>),
}

/// Parse `ALLOWED_ORIGINS`. Unset, blank or `*` allows any origin; invalid
/// entries are skipped with a warning.
pub fn parse_allowed_origins(value: Option<&str>) -> AllowedOrigins {
    let value = match value.map(str::trim) {
        None | Some("") | Some("*") => return AllowedOrigins::Any,
        Some(v) => v,
    };

    let origins = value
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();
    AllowedOrigins::List(origins)
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Path of a daily-rotated log file; stdout when unset.
    pub file: Option<String>,
    /// ANSI color override; auto-detected when unset.
    pub ansi: Option<bool>,
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
    pub db_max_connections: u32,
    pub translate_timeout: Duration,
    pub log: LogConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log = LogConfig {
            format: match get("LOG_FORMAT").as_deref().map(str::trim) {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            file: get("LOG_FILE"),
            ansi: get("LOG_ANSI").map(|v| v == "true" || v == "1"),
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: get("HOST").unwrap_or_else(|| defaults::SERVER_HOST.to_string()),
            port: parse_var(&get, "PORT", defaults::SERVER_PORT)?,
            allowed_origins: parse_allowed_origins(lookup("ALLOWED_ORIGINS").as_deref()),
            db_max_connections: parse_var(&get, "DB_MAX_CONNECTIONS", defaults::DB_MAX_CONNECTIONS)?,
            translate_timeout: Duration::from_millis(parse_var(
                &get,
                "VOCAB_TRANSLATE_TIMEOUT_MS",
                defaults::TRANSLATE_TIMEOUT_MS,
            )?),
            log,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid HOST/PORT: {}", e)))
    }
}

fn parse_var<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{} must be a number: {}", key, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.allowed_origins, AllowedOrigins::Any);
        assert_eq!(config.translate_timeout, Duration::from_millis(2000));
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("VOCAB_TRANSLATE_TIMEOUT_MS", "250"),
            ("LOG_FORMAT", "json"),
            ("LOG_ANSI", "false"),
            ("DB_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.translate_timeout, Duration::from_millis(250));
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.ansi, Some(false));
        assert_eq!(config.db_max_connections, 4);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_malformed_number_is_config_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_allowed_origins() {
        assert_eq!(parse_allowed_origins(None), AllowedOrigins::Any);
        assert_eq!(parse_allowed_origins(Some(" * ")), AllowedOrigins::Any);

        match parse_allowed_origins(Some("http://localhost:3000, ,https://vocab.example")) {
            AllowedOrigins::List(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[0], "http://localhost:3000");
            }
            AllowedOrigins::Any => panic!("expected a list"),
        }
    }
}
