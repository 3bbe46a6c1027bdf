//! Runtime configuration read from the environment.
//!
//! `.env` is loaded by `dotenv` before the variables below are read.
//!
//! | Variable               | Default         |
//! |------------------------|-----------------|
//! | `DECOR_BIND_ADDR`      | `127.0.0.1`     |
//! | `DECOR_PORT`           | `8080`          |
//! | `DECOR_BACKEND_URL`    | required        |
//! | `DECOR_SESSION_TTL`    | `8h` (max 30d)  |
//! | `DECOR_SESSION_COOKIE` | `decor_session` |
//! | `DECOR_LOG_LEVEL`      | `info`          |

use std::{env, time::Duration};

use crate::session::MAX_TTL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Base URL of the business REST backend, without trailing slash.
    pub backend_url: String,
    pub session_ttl: Duration,
    pub session_cookie: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("DECOR_BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DECOR_BACKEND_URL"))?;
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "DECOR_BACKEND_URL",
                reason: "expected an http(s) URL".into(),
            });
        }

        let port = match lookup("DECOR_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "DECOR_PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        let session_ttl = match lookup("DECOR_SESSION_TTL") {
            Some(raw) => humantime::parse_duration(&raw).map_err(|e| ConfigError::Invalid {
                var: "DECOR_SESSION_TTL",
                reason: e.to_string(),
            })?,
            None => Duration::from_secs(8 * 60 * 60),
        };
        if session_ttl.is_zero() {
            return Err(ConfigError::Invalid {
                var: "DECOR_SESSION_TTL",
                reason: "must be greater than zero".into(),
            });
        }
        if session_ttl > MAX_TTL {
            return Err(ConfigError::Invalid {
                var: "DECOR_SESSION_TTL",
                reason: format!("must not exceed {}", humantime::format_duration(MAX_TTL)),
            });
        }

        Ok(Self {
            bind_addr: lookup("DECOR_BIND_ADDR").unwrap_or_else(|| "127.0.0.1".into()),
            port,
            backend_url: backend_url.trim_end_matches('/').to_string(),
            session_ttl,
            session_cookie: lookup("DECOR_SESSION_COOKIE")
                .unwrap_or_else(|| "decor_session".into()),
            log_level: lookup("DECOR_LOG_LEVEL").unwrap_or_else(|| "info".into()),
        })
    }
}
