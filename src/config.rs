// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_MODE` | `local` (handlers read headers) or `authoriser` (middleware verdict) | `local` |
//! | `TOKEN_SECRET` | HS512 signing secret | Required in `authoriser` mode |
//! | `TOKEN_TTL_SECONDS` | Lifetime of issued tokens and sessions | `3600` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::str::FromStr;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const AUTH_MODE_ENV: &str = "AUTH_MODE";
pub const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECONDS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;
/// Upper bound for `TOKEN_TTL_SECONDS` (ten years).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Secret used in `local` mode when none is configured. Never for production.
const DEV_TOKEN_SECRET: &str = "local-development-secret";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is required when AUTH_MODE={mode}")]
    Missing { name: &'static str, mode: AuthMode },

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where handlers get their authoriser verdict from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Each handler resolves the `Authorization` header itself (no signature check)
    #[default]
    Local,
    /// The authoriser middleware verifies once per request and stores a verdict
    Authoriser,
}

impl FromStr for AuthMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthMode::Local),
            "authoriser" | "authorizer" => Ok(AuthMode::Authoriser),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Local => write!(f, "local"),
            AuthMode::Authoriser => write!(f, "authoriser"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `json` selects JSON lines; anything else is human-readable.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Authentication settings.
#[derive(Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    /// HS512 secret for signing and verification
    pub secret: String,
    /// Lifetime of issued tokens, in seconds
    pub token_ttl_seconds: u64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("mode", &self.mode)
            .field("secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl AuthConfig {
    /// Local mode with the development secret.
    pub fn local() -> Self {
        Self {
            mode: AuthMode::Local,
            secret: DEV_TOKEN_SECRET.to_string(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    /// Authoriser mode with the given secret.
    pub fn authoriser(secret: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Authoriser,
            secret: secret.into(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub auth: AuthConfig,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let token_ttl_seconds = parse_or(&lookup, TOKEN_TTL_ENV, DEFAULT_TOKEN_TTL_SECONDS)?;
        if token_ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                name: TOKEN_TTL_ENV,
                value: token_ttl_seconds.to_string(),
            });
        }

        let mode = match lookup(AUTH_MODE_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: AUTH_MODE_ENV,
                value,
            })?,
            None => AuthMode::default(),
        };

        let log_format = LogFormat::from_value(lookup(LOG_FORMAT_ENV).as_deref());

        let secret = match (lookup(TOKEN_SECRET_ENV).filter(|s| !s.is_empty()), mode) {
            (Some(secret), _) => secret,
            (None, AuthMode::Local) => {
                tracing::warn!("{TOKEN_SECRET_ENV} not set, using the development secret");
                DEV_TOKEN_SECRET.to_string()
            }
            (None, AuthMode::Authoriser) => {
                return Err(ConfigError::Missing {
                    name: TOKEN_SECRET_ENV,
                    mode,
                })
            }
        };

        Ok(Self {
            host,
            port,
            log_format,
            auth: AuthConfig {
                mode,
                secret,
                token_ttl_seconds,
            },
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_local_mode() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.auth.mode, AuthMode::Local);
        assert_eq!(config.auth.secret, DEV_TOKEN_SECRET);
        assert_eq!(config.auth.token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn authoriser_mode_requires_secret() {
        let result = Config::from_lookup(lookup_from(&[(AUTH_MODE_ENV, "authoriser")]));
        assert!(matches!(result, Err(ConfigError::Missing { .. })));

        let config = Config::from_lookup(lookup_from(&[
            (AUTH_MODE_ENV, "Authoriser"),
            (TOKEN_SECRET_ENV, "s3cret"),
            (TOKEN_TTL_ENV, "60"),
            (LOG_FORMAT_ENV, "json"),
        ]))
        .unwrap();
        assert_eq!(config.auth.mode, AuthMode::Authoriser);
        assert_eq!(config.auth.secret, "s3cret");
        assert_eq!(config.auth.token_ttl_seconds, 60);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_invalid_values() {
        let result = Config::from_lookup(lookup_from(&[(PORT_ENV, "eighty")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: PORT_ENV, .. })));

        let result = Config::from_lookup(lookup_from(&[(AUTH_MODE_ENV, "open")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: AUTH_MODE_ENV, .. })));
    }

    #[test]
    fn rejects_oversized_token_ttl() {
        let result = Config::from_lookup(lookup_from(&[(TOKEN_TTL_ENV, "100000000000000")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: TOKEN_TTL_ENV, .. })));

        let max = MAX_TOKEN_TTL_SECONDS.to_string();
        let config = Config::from_lookup(lookup_from(&[(TOKEN_TTL_ENV, max.as_str())])).unwrap();
        assert_eq!(config.auth.token_ttl_seconds, MAX_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", AuthConfig::authoriser("hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
