//! Server configuration.
//!
//! Loaded from `PAIRLINE_*` environment variables with defaults for
//! everything except the token secret. The secret is redacted in Debug output.

use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Default HTTP/websocket bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default CORS origin (the development web client).
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Pending outbound frames per participant before new frames are dropped.
pub const DEFAULT_OUTBOUND_BUFFER: usize = 256;

/// Pending admission/removal/routing events the hub mailbox holds.
pub const DEFAULT_HUB_MAILBOX: usize = 1024;

/// Display name given to connections without a credential.
pub const DEFAULT_ANONYMOUS_NAME: &str = "Anonymous";

/// Default log level when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,

    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,

    pub outbound_buffer: usize,

    pub hub_mailbox: usize,

    /// HS256 secret for bearer tokens. Without it every presented token is invalid.
    pub jwt_secret: Option<SecretString>,

    pub anonymous_name: String,

    /// Reject connections with a bad token instead of admitting them anonymously.
    pub reject_invalid_tokens: bool,

    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_owned()],
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            hub_mailbox: DEFAULT_HUB_MAILBOX,
            jwt_secret: None,
            anonymous_name: DEFAULT_ANONYMOUS_NAME.to_owned(),
            reject_invalid_tokens: true,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty());

        let allowed_origins = match get("PAIRLINE_ALLOWED_ORIGINS") {
            Some(raw) => {
                let origins: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect();
                if origins.is_empty() {
                    return Err(ConfigError::InvalidValue(format!(
                        "PAIRLINE_ALLOWED_ORIGINS lists no origins: '{raw}'"
                    )));
                }
                origins
            }
            None => defaults.allowed_origins,
        };

        let outbound_buffer = parse_positive(vars, "PAIRLINE_OUTBOUND_BUFFER")?
            .unwrap_or(defaults.outbound_buffer);
        let hub_mailbox =
            parse_positive(vars, "PAIRLINE_HUB_MAILBOX")?.unwrap_or(defaults.hub_mailbox);

        let reject_invalid_tokens = match get("PAIRLINE_REJECT_INVALID_TOKENS") {
            Some(raw) => bool::from_str(raw.trim()).map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "PAIRLINE_REJECT_INVALID_TOKENS must be true or false, got '{raw}'"
                ))
            })?,
            None => defaults.reject_invalid_tokens,
        };

        Ok(Self {
            bind_address: get("PAIRLINE_BIND_ADDRESS")
                .cloned()
                .unwrap_or(defaults.bind_address),
            allowed_origins,
            outbound_buffer,
            hub_mailbox,
            jwt_secret: get("PAIRLINE_JWT_SECRET").cloned().map(SecretString::from),
            anonymous_name: get("PAIRLINE_ANONYMOUS_NAME")
                .cloned()
                .unwrap_or(defaults.anonymous_name),
            reject_invalid_tokens,
            log_level: get("PAIRLINE_LOG_LEVEL")
                .cloned()
                .unwrap_or(defaults.log_level),
        })
    }
}

fn parse_positive(vars: &HashMap<String, String>, key: &str) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = vars.get(key).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidValue(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
        Ok(n) => Ok(Some(n)),
    }
}
