// Application configuration
// Server settings resolved from environment variables

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use crate::services::mail::DEFAULT_RESEND_API_URL;
use crate::services::stream::{StreamPacing, DEFAULT_CHUNK_CHARS, DEFAULT_CHUNK_DELAY_MS};

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LEAD_EMAIL: &str = "contact@pivcor.com";
pub const DEFAULT_FROM_EMAIL: &str = "PIVCOR <noreply@pivcor.com>";
pub const DEFAULT_MAX_DURATION_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid bind address '{0}'")]
    InvalidAddress(String),

    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    InvalidAddress,
    InvalidPort,
    InvalidNumber,
}

impl ConfigErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigErrorCode::InvalidAddress => "CONFIG_INVALID_ADDRESS",
            ConfigErrorCode::InvalidPort => "CONFIG_INVALID_PORT",
            ConfigErrorCode::InvalidNumber => "CONFIG_INVALID_NUMBER",
        }
    }
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::InvalidAddress(_) => ConfigErrorCode::InvalidAddress,
            ConfigError::InvalidPort(_) => ConfigErrorCode::InvalidPort,
            ConfigError::InvalidNumber { .. } => ConfigErrorCode::InvalidNumber,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// Inbox receiving leads and contact requests
    pub lead_email: String,
    pub from_email: String,
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    /// Ceiling on a single chat response
    pub max_duration: Duration,
    pub pacing: StreamPacing,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            lead_email: DEFAULT_LEAD_EMAIL.to_string(),
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            max_duration: Duration::from_secs(DEFAULT_MAX_DURATION_SECS),
            pacing: StreamPacing::default(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

impl AppConfig {
    /// Read settings through `lookup`; unset or blank variables take their default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("PIVCOR_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidAddress(bind_raw.clone()))?;

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let max_secs = match get("CHAT_MAX_DURATION_SECS") {
            Some(raw) => parse_number::<u64>("CHAT_MAX_DURATION_SECS", &raw)?,
            None => DEFAULT_MAX_DURATION_SECS,
        };
        let chunk_chars = match get("CHAT_STREAM_CHUNK") {
            Some(raw) => parse_number::<usize>("CHAT_STREAM_CHUNK", &raw)?,
            None => DEFAULT_CHUNK_CHARS,
        };
        let delay_ms = match get("CHAT_STREAM_DELAY_MS") {
            Some(raw) => parse_number::<u64>("CHAT_STREAM_DELAY_MS", &raw)?,
            None => DEFAULT_CHUNK_DELAY_MS,
        };

        if chunk_chars == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "CHAT_STREAM_CHUNK",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            bind,
            port,
            lead_email: get("LEAD_EMAIL").unwrap_or_else(|| DEFAULT_LEAD_EMAIL.to_string()),
            from_email: get("LEAD_FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            resend_api_key: get("RESEND_API_KEY"),
            resend_api_url: get("RESEND_API_URL").unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            max_duration: Duration::from_secs(max_secs),
            pacing: StreamPacing {
                chunk_chars,
                delay: Duration::from_millis(delay_ms),
            },
        })
    }

    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
