//! Runtime configuration from the environment.
//!
//! `.env` is loaded by the binary before this runs, so variables defined
//! there and in the real environment are treated the same.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CURRENCY: &str = "$";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidDuration { var: &'static str, value: String },

    #[error("unknown token store '{0}', expected file, keyring or memory")]
    UnknownStore(String),
}

/// Where session tokens are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    File,
    Keyring,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreKind::File),
            "keyring" => Ok(StoreKind::Keyring),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub store: StoreKind,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub currency: String,
}

impl Config {
    /// Defaults pointed at `api_base_url`.
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            store: StoreKind::default(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`.
    ///
    /// API base URL: CARRENTAL_API_URL > VITE_BASE_URL > localhost default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("CARRENTAL_API_URL")
            .or_else(|| lookup("VITE_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::new(&api_base_url);

        if let Some(store) = lookup("CARRENTAL_TOKEN_STORE") {
            config.store = store.parse()?;
        }
        if let Some(v) = lookup("CARRENTAL_TIMEOUT_SECS") {
            config.timeout = parse_secs("CARRENTAL_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("CARRENTAL_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = parse_secs("CARRENTAL_CONNECT_TIMEOUT_SECS", &v)?;
        }
        if let Some(currency) = lookup("VITE_CURRENCY") {
            config.currency = currency;
        }
        Ok(config)
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidDuration {
            var,
            value: value.to_string(),
        })
}
