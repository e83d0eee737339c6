use super::util::rate_limit::DEFAULT_REQUESTS_PER_MINUTE;
use std::env;
use std::num::NonZeroU32;
use thiserror::Error;

pub const DEFAULT_ONLINE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_OFFLINE_URL: &str = "http://localhost:8080/ors";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got \"{value}\"")]
    InvalidNumber { name: &'static str, value: String },
}

/// Where the two routing engines live and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Key for the hosted API. The online engine refuses to start without it.
    pub api_key: Option<String>,
    pub online_url: String,
    pub offline_url: String,
    pub requests_per_minute: NonZeroU32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            online_url: DEFAULT_ONLINE_URL.to_string(),
            offline_url: DEFAULT_OFFLINE_URL.to_string(),
            requests_per_minute: NonZeroU32::new(DEFAULT_REQUESTS_PER_MINUTE)
                .unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl EngineConfig {
    /// Reads `ORS_API_KEY`, `ORS_ONLINE_URL`, `ORS_OFFLINE_URL` and
    /// `ORS_RATE_LIMIT_PER_MINUTE` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.api_key = lookup("ORS_API_KEY").filter(|k| !k.trim().is_empty());
        if let Some(url) = lookup("ORS_ONLINE_URL") {
            config.online_url = url;
        }
        if let Some(url) = lookup("ORS_OFFLINE_URL") {
            config.offline_url = url;
        }
        if let Some(raw) = lookup("ORS_RATE_LIMIT_PER_MINUTE") {
            config.requests_per_minute = raw
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "ORS_RATE_LIMIT_PER_MINUTE",
                    value: raw.clone(),
                })?;
        }
        Ok(config)
    }
}
