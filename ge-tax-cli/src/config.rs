//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use nbg_client::DEFAULT_BASE_URL;

const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    /// Zero keeps cached rates forever.
    pub cache_ttl: Duration,
    pub cache_disabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("NBG_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let cache_ttl = match lookup("NBG_CACHE_TTL_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("NBG_CACHE_TTL_SECS must be a whole number of seconds, got {raw:?}")
            })?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        let cache_disabled = match lookup("NBG_CACHE_DISABLED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("NBG_CACHE_DISABLED must be true or false, got {raw:?}")
            })?,
            None => false,
        };

        Ok(Self {
            api_url,
            cache_ttl: Duration::from_secs(cache_ttl),
            cache_disabled,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
