use anyhow::{Result, anyhow};
use dotenvy::dotenv;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::eutils::client::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub eutils_base_url: String,
    pub eutils_timeout: Duration,
    pub log_level: tracing::Level,
}

impl Config {
    /// Reads configuration from the environment, loading `.env` if present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        Ok(Config {
            host: get_env_or_default(&lookup, "PAPERS_HOST", "0.0.0.0"),
            port: parse_env_or_default(&lookup, "PAPERS_PORT", 3000)?,
            eutils_base_url: get_env_or_default(&lookup, "EUTILS_BASE_URL", DEFAULT_BASE_URL),
            eutils_timeout: Duration::from_secs(parse_env_or_default(
                &lookup,
                "EUTILS_TIMEOUT_SECS",
                30,
            )?),
            log_level: parse_env_or_default(&lookup, "PAPERS_LOG_LEVEL", tracing::Level::INFO)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_env_or_default(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_env_or_default<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid value for {key} ({value:?}): {e}")),
        None => Ok(default),
    }
}
