//! Runner configuration
//!
//! Settings are read once from `RUNNER_*` environment variables at startup
//! and stay fixed for the lifetime of the process. Every invalid value fails
//! fast with an error naming the variable.

use anyhow::{Context, Result, bail};
use std::time::Duration;
use styleagent_client::ClientSettings;

pub const ENV_API_BASE_URL: &str = "RUNNER_API_BASE_URL";
pub const ENV_API_KEY: &str = "RUNNER_API_KEY";
pub const ENV_HTTP_TIMEOUT_SECONDS: &str = "RUNNER_HTTP_TIMEOUT_SECONDS";
pub const ENV_HTTP_RETRIES: &str = "RUNNER_HTTP_RETRIES";
pub const ENV_POLL_INTERVAL_SECONDS: &str = "RUNNER_POLL_INTERVAL_SECONDS";

/// Runner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL (e.g., "http://localhost:8000"), without trailing slash
    pub api_base_url: String,

    /// Bearer credential for the backend
    pub api_key: Option<String>,

    /// Timeout of a single HTTP call
    pub http_timeout: Duration,

    /// Retries after the first attempt for network errors and 5xx responses
    pub http_retries: u32,

    /// How long to wait between polls
    pub poll_interval: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            api_key: None,
            http_timeout: Duration::from_secs(10),
            http_retries: 2,
            poll_interval: Duration::from_secs(5),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised variables (all optional):
    /// - RUNNER_API_BASE_URL (default: http://localhost:8000)
    /// - RUNNER_API_KEY (empty means no credential)
    /// - RUNNER_HTTP_TIMEOUT_SECONDS (float, > 0, default: 10)
    /// - RUNNER_HTTP_RETRIES (integer, >= 0, default: 2)
    /// - RUNNER_POLL_INTERVAL_SECONDS (float, > 0, default: 5)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        config.api_key = lookup(ENV_API_KEY).filter(|key| !key.is_empty());

        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECONDS) {
            config.http_timeout = parse_seconds(ENV_HTTP_TIMEOUT_SECONDS, &raw)?;
        }

        if let Some(raw) = lookup(ENV_HTTP_RETRIES) {
            config.http_retries = parse_retries(&raw)?;
        }

        if let Some(raw) = lookup(ENV_POLL_INTERVAL_SECONDS) {
            config.poll_interval = parse_seconds(ENV_POLL_INTERVAL_SECONDS, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            bail!("{ENV_API_BASE_URL} cannot be empty");
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            bail!("{ENV_API_BASE_URL} must start with http:// or https://");
        }

        if self.http_timeout.is_zero() {
            bail!("{ENV_HTTP_TIMEOUT_SECONDS} must be > 0");
        }

        if self.poll_interval.is_zero() {
            bail!("{ENV_POLL_INTERVAL_SECONDS} must be > 0");
        }

        Ok(())
    }

    /// Settings for the backend client
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            timeout: self.http_timeout,
            retries: self.http_retries,
            ..ClientSettings::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8000".to_string())
    }
}

fn parse_seconds(name: &str, raw: &str) -> Result<Duration> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{name} must be a number of seconds, got {raw:?}"))?;

    if !seconds.is_finite() || seconds <= 0.0 {
        bail!("{name} must be > 0");
    }

    Duration::try_from_secs_f64(seconds).with_context(|| format!("{name} is out of range"))
}

fn parse_retries(raw: &str) -> Result<u32> {
    let retries: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{ENV_HTTP_RETRIES} must be an integer, got {raw:?}"))?;

    if retries < 0 {
        bail!("{ENV_HTTP_RETRIES} must be >= 0");
    }

    u32::try_from(retries).with_context(|| format!("{ENV_HTTP_RETRIES} is out of range"))
}
