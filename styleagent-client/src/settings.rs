//! Connection settings for the backend client

use std::time::Duration;

/// Settings the transport is built from
///
/// Produced once by the runner configuration and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Bearer credential sent as `Authorization: Bearer <key>`
    pub api_key: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Extra attempts after the first one for retryable failures
    pub retries: u32,

    /// First backoff delay; doubles on every retry
    pub backoff_base: Duration,
}

impl ClientSettings {
    /// Creates settings for `base_url` with default timeouts and retries
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
            retries: 2,
            backoff_base: Duration::from_millis(250),
        }
    }
}
