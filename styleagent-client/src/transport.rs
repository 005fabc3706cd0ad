//! HTTP transport with timeout, retry and backoff
//!
//! Every backend call goes through [`Transport::request_json`]:
//! - network failures and 5xx responses are retried, up to `retries + 1` attempts
//! - 4xx responses fail immediately with the response body attached
//! - an empty success body is read as `{}`

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::settings::ClientSettings;
use crate::sleep::{Sleeper, TokioSleeper};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("styleagent-runner/", env!("CARGO_PKG_VERSION"));

/// Delay before retry number `attempt + 1`: `base * 2^attempt`
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Retrying JSON-over-HTTP transport bound to one backend
#[derive(Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    retries: u32,
    backoff_base: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl Transport {
    /// Creates a transport that sleeps on the tokio timer between retries
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        Self::with_sleeper(settings, Arc::new(TokioSleeper))
    }

    /// Creates a transport with a custom sleeper (used by tests to skip backoff)
    pub fn with_sleeper(settings: &ClientSettings, sleeper: Arc<dyn Sleeper>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &settings.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| ClientError::InvalidRequest(format!("Invalid API key: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            retries: settings.retries,
            backoff_base: settings.backoff_base,
            sleeper,
        })
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a request and returns the decoded JSON body
    ///
    /// Retries network failures and 5xx responses with exponential backoff.
    /// When the last attempt fails, returns [`ClientError::RetriesExhausted`]
    /// with that failure as its source.
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Value> {
        let mut attempt: u32 = 0;

        loop {
            let failure = match self.send_once(&method, path, body, query).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            if attempt >= self.retries {
                warn!(%method, path, attempts = attempt + 1, error = %failure, "Backend request failed, giving up");
                return Err(ClientError::RetriesExhausted {
                    method,
                    path: path.to_string(),
                    attempts: attempt + 1,
                    source: Box::new(failure),
                });
            }

            let delay = backoff_delay(self.backoff_base, attempt);
            warn!(
                %method,
                path,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                error = %failure,
                "Backend request failed, retrying"
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending backend request");

        let mut request = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_server_error() {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                method: method.clone(),
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                method: method.clone(),
                path: path.to_string(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
