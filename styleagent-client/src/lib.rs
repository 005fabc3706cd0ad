//! StyleAgent HTTP Client
//!
//! A typed client for the StyleAgent backend runner API, built on a
//! retrying [`Transport`].
//!
//! # Example
//!
//! ```no_run
//! use styleagent_client::{ClientSettings, RunnerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), styleagent_client::ClientError> {
//!     let client = RunnerClient::new(&ClientSettings::new("http://localhost:8000"))?;
//!
//!     for job in client.list_pending_jobs(1).await? {
//!         println!("Pending job: {}", job.job_id());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
pub mod settings;
pub mod sleep;
mod styles;
pub mod transport;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use settings::ClientSettings;
pub use sleep::{Sleeper, TokioSleeper};
pub use styles::CompileTarget;
pub use transport::Transport;

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// HTTP client for the backend runner API
///
/// Methods are grouped by resource:
/// - Job lifecycle (list pending, get, claim, heartbeat, complete)
/// - Style compilation
#[derive(Clone)]
pub struct RunnerClient {
    transport: Transport,
}

impl RunnerClient {
    /// Create a new client from settings
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(settings)?,
        })
    }

    /// Create a client whose retry backoff waits through `sleeper`
    pub fn with_sleeper(settings: &ClientSettings, sleeper: Arc<dyn Sleeper>) -> Result<Self> {
        Ok(Self {
            transport: Transport::with_sleeper(settings, sleeper)?,
        })
    }

    /// Create a client around an existing transport
    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Access the underlying transport
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Serialize a request body to JSON
    fn to_body<T: Serialize>(body: &T) -> Result<Value> {
        serde_json::to_value(body)
            .map_err(|e| ClientError::InvalidRequest(format!("Failed to encode request body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RunnerClient::new(&ClientSettings::new("http://localhost:8000")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = RunnerClient::new(&ClientSettings::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_rejects_unprintable_api_key() {
        let settings = ClientSettings {
            api_key: Some("bad\nkey".to_string()),
            ..ClientSettings::default()
        };
        assert!(matches!(
            RunnerClient::new(&settings),
            Err(ClientError::InvalidRequest(_))
        ));
    }
}
