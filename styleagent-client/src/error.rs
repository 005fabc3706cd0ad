//! Error types for the StyleAgent client

use reqwest::Method;
use styleagent_core::JobError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the network level (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend answered with a 5xx status
    #[error("Backend server error: {status} for {method} {path}")]
    ServerError {
        status: u16,
        method: Method,
        path: String,
    },

    /// Backend answered with a non-retryable error status (4xx)
    #[error("API error (status {status}) for {method} {path}: {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        method: Method,
        path: String,
        /// Response body
        message: String,
    },

    /// Every allowed attempt failed; `source` is the last failure
    #[error("Backend request failed after {attempts} attempt(s): {method} {path}")]
    RetriesExhausted {
        method: Method,
        path: String,
        attempts: u32,
        #[source]
        source: Box<ClientError>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response parsed as JSON but has the wrong shape
    #[error("Invalid payload from backend: {0}")]
    InvalidPayload(String),

    /// A job in the response failed validation
    #[error(transparent)]
    InvalidJob(#[from] JobError),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Whether another attempt may succeed: network failures and 5xx responses
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(e) => !e.is_builder(),
            Self::ServerError { .. } => true,
            _ => false,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if (400..500).contains(status))
    }

    /// Check if this error came from a malformed backend payload
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidJob(_) | Self::InvalidPayload(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_retries_exhausted_chains_last_cause() {
        let err = ClientError::RetriesExhausted {
            method: Method::GET,
            path: "/health".to_string(),
            attempts: 3,
            source: Box::new(ClientError::ServerError {
                status: 503,
                method: Method::GET,
                path: "/health".to_string(),
            }),
        };

        assert_eq!(
            err.to_string(),
            "Backend request failed after 3 attempt(s): GET /health"
        );
        assert_eq!(
            err.source().unwrap().to_string(),
            "Backend server error: 503 for GET /health"
        );
    }

    #[test]
    fn test_status_classification() {
        let not_found = ClientError::ApiError {
            status: 404,
            method: Method::GET,
            path: "/runner/jobs/x".to_string(),
            message: "{\"detail\":\"not found\"}".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(not_found.is_client_error());
        assert!(!not_found.is_retryable());

        let server = ClientError::ServerError {
            status: 500,
            method: Method::POST,
            path: "/x".to_string(),
        };
        assert!(server.is_retryable());
        assert!(!server.is_client_error());
    }

    #[test]
    fn test_invalid_job_is_validation() {
        let err = ClientError::from(JobError::UnsupportedJobType("unknown".to_string()));
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Unsupported job type: unknown");
    }
}
