//! Error types for the job model

use thiserror::Error;

use crate::domain::job::JobStatus;

/// Errors raised while parsing jobs or moving them through the state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// A job object from the backend is malformed
    #[error("Invalid job payload: {0}")]
    Validation(String),

    /// The backend sent a job type this runner does not handle
    #[error("Unsupported job type: {0}")]
    UnsupportedJobType(String),

    /// A status change that is not in the transition table
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the job was in
        from: JobStatus,
        /// Status that was requested
        to: JobStatus,
    },
}

impl JobError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this error comes from a malformed backend payload
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnsupportedJobType(_))
    }
}
