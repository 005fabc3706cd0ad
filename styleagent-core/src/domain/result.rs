//! Terminal result of one job execution

use serde_json::Value;

use super::job::JobStatus;
use super::log::JobLog;

/// How an execution ended
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The handler returned a result object
    Succeeded(Value),
    /// The handler failed with this error description
    Failed(String),
}

/// Result of executing a job, with the logs produced along the way
#[derive(Debug, Clone, PartialEq)]
pub struct JobExecutionResult {
    pub job_id: String,
    pub outcome: JobOutcome,
    pub logs: Vec<JobLog>,
}

impl JobExecutionResult {
    pub fn succeeded(job_id: impl Into<String>, result: Value, logs: Vec<JobLog>) -> Self {
        Self {
            job_id: job_id.into(),
            outcome: JobOutcome::Succeeded(result),
            logs,
        }
    }

    pub fn failed(job_id: impl Into<String>, error: impl Into<String>, logs: Vec<JobLog>) -> Self {
        Self {
            job_id: job_id.into(),
            outcome: JobOutcome::Failed(error.into()),
            logs,
        }
    }

    /// Final status, always terminal
    pub fn status(&self) -> JobStatus {
        match self.outcome {
            JobOutcome::Succeeded(_) => JobStatus::Succeeded,
            JobOutcome::Failed(_) => JobStatus::Failed,
        }
    }

    /// Result payload, present only on success
    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            JobOutcome::Succeeded(value) => Some(value),
            JobOutcome::Failed(_) => None,
        }
    }

    /// Error description, present only on failure
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            JobOutcome::Succeeded(_) => None,
            JobOutcome::Failed(error) => Some(error),
        }
    }
}
