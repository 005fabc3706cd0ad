//! Log domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::job::JobStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

/// Lifecycle events recorded while a job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEvent {
    JobPickedUp,
    JobRunning,
    JobSucceeded,
    JobFailed,
}

impl JobEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            JobEvent::JobPickedUp => "job_picked_up",
            JobEvent::JobRunning => "job_running",
            JobEvent::JobSucceeded => "job_succeeded",
            JobEvent::JobFailed => "job_failed",
        }
    }
}

impl fmt::Display for JobEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured log entry from job execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobLog {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub event: JobEvent,
    pub job_id: String,
    pub status: JobStatus,
    pub message: String,
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl JobLog {
    /// Creates an entry stamped with the current time and an empty context
    pub fn new(
        level: LogLevel,
        event: JobEvent,
        job_id: impl Into<String>,
        status: JobStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            event,
            job_id: job_id.into(),
            status,
            message: message.into(),
            context: Map::new(),
        }
    }

    pub fn info(
        event: JobEvent,
        job_id: impl Into<String>,
        status: JobStatus,
        message: impl Into<String>,
    ) -> Self {
        Self::new(LogLevel::Info, event, job_id, status, message)
    }

    pub fn error(
        event: JobEvent,
        job_id: impl Into<String>,
        status: JobStatus,
        message: impl Into<String>,
    ) -> Self {
        Self::new(LogLevel::Error, event, job_id, status, message)
    }

    /// Returns the entry with `key` added to its context
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Renders the entry as one line of JSON with keys sorted
    pub fn to_line(&self) -> serde_json::Result<String> {
        // Value objects are BTreeMap-backed, so going through Value sorts the keys.
        let value = serde_json::to_value(self)?;
        serde_json::to_string(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_entry_has_empty_context() {
        let log = JobLog::info(
            JobEvent::JobPickedUp,
            "job_1",
            JobStatus::PickedUp,
            "Picked up job type=compile_captureone",
        );

        assert_eq!(log.level, LogLevel::Info);
        assert_eq!(log.event, JobEvent::JobPickedUp);
        assert!(log.context.is_empty());
    }

    #[test]
    fn test_to_line_sorts_keys() {
        let log = JobLog::error(JobEvent::JobFailed, "job_1", JobStatus::Failed, "boom")
            .with_context("error", "backend down");

        let line = log.to_line().unwrap();
        assert!(!line.contains('\n'));

        let keys = [
            "\"context\"",
            "\"event\"",
            "\"job_id\"",
            "\"level\"",
            "\"message\"",
            "\"status\"",
            "\"timestamp\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| line.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{line}");

        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], json!("error"));
        assert_eq!(parsed["event"], json!("job_failed"));
        assert_eq!(parsed["status"], json!("failed"));
        assert_eq!(parsed["context"], json!({"error": "backend down"}));
    }

    #[test]
    fn test_with_context_embeds_json() {
        let log = JobLog::info(
            JobEvent::JobSucceeded,
            "job_1",
            JobStatus::Succeeded,
            "Job execution completed",
        )
        .with_context("result", json!({"artifact_id": "artifact_1"}));

        assert_eq!(log.context["result"]["artifact_id"], json!("artifact_1"));
    }
}
