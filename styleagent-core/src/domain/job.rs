//! Job domain types
//!
//! A job is parsed from the backend once and never mutated afterwards:
//! every status change produces a new [`Job`] value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::JobError;

/// Job execution status
///
/// `picked_up → running → {succeeded | failed}`. The two terminal states have
/// no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    PickedUp,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Every status, in lifecycle order
    pub const ALL: [JobStatus; 4] = [
        JobStatus::PickedUp,
        JobStatus::Running,
        JobStatus::Succeeded,
        JobStatus::Failed,
    ];

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::PickedUp => "picked_up",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        }
    }

    /// Parses a wire name, returning `None` for anything unknown
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == name)
    }

    /// Statuses reachable from this one in a single step
    pub fn allowed_transitions(self) -> &'static [JobStatus] {
        match self {
            JobStatus::PickedUp => &[JobStatus::Running],
            JobStatus::Running => &[JobStatus::Succeeded, JobStatus::Failed],
            JobStatus::Succeeded | JobStatus::Failed => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Validates a move to `target` and returns it
    pub fn transition_to(self, target: JobStatus) -> Result<JobStatus, JobError> {
        if self.allowed_transitions().contains(&target) {
            Ok(target)
        } else {
            Err(JobError::InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks `current → target` against the transition table.
pub fn transition_status(current: JobStatus, target: JobStatus) -> Result<JobStatus, JobError> {
    current.transition_to(target)
}

/// The closed set of job kinds the runner knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "compile_captureone")]
    CompileCaptureOne,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::CompileCaptureOne => "compile_captureone",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile_captureone" => Ok(JobType::CompileCaptureOne),
            other => Err(JobError::UnsupportedJobType(other.to_string())),
        }
    }
}

/// Payload of a `compile_captureone` job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCaptureOnePayload {
    pub style_id: String,
    pub version: String,
}

impl CompileCaptureOnePayload {
    fn from_object(object: &Map<String, Value>) -> Result<Self, JobError> {
        Ok(Self {
            style_id: required_str(object, "payload.style_id", "style_id")?.to_string(),
            version: required_str(object, "payload.version", "version")?.to_string(),
        })
    }
}

/// Typed payload, one variant per [`JobType`]
///
/// The job type is derived from the variant so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPayload {
    CompileCaptureOne(CompileCaptureOnePayload),
}

impl JobPayload {
    pub fn job_type(&self) -> JobType {
        match self {
            JobPayload::CompileCaptureOne(_) => JobType::CompileCaptureOne,
        }
    }
}

/// A unit of work claimed from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    job_id: String,
    payload: JobPayload,
    status: JobStatus,
}

impl Job {
    /// Creates a job in the initial `picked_up` status
    pub fn new(job_id: impl Into<String>, payload: JobPayload) -> Self {
        Self {
            job_id: job_id.into(),
            payload,
            status: JobStatus::PickedUp,
        }
    }

    /// Creates a job with an explicit status
    pub fn with_status(job_id: impl Into<String>, payload: JobPayload, status: JobStatus) -> Self {
        Self {
            job_id: job_id.into(),
            payload,
            status,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn job_type(&self) -> JobType {
        self.payload.job_type()
    }

    pub fn payload(&self) -> &JobPayload {
        &self.payload
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns a copy of this job in `target` status
    ///
    /// Fails with [`JobError::InvalidTransition`] when the move is not allowed.
    pub fn transition(&self, target: JobStatus) -> Result<Job, JobError> {
        let status = self.status.transition_to(target)?;
        Ok(Self {
            job_id: self.job_id.clone(),
            payload: self.payload.clone(),
            status,
        })
    }

    /// Parses a job object received from the backend
    ///
    /// Required: a non-empty string `job_id`, a known `job_type` and a
    /// `payload` object matching that type. Extra keys are ignored. An
    /// unrecognized `status` falls back to `picked_up`.
    pub fn from_value(value: &Value) -> Result<Job, JobError> {
        let object = value
            .as_object()
            .ok_or_else(|| JobError::validation("job must be a JSON object"))?;

        let job_id = required_str(object, "job_id", "job_id")?;
        if job_id.is_empty() {
            return Err(JobError::validation("job_id must be a non-empty string"));
        }

        let job_type: JobType = required_str(object, "job_type", "job_type")?.parse()?;

        let payload = object
            .get("payload")
            .ok_or_else(|| JobError::validation("missing field payload"))?
            .as_object()
            .ok_or_else(|| JobError::validation("payload must be an object"))?;

        let payload = match job_type {
            JobType::CompileCaptureOne => {
                JobPayload::CompileCaptureOne(CompileCaptureOnePayload::from_object(payload)?)
            }
        };

        let status = match object.get("status") {
            None | Some(Value::Null) => JobStatus::PickedUp,
            Some(raw) => match raw.as_str().and_then(JobStatus::from_name) {
                Some(status) => status,
                None => {
                    // TODO: reject unknown statuses once the backend contract pins the set
                    warn!(job_id, status = %raw, "Unrecognized job status, using picked_up");
                    JobStatus::PickedUp
                }
            },
        };

        Ok(Job {
            job_id: job_id.to_string(),
            payload,
            status,
        })
    }
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    label: &str,
    key: &str,
) -> Result<&'a str, JobError> {
    match object.get(key) {
        None => Err(JobError::validation(format!("missing field {label}"))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(JobError::validation(format!("{label} must be a string"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile_job_value() -> Value {
        json!({
            "job_id": "job_1",
            "job_type": "compile_captureone",
            "payload": {"style_id": "style_1", "version": "v2"},
            "status": "picked_up"
        })
    }

    #[test]
    fn test_valid_status_transitions() {
        assert_eq!(
            transition_status(JobStatus::PickedUp, JobStatus::Running),
            Ok(JobStatus::Running)
        );
        assert_eq!(
            transition_status(JobStatus::Running, JobStatus::Succeeded),
            Ok(JobStatus::Succeeded)
        );
        assert_eq!(
            transition_status(JobStatus::Running, JobStatus::Failed),
            Ok(JobStatus::Failed)
        );
    }

    #[test]
    fn test_transition_table_is_exhaustive() {
        let allowed = [
            (JobStatus::PickedUp, JobStatus::Running),
            (JobStatus::Running, JobStatus::Succeeded),
            (JobStatus::Running, JobStatus::Failed),
        ];

        for from in JobStatus::ALL {
            for to in JobStatus::ALL {
                let result = transition_status(from, to);
                if allowed.contains(&(from, to)) {
                    assert_eq!(result, Ok(to), "{from} -> {to} should be allowed");
                } else {
                    assert_eq!(
                        result,
                        Err(JobError::InvalidTransition { from, to }),
                        "{from} -> {to} should be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::PickedUp.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(JobStatus::PickedUp).unwrap(),
            json!("picked_up")
        );
        assert_eq!(JobStatus::from_name("succeeded"), Some(JobStatus::Succeeded));
        assert_eq!(JobStatus::from_name("queued"), None);
    }

    #[test]
    fn test_job_transition_returns_new_value() {
        let job = Job::new(
            "job_1",
            JobPayload::CompileCaptureOne(CompileCaptureOnePayload {
                style_id: "s1".to_string(),
                version: "v1".to_string(),
            }),
        );

        let running = job.transition(JobStatus::Running).unwrap();

        assert_eq!(job.status(), JobStatus::PickedUp);
        assert_eq!(running.status(), JobStatus::Running);
        assert_eq!(running.job_id(), "job_1");
        assert!(running.transition(JobStatus::PickedUp).is_err());
    }

    #[test]
    fn test_from_value_parses_compile_captureone() {
        let job = Job::from_value(&compile_job_value()).unwrap();

        assert_eq!(job.job_id(), "job_1");
        assert_eq!(job.job_type(), JobType::CompileCaptureOne);
        assert_eq!(job.status(), JobStatus::PickedUp);
        let JobPayload::CompileCaptureOne(payload) = job.payload();
        assert_eq!(payload.style_id, "style_1");
        assert_eq!(payload.version, "v2");
    }

    #[test]
    fn test_from_value_defaults_status_and_ignores_extra_keys() {
        let job = Job::from_value(&json!({
            "job_id": "job_2",
            "job_type": "compile_captureone",
            "payload": {"style_id": "s", "version": "v"},
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(job.status(), JobStatus::PickedUp);
    }

    #[test]
    fn test_from_value_keeps_known_status() {
        let mut value = compile_job_value();
        value["status"] = json!("running");

        let job = Job::from_value(&value).unwrap();
        assert_eq!(job.status(), JobStatus::Running);
    }

    #[test]
    fn test_from_value_unknown_status_falls_back() {
        let mut value = compile_job_value();
        value["status"] = json!("pending");
        assert_eq!(
            Job::from_value(&value).unwrap().status(),
            JobStatus::PickedUp
        );

        value["status"] = json!(42);
        assert_eq!(
            Job::from_value(&value).unwrap().status(),
            JobStatus::PickedUp
        );
    }

    #[test]
    fn test_from_value_missing_job_id() {
        let mut value = compile_job_value();
        value.as_object_mut().unwrap().remove("job_id");

        let err = Job::from_value(&value).unwrap_err();
        assert_eq!(err, JobError::validation("missing field job_id"));
    }

    #[test]
    fn test_from_value_empty_job_id() {
        let mut value = compile_job_value();
        value["job_id"] = json!("");

        assert!(Job::from_value(&value).unwrap_err().is_validation());
    }

    #[test]
    fn test_from_value_unsupported_type() {
        let mut value = compile_job_value();
        value["job_type"] = json!("unknown");

        let err = Job::from_value(&value).unwrap_err();
        assert_eq!(err, JobError::UnsupportedJobType("unknown".to_string()));
        assert!(err.to_string().contains("Unsupported job type"));
    }

    #[test]
    fn test_from_value_non_string_payload_fields() {
        let mut value = compile_job_value();
        value["payload"]["style_id"] = json!(7);
        assert_eq!(
            Job::from_value(&value).unwrap_err(),
            JobError::validation("payload.style_id must be a string")
        );

        let mut value = compile_job_value();
        value["payload"]["version"] = json!(null);
        assert_eq!(
            Job::from_value(&value).unwrap_err(),
            JobError::validation("payload.version must be a string")
        );
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(Job::from_value(&json!(["job_1"])).is_err());

        let mut value = compile_job_value();
        value["payload"] = json!("style_1");
        assert_eq!(
            Job::from_value(&value).unwrap_err(),
            JobError::validation("payload must be an object")
        );
    }
}
