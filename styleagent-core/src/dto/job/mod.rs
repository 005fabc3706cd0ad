//! Job DTOs sent from the runner to the backend

use serde::Serialize;
use serde_json::Value;

use crate::domain::job::JobStatus;
use crate::domain::log::JobLog;
use crate::domain::result::JobExecutionResult;

/// Body of `POST /runner/jobs/{id}/heartbeat`
#[derive(Debug, Clone, Serialize)]
pub struct HeartbeatRequest {
    pub status: JobStatus,
}

/// Body of `POST /runner/jobs/{id}/complete`
///
/// `result` and `error` are always present, one of them `null`.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteJobRequest<'a> {
    pub status: JobStatus,
    pub result: Option<&'a Value>,
    pub error: Option<&'a str>,
    pub logs: &'a [JobLog],
}

impl<'a> From<&'a JobExecutionResult> for CompleteJobRequest<'a> {
    fn from(result: &'a JobExecutionResult) -> Self {
        Self {
            status: result.status(),
            result: result.result(),
            error: result.error(),
            logs: &result.logs,
        }
    }
}
