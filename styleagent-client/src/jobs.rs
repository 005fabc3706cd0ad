//! Job-related API endpoints

use reqwest::Method;
use serde_json::Value;
use styleagent_core::domain::job::{Job, JobStatus};
use styleagent_core::domain::result::JobExecutionResult;
use styleagent_core::dto::job::{CompleteJobRequest, HeartbeatRequest};
use tracing::debug;

use crate::RunnerClient;
use crate::error::{ClientError, Result};

impl RunnerClient {
    // =============================================================================
    // Job Discovery
    // =============================================================================

    /// List pending jobs, at most `limit`
    ///
    /// The backend may answer with a bare array or with `{"items": [...]}`.
    /// One malformed job fails the whole call.
    pub async fn list_pending_jobs(&self, limit: u32) -> Result<Vec<Job>> {
        let limit = limit.to_string();
        let payload = self
            .transport
            .request_json(
                Method::GET,
                "/runner/jobs",
                None,
                &[("status", "pending"), ("limit", limit.as_str())],
            )
            .await?;

        let items = match &payload {
            Value::Array(items) => items,
            Value::Object(object) => match object.get("items") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(ClientError::InvalidPayload(
                        "jobs object has no items array".to_string(),
                    ));
                }
            },
            _ => {
                return Err(ClientError::InvalidPayload(
                    "jobs payload must be an array or an object with items".to_string(),
                ));
            }
        };

        let jobs = items
            .iter()
            .map(Job::from_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = jobs.len(), "Fetched pending jobs");
        Ok(jobs)
    }

    /// Get a job by ID
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let path = format!("/runner/jobs/{}", job_id);
        let payload = self
            .transport
            .request_json(Method::GET, &path, None, &[])
            .await?;

        Ok(Job::from_value(&payload)?)
    }

    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Claim a job for execution by this runner
    pub async fn claim_job(&self, job_id: &str) -> Result<()> {
        let path = format!("/runner/jobs/{}/claim", job_id);
        self.transport
            .request_json(Method::POST, &path, None, &[])
            .await?;
        Ok(())
    }

    /// Report that a job is alive in `status`
    pub async fn heartbeat_job(&self, job_id: &str, status: JobStatus) -> Result<()> {
        let path = format!("/runner/jobs/{}/heartbeat", job_id);
        let body = Self::to_body(&HeartbeatRequest { status })?;
        self.transport
            .request_json(Method::POST, &path, Some(&body), &[])
            .await?;
        Ok(())
    }

    /// Submit the terminal result of a job, with its logs
    pub async fn complete_job(&self, result: &JobExecutionResult) -> Result<()> {
        let path = format!("/runner/jobs/{}/complete", result.job_id);
        let body = Self::to_body(&CompleteJobRequest::from(result))?;
        self.transport
            .request_json(Method::POST, &path, Some(&body), &[])
            .await?;
        Ok(())
    }
}
