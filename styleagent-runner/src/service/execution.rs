//! Execution service
//!
//! Runs a single job to completion:
//! - Records `job_picked_up`, then moves the job to `running`
//! - Dispatches to the handler for the job's kind
//! - Folds the handler outcome into a terminal `succeeded`/`failed` result
//!
//! Handler failures never escape this service. They become a `failed`
//! result with a `job_failed` log entry. Failed jobs are not retried here.

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use styleagent_client::RunnerClient;
use styleagent_core::JobError;
use styleagent_core::domain::job::{Job, JobPayload, JobStatus};
use styleagent_core::domain::log::{JobEvent, JobLog};
use styleagent_core::domain::result::JobExecutionResult;
use tracing::{error, info};

use super::captureone::run_compile_captureone;

/// Service trait for executing jobs
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Executes a job and returns its terminal result
    ///
    /// The only error is an invalid status transition, which means the job
    /// arrived in a status it cannot be started from.
    async fn execute(&self, job: &Job) -> Result<JobExecutionResult, JobError>;
}

/// Standard implementation of ExecutionService
pub struct StandardExecutionService {
    client: Arc<RunnerClient>,
}

impl StandardExecutionService {
    /// Creates a new standard execution service
    pub fn new(client: Arc<RunnerClient>) -> Self {
        Self { client }
    }

    /// Runs the handler for the job's kind
    async fn dispatch(&self, job: &Job) -> AnyResult<Value> {
        match job.payload() {
            JobPayload::CompileCaptureOne(payload) => {
                Ok(run_compile_captureone(&self.client, payload).await?)
            }
        }
    }
}

#[async_trait]
impl ExecutionService for StandardExecutionService {
    async fn execute(&self, job: &Job) -> Result<JobExecutionResult, JobError> {
        info!(job_id = job.job_id(), job_type = %job.job_type(), "Starting job execution");

        let mut logs = Vec::with_capacity(3);
        logs.push(JobLog::info(
            JobEvent::JobPickedUp,
            job.job_id(),
            job.status(),
            format!("Picked up job type={}", job.job_type()),
        ));

        let running = job.transition(JobStatus::Running)?;
        logs.push(JobLog::info(
            JobEvent::JobRunning,
            running.job_id(),
            running.status(),
            "Job execution started",
        ));

        match self.dispatch(&running).await {
            Ok(result) => {
                let succeeded = running.transition(JobStatus::Succeeded)?;
                info!(job_id = succeeded.job_id(), "Job succeeded");
                logs.push(
                    JobLog::info(
                        JobEvent::JobSucceeded,
                        succeeded.job_id(),
                        succeeded.status(),
                        "Job execution completed",
                    )
                    .with_context("result", result.clone()),
                );
                Ok(JobExecutionResult::succeeded(succeeded.job_id(), result, logs))
            }
            Err(e) => {
                let message = format!("{:#}", e);
                let failed = running.transition(JobStatus::Failed)?;
                error!(job_id = failed.job_id(), error = %message, "Job failed");
                logs.push(
                    JobLog::error(
                        JobEvent::JobFailed,
                        failed.job_id(),
                        failed.status(),
                        "Job execution failed",
                    )
                    .with_context("error", message.clone()),
                );
                Ok(JobExecutionResult::failed(failed.job_id(), message, logs))
            }
        }
    }
}
