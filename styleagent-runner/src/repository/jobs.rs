//! Jobs repository
//!
//! Handles communication with the backend for job-related operations:
//! - Fetching pending jobs, or one job by ID
//! - Claiming jobs
//! - Sending heartbeats
//! - Completing jobs with results

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use styleagent_client::RunnerClient;
use styleagent_core::domain::job::{Job, JobStatus};
use styleagent_core::domain::result::JobExecutionResult;

/// Repository trait for job-related operations with the backend
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Fetches up to `limit` pending jobs
    async fn list_pending_jobs(&self, limit: u32) -> Result<Vec<Job>>;

    /// Fetches a single job by ID
    async fn get_job(&self, job_id: &str) -> Result<Job>;

    /// Claims a job for execution
    async fn claim_job(&self, job_id: &str) -> Result<()>;

    /// Reports the job's current status
    async fn heartbeat_job(&self, job_id: &str, status: JobStatus) -> Result<()>;

    /// Submits the execution result and its logs
    async fn complete_job(&self, result: &JobExecutionResult) -> Result<()>;
}

/// HTTP implementation of JobRepository
pub struct HttpJobRepository {
    client: Arc<RunnerClient>,
}

impl HttpJobRepository {
    /// Creates a new HTTP job repository
    pub fn new(client: Arc<RunnerClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobRepository for HttpJobRepository {
    async fn list_pending_jobs(&self, limit: u32) -> Result<Vec<Job>> {
        Ok(self.client.list_pending_jobs(limit).await?)
    }

    async fn get_job(&self, job_id: &str) -> Result<Job> {
        Ok(self.client.get_job(job_id).await?)
    }

    async fn claim_job(&self, job_id: &str) -> Result<()> {
        Ok(self.client.claim_job(job_id).await?)
    }

    async fn heartbeat_job(&self, job_id: &str, status: JobStatus) -> Result<()> {
        Ok(self.client.heartbeat_job(job_id, status).await?)
    }

    async fn complete_job(&self, result: &JobExecutionResult) -> Result<()> {
        Ok(self.client.complete_job(result).await?)
    }
}
