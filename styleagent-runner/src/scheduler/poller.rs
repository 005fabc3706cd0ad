//! Job poller
//!
//! Polls the backend for pending jobs and runs them one at a time.
//! For each job the sequence is claim, heartbeat(`running`), execute,
//! complete, then emit the job's log lines. Every step is awaited before the
//! next one starts and nothing is spawned, so at most one job is in flight.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use styleagent_client::{Sleeper, TokioSleeper};
use styleagent_core::domain::job::{Job, JobStatus};
use styleagent_core::domain::result::JobExecutionResult;
use tracing::{debug, info};

use crate::repository::JobRepository;
use crate::service::ExecutionService;
use crate::sinks::{LogSink, StdoutSink};

/// Job poller that fetches, runs and reports jobs
pub struct JobPoller {
    repository: Arc<dyn JobRepository>,
    executor: Arc<dyn ExecutionService>,
    poll_interval: Duration,
    sleeper: Arc<dyn Sleeper>,
    sink: Arc<dyn LogSink>,
}

impl JobPoller {
    /// Creates a new job poller emitting log lines to stdout
    pub fn new(
        repository: Arc<dyn JobRepository>,
        executor: Arc<dyn ExecutionService>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            repository,
            executor,
            poll_interval,
            sleeper: Arc::new(TokioSleeper),
            sink: Arc::new(StdoutSink),
        }
    }

    /// Replaces the sleeper used between polls
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replaces the destination of job log lines
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Fetches at most one pending job and runs it
    ///
    /// Returns `None` without touching the backend further when nothing is pending.
    pub async fn poll_once(&self) -> Result<Option<JobExecutionResult>> {
        debug!("Polling for pending jobs");

        let jobs = self
            .repository
            .list_pending_jobs(1)
            .await
            .context("Failed to fetch pending jobs")?;

        let Some(job) = jobs.into_iter().next() else {
            debug!("No jobs available");
            return Ok(None);
        };

        self.execute_job(&job).await.map(Some)
    }

    /// Fetches a specific job by ID and runs it, whatever its backend status
    pub async fn run_job_id(&self, job_id: &str) -> Result<JobExecutionResult> {
        let job = self
            .repository
            .get_job(job_id)
            .await
            .with_context(|| format!("Failed to fetch job {}", job_id))?;

        self.execute_job(&job).await
    }

    /// Runs the full lifecycle of a single job
    async fn execute_job(&self, job: &Job) -> Result<JobExecutionResult> {
        let job_id = job.job_id();
        info!(job_id, job_type = %job.job_type(), "Running job");

        self.repository
            .claim_job(job_id)
            .await
            .with_context(|| format!("Failed to claim job {}", job_id))?;

        self.repository
            .heartbeat_job(job_id, JobStatus::Running)
            .await
            .with_context(|| format!("Failed to send heartbeat for job {}", job_id))?;

        let result = self
            .executor
            .execute(job)
            .await
            .with_context(|| format!("Failed to execute job {}", job_id))?;

        self.repository
            .complete_job(&result)
            .await
            .with_context(|| format!("Failed to complete job {}", job_id))?;

        for log in &result.logs {
            let line = log.to_line().context("Failed to serialize job log")?;
            self.sink.emit(&line);
        }

        info!(job_id, status = %result.status(), "Job finished");
        Ok(result)
    }

    /// Polls forever, sleeping the poll interval after each cycle
    ///
    /// Only returns when a poll cycle fails.
    pub async fn poll_forever(&self) -> Result<()> {
        info!(interval = ?self.poll_interval, "Starting job poller");

        loop {
            self.poll_once().await?;
            self.sleeper.sleep(self.poll_interval).await;
        }
    }
}
