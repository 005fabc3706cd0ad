//! StyleAgent Runner
//!
//! A single-job worker that executes backend jobs such as compiling a style
//! version for Capture One.
//!
//! Architecture:
//! - Configuration: Load settings from `RUNNER_*` environment variables
//! - Repositories: HTTP communication with the backend job endpoints
//! - Services: Job execution and per-kind handlers
//! - Scheduler: Job polling and lifecycle management
//! - Sinks: Where finished jobs' log lines are written
//!
//! Diagnostics go to stderr through `tracing`; stdout carries one JSON line
//! per job log entry.

mod cli;
mod config;
mod repository;
mod scheduler;
mod service;
mod sinks;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::repository::{HttpJobRepository, JobRepository};
use crate::scheduler::JobPoller;
use crate::service::{ExecutionService, StandardExecutionService};
use styleagent_client::RunnerClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "styleagent_runner=info,styleagent_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Invalid runner configuration")?;
    info!(
        api_base_url = %config.api_base_url,
        retries = config.http_retries,
        "Loaded configuration"
    );

    let client = Arc::new(
        RunnerClient::new(&config.client_settings()).context("Failed to build backend client")?,
    );

    let repository: Arc<dyn JobRepository> = Arc::new(HttpJobRepository::new(client.clone()));
    let executor: Arc<dyn ExecutionService> = Arc::new(StandardExecutionService::new(client));
    let poller = JobPoller::new(repository, executor, config.poll_interval);

    let outcome = match cli.selected() {
        Command::Poll => poller.poll_forever().await,
        Command::Once => match poller.poll_once().await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => {
                info!("No pending jobs");
                Ok(())
            }
            Err(e) => Err(e),
        },
        Command::RunJob { job_id } => poller.run_job_id(&job_id).await.map(|_| ()),
    };

    if let Err(e) = &outcome {
        error!("Runner stopped: {:#}", e);
    }

    outcome
}
