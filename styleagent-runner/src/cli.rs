//! Command-line interface
//!
//! Backend settings come from `RUNNER_*` environment variables, so the CLI
//! only selects what the worker does.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "styleagent-runner", version)]
#[command(about = "Polling worker for StyleAgent backend jobs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Selected command, polling forever when none was given
    pub fn selected(&self) -> Command {
        self.command.clone().unwrap_or(Command::Poll)
    }
}

/// Worker commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Poll for pending jobs until the process is stopped
    Poll,
    /// Run at most one pending job and exit
    Once,
    /// Fetch a job by ID and run it
    RunJob {
        /// Job ID
        job_id: String,
    },
}
