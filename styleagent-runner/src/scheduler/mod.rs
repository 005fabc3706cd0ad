//! Scheduler layer for the runner
//!
//! This layer handles polling the backend for pending jobs and driving
//! each one from claim to completion, strictly one job at a time.

pub mod poller;

pub use poller::JobPoller;
