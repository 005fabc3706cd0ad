//! Core domain types
//!
//! This module contains the job model used by the runner: the job itself,
//! its status state machine, the structured logs produced while running it
//! and the terminal result reported back to the backend.

pub mod job;
pub mod log;
pub mod result;
