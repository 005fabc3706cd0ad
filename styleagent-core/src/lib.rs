//! StyleAgent Core
//!
//! Core types shared by the StyleAgent runner components.
//!
//! This crate contains:
//! - Domain types: Job, JobStatus, JobLog and the result of one execution
//! - DTOs: Request bodies sent from the runner to the backend
//! - Errors: Validation and state machine errors

pub mod domain;
pub mod dto;
pub mod error;

pub use error::JobError;
