//! Service layer
//!
//! Services contain the runner's business logic: executing a job and the
//! per-kind handlers it dispatches to.
//!
//! All services are trait-based to enable testing and dependency injection.

mod captureone;
mod execution;

pub use execution::{ExecutionService, StandardExecutionService};
