//! Repository layer
//!
//! Repositories abstract communication with the backend behind traits so
//! the scheduler can be tested against in-memory fakes.

mod jobs;

pub use jobs::{HttpJobRepository, JobRepository};
