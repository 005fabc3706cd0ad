//! Data Transfer Objects for runner → backend communication
//!
//! Request bodies the runner posts to the backend. They borrow from the
//! domain types so building one never copies the log trail.

pub mod job;
