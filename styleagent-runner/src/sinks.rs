//! Destinations for job log lines
//!
//! Every job log entry is emitted as one sorted-key JSON line once the job
//! result has been submitted. Diagnostics from `tracing` go to stderr, so
//! stdout carries nothing but these lines.

use std::io::Write;

/// Receives serialized job log lines
pub trait LogSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Writes each line to stdout
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn emit(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout must not take the worker down
        let _ = writeln!(stdout, "{line}");
    }
}
