//! Capture One compile job handler

use serde_json::Value;
use styleagent_client::{CompileTarget, RunnerClient};
use styleagent_core::domain::job::CompileCaptureOnePayload;
use tracing::debug;

/// Compiles the payload's style version for Capture One and returns the backend result
pub async fn run_compile_captureone(
    client: &RunnerClient,
    payload: &CompileCaptureOnePayload,
) -> styleagent_client::Result<Value> {
    debug!(
        style_id = %payload.style_id,
        version = %payload.version,
        "Compiling style for Capture One"
    );

    client
        .compile_style(&payload.style_id, &payload.version, CompileTarget::CaptureOne)
        .await
}
