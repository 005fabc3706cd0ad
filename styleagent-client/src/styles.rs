//! Style compilation endpoints

use reqwest::Method;
use serde_json::Value;
use std::fmt;

use crate::RunnerClient;
use crate::error::Result;

/// Output format a style version can be compiled to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileTarget {
    CaptureOne,
}

impl CompileTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            CompileTarget::CaptureOne => "captureone",
        }
    }
}

impl fmt::Display for CompileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RunnerClient {
    /// Compile a style version for `target`
    ///
    /// # Returns
    /// The backend's compile result, passed through untouched
    pub async fn compile_style(
        &self,
        style_id: &str,
        version: &str,
        target: CompileTarget,
    ) -> Result<Value> {
        let path = format!("/styles/{}/versions/{}/compile", style_id, version);
        self.transport
            .request_json(Method::POST, &path, None, &[("target", target.as_str())])
            .await
    }
}
