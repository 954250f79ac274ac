//! Counting tool definitions in a generated server file

use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::core::error::{Error, Result};

/// Outcome of comparing the computed total with a generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum ArtifactCheck {
    Match { count: usize },
    Mismatch { expected: usize, actual: usize },
}

impl ArtifactCheck {
    pub fn new(expected: usize, actual: usize) -> Self {
        if expected == actual {
            ArtifactCheck::Match { count: actual }
        } else {
            ArtifactCheck::Mismatch { expected, actual }
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ArtifactCheck::Match { .. })
    }

    /// actual - expected
    pub fn diff(&self) -> i64 {
        match *self {
            ArtifactCheck::Match { .. } => 0,
            ArtifactCheck::Mismatch { expected, actual } => actual as i64 - expected as i64,
        }
    }
}

/// Count `async def <prefix>_` definitions that start a line
pub fn count_tool_definitions(code: &str, tool_prefix: &str) -> Result<usize> {
    let pattern = format!(r"(?m)^async def {}_", regex::escape(tool_prefix));
    let re = Regex::new(&pattern).map_err(|e| Error::config(format!("Invalid tool prefix: {e}")))?;
    Ok(re.find_iter(code).count())
}

/// Count tool definitions in a generated server file; `None` if it does not exist
pub async fn count_artifact_tools(server_path: &Path, tool_prefix: &str) -> Result<Option<usize>> {
    match tokio::fs::read_to_string(server_path).await {
        Ok(code) => count_tool_definitions(&code, tool_prefix).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
