//! Port interfaces for the application layer

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::error::Result;
use crate::generation::Artifact;

/// Writes rendered artifacts under an output directory
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write every artifact below `root`, returning the paths written
    async fn write_artifacts(&self, root: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>>;

    async fn ensure_directory(&self, path: &Path) -> Result<()>;
}
