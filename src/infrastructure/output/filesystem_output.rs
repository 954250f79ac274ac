//! Filesystem output service

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::OutputService;
use crate::core::error::{Error, Result};
use crate::generation::Artifact;

#[derive(Debug, Default)]
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

/// Artifact paths are relative and may not climb out of the output root
fn resolve(root: &Path, relative: &Path) -> Result<PathBuf> {
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(Error::template(format!(
            "Artifact path '{}' must stay inside the output directory",
            relative.display()
        )));
    }
    Ok(root.join(relative))
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, root: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let path = resolve(root, &artifact.path)?;
            if let Some(parent) = path.parent() {
                self.ensure_directory(parent).await?;
            }

            let mut file = fs::File::create(&path).await?;
            file.write_all(artifact.content.as_bytes()).await?;
            file.flush().await?;

            debug!(path = %path.display(), bytes = artifact.content.len(), "Wrote artifact");
            written.push(path);
        }
        Ok(written)
    }

    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await?;
        Ok(())
    }
}
