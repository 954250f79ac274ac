//! Loads a template bundle from a directory holding a `manifest.yml`

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::manifest::parse_manifest_yaml;
use super::traits::TemplateLoader;
use super::types::{TemplateBundle, TemplateFile, TemplateManifest};
use crate::core::error::{Error, Result};

#[derive(Debug, Default)]
pub struct FileSystemTemplateLoader;

impl FileSystemTemplateLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TemplateLoader for FileSystemTemplateLoader {
    async fn load_template(&self, dir: &Path) -> Result<TemplateBundle> {
        if !dir.is_dir() {
            return Err(Error::template(format!(
                "Template directory not found: {}",
                dir.display()
            )));
        }

        let manifest = load_manifest_from_dir(dir).await?;
        let files = load_template_files(dir, &manifest).await?;
        debug!(
            template = %manifest.name,
            files = files.len(),
            "Loaded template bundle"
        );

        Ok(TemplateBundle {
            root: dir.to_path_buf(),
            manifest,
            files,
        })
    }
}

async fn load_manifest_from_dir(dir: &Path) -> Result<TemplateManifest> {
    let path = ["manifest.yml", "manifest.yaml"]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
        .ok_or_else(|| {
            Error::template(format!(
                "No manifest.yml or manifest.yaml found in {}",
                dir.display()
            ))
        })?;

    let content = fs::read_to_string(&path).await?;
    parse_manifest_yaml(&content)
}

async fn load_template_files(dir: &Path, manifest: &TemplateManifest) -> Result<Vec<TemplateFile>> {
    let mut files = Vec::with_capacity(manifest.files.len());
    for entry in &manifest.files {
        let path = dir.join(&entry.source);
        let content = fs::read_to_string(&path).await.map_err(|e| {
            Error::template(format!("Failed to read template {}: {e}", path.display()))
        })?;
        files.push(TemplateFile {
            source: PathBuf::from(&entry.source),
            destination: entry.destination.clone(),
            for_each: entry.for_each.clone(),
            content,
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_bundle(dir: &Path, manifest_name: &str) {
        let manifest = r#"
name: test-bundle
files:
  - source: server.py.tera
    destination: server.py
  - source: test.py.tera
    destination: "tests/test_{{ item.file_stem }}.py"
    for_each: generated_rest_tools
"#;
        fs::write(dir.join(manifest_name), manifest).await.unwrap();
        fs::write(dir.join("server.py.tera"), "# {{ tool_count }} tools\n")
            .await
            .unwrap();
        fs::write(dir.join("test.py.tera"), "# {{ item.resource }}\n")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_load_bundle() {
        let dir = TempDir::new().unwrap();
        write_bundle(dir.path(), "manifest.yml").await;

        let bundle = FileSystemTemplateLoader::new()
            .load_template(dir.path())
            .await
            .unwrap();
        assert_eq!(bundle.manifest.name, "test-bundle");
        assert_eq!(bundle.files.len(), 2);
        assert_eq!(bundle.files[0].source, PathBuf::from("server.py.tera"));
        assert!(bundle.files[1].content.contains("item.resource"));
    }

    #[tokio::test]
    async fn test_yaml_extension_accepted() {
        let dir = TempDir::new().unwrap();
        write_bundle(dir.path(), "manifest.yaml").await;
        assert!(FileSystemTemplateLoader::new()
            .load_template(dir.path())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let err = FileSystemTemplateLoader::new()
            .load_template(dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No manifest.yml"));
    }

    #[tokio::test]
    async fn test_missing_source_file() {
        let dir = TempDir::new().unwrap();
        write_bundle(dir.path(), "manifest.yml").await;
        fs::remove_file(dir.path().join("test.py.tera")).await.unwrap();
        let err = FileSystemTemplateLoader::new()
            .load_template(dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
