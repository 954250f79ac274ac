//! Template bundle types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Parsed `manifest.yml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateManifest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    pub files: Vec<ManifestFile>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// One manifest entry: a template source and where its output goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Path relative to the template directory
    pub source: String,
    /// Output path relative to the output directory; may contain Tera expressions
    pub destination: String,
    /// Context collection to render once per item
    #[serde(default)]
    pub for_each: Option<String>,
}

/// A loaded template file
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub source: PathBuf,
    pub destination: String,
    pub for_each: Option<String>,
    pub content: String,
}

/// Manifest plus the contents of every file it names
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    pub root: PathBuf,
    pub manifest: TemplateManifest,
    pub files: Vec<TemplateFile>,
}
