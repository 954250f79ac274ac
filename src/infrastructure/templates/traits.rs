//! Ports for loading and rendering template bundles

use std::path::Path;

use async_trait::async_trait;

use super::types::TemplateBundle;
use crate::core::error::Result;
use crate::generation::{Artifact, RenderContext};

#[async_trait]
pub trait TemplateLoader: Send + Sync {
    async fn load_template(&self, dir: &Path) -> Result<TemplateBundle>;
}

#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(&self, bundle: &TemplateBundle, context: &RenderContext) -> Result<Vec<Artifact>>;
}
