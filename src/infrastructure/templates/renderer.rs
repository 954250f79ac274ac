//! Tera-based template renderer

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::json;
use tera::Tera;
use tracing::debug;

use super::traits::TemplateRenderer;
use super::types::{TemplateBundle, TemplateFile};
use crate::core::error::{Error, Result};
use crate::generation::{Artifact, RenderContext};

#[derive(Debug, Default)]
pub struct TeraTemplateRenderer;

impl TeraTemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    fn engine(bundle: &TemplateBundle) -> Result<Tera> {
        let mut tera = Tera::default();
        // Generated Python must not be HTML-escaped
        tera.autoescape_on(vec![]);
        for file in &bundle.files {
            tera.add_raw_template(&template_name(file), &file.content)?;
        }
        Ok(tera)
    }

    fn render_single(tera: &Tera, file: &TemplateFile, context: &RenderContext) -> Result<Artifact> {
        let tera_context = context.to_tera_context()?;
        let content = tera.render(&template_name(file), &tera_context)?;
        let path = render_destination(&file.destination, &tera_context)?;
        Ok(Artifact { path, content })
    }

    fn render_for_each(
        tera: &Tera,
        file: &TemplateFile,
        context: &RenderContext,
        collection_key: &str,
    ) -> Result<Vec<Artifact>> {
        let items = context
            .get(collection_key)
            .ok_or_else(|| {
                Error::template(format!("Collection '{collection_key}' not found in context"))
            })?
            .as_array()
            .ok_or_else(|| Error::template(format!("Collection '{collection_key}' is not an array")))?;

        if items.is_empty() {
            debug!(collection = collection_key, "Collection is empty, nothing rendered");
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut item_context = context.clone();
                item_context.add_variable("item", item.clone());
                item_context.add_variable("index", json!(index));
                Self::render_single(tera, file, &item_context)
            })
            .collect()
    }
}

#[async_trait]
impl TemplateRenderer for TeraTemplateRenderer {
    async fn render(&self, bundle: &TemplateBundle, context: &RenderContext) -> Result<Vec<Artifact>> {
        let tera = Self::engine(bundle)?;
        let mut artifacts = Vec::new();
        for file in &bundle.files {
            match &file.for_each {
                Some(key) => artifacts.extend(Self::render_for_each(&tera, file, context, key)?),
                None => artifacts.push(Self::render_single(&tera, file, context)?),
            }
        }
        debug!(artifacts = artifacts.len(), "Rendered template bundle");
        Ok(artifacts)
    }
}

fn template_name(file: &TemplateFile) -> String {
    file.source.to_string_lossy().into_owned()
}

fn render_destination(destination: &str, context: &tera::Context) -> Result<PathBuf> {
    if !destination.contains("{{") {
        return Ok(PathBuf::from(destination));
    }
    let rendered = Tera::one_off(destination, context, false)?;
    Ok(PathBuf::from(rendered.trim()))
}
