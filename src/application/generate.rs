//! The generate use case: load the inventory, build the context, render the
//! template bundle and write the artifacts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::traits::OutputService;
use crate::core::config::GeneratorConfig;
use crate::core::error::{Error, Result};
use crate::generation::ServerContextBuilder;
use crate::infrastructure::templates::{TemplateLoader, TemplateRenderer};
use crate::infrastructure::{FileSystemOutputService, FileSystemTemplateLoader, TeraTemplateRenderer};
use crate::inventory::{FileInventoryLoader, InventoryLoader};
use crate::naming::NamingTables;

/// Inputs of one generation run
#[derive(Debug, Clone)]
pub struct GenerateServerRequest {
    pub inventory_path: PathBuf,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl From<&GeneratorConfig> for GenerateServerRequest {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            inventory_path: config.inventory_path.clone(),
            template_dir: config.template_dir.clone(),
            output_dir: config.output_dir.clone(),
        }
    }
}

/// What a generation run produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub controller_version: String,
    pub tool_count: usize,
    pub always_on_count: usize,
    pub rest_skipped: Vec<String>,
    pub cmd_skipped: Vec<String>,
    pub output_dir: PathBuf,
    pub files_written: Vec<PathBuf>,
    pub generated_at: DateTime<Utc>,
}

pub struct GenerateServerUseCase {
    inventory_loader: Arc<dyn InventoryLoader>,
    template_loader: Arc<dyn TemplateLoader>,
    renderer: Arc<dyn TemplateRenderer>,
    output_service: Arc<dyn OutputService>,
    tables: NamingTables,
}

impl GenerateServerUseCase {
    pub fn new(
        inventory_loader: Arc<dyn InventoryLoader>,
        template_loader: Arc<dyn TemplateLoader>,
        renderer: Arc<dyn TemplateRenderer>,
        output_service: Arc<dyn OutputService>,
        tables: NamingTables,
    ) -> Self {
        Self {
            inventory_loader,
            template_loader,
            renderer,
            output_service,
            tables,
        }
    }

    /// Wire the filesystem loaders, the Tera renderer and the built-in
    /// naming tables for `config`
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let mut inventory_loader = FileInventoryLoader::new(&config.samples_dir);
        if let Some(path) = &config.field_inventory_path {
            inventory_loader = inventory_loader.with_field_inventory(path);
        }
        Self::new(
            Arc::new(inventory_loader),
            Arc::new(FileSystemTemplateLoader::new()),
            Arc::new(TeraTemplateRenderer::new()),
            Arc::new(FileSystemOutputService::new()),
            NamingTables::builtin().with_prefix(&config.tool_prefix),
        )
    }

    pub async fn execute(&self, request: GenerateServerRequest) -> Result<GenerationSummary> {
        let problems = self.tables.consistency_problems();
        if !problems.is_empty() {
            return Err(Error::config(format!(
                "Naming tables are inconsistent: {}",
                problems.join("; ")
            )));
        }

        let inventory = self.inventory_loader.load(&request.inventory_path).await?;
        let context = ServerContextBuilder::new(&self.tables).build(&inventory);
        for name in &context.rest_skipped {
            warn!(endpoint = %name, "REST endpoint has no naming entry, no tools generated");
        }

        let bundle = self.template_loader.load_template(&request.template_dir).await?;
        let render_context = context.to_render_context()?;
        let artifacts = self.renderer.render(&bundle, &render_context).await?;

        self.output_service.ensure_directory(&request.output_dir).await?;
        let files_written = self
            .output_service
            .write_artifacts(&request.output_dir, &artifacts)
            .await?;

        info!(
            tools = context.tool_count,
            always_on = context.always_on_count,
            files = files_written.len(),
            output = %request.output_dir.display(),
            "Generated server"
        );

        Ok(GenerationSummary {
            controller_version: context.controller_version.clone(),
            tool_count: context.tool_count,
            always_on_count: context.always_on_count,
            rest_skipped: context.rest_skipped.clone(),
            cmd_skipped: context.cmd_skipped.clone(),
            output_dir: request.output_dir,
            files_written,
            generated_at: Utc::now(),
        })
    }
}

/// Run the whole pipeline for `config`
pub async fn generate(config: &GeneratorConfig) -> Result<GenerationSummary> {
    config.validate()?;
    GenerateServerUseCase::from_config(config)
        .execute(GenerateServerRequest::from(config))
        .await
}

/// Relative display of a written file, for summaries
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
