//! unifi-toolgen CLI entrypoint
//! Parses command-line arguments and dispatches to the generator library.
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;
use unifi_toolgen::application::generate;
use unifi_toolgen::application::generate::display_relative;
use unifi_toolgen::core::config::{DEFAULT_CONFIG_FILE, GeneratorConfig};
use unifi_toolgen::generation::{ServerContext, ServerContextBuilder};
use unifi_toolgen::inventory::{FileInventoryLoader, InventoryLoader};
use unifi_toolgen::naming::NamingTables;
use unifi_toolgen::selection::{DEFAULT_SELECTION, ModuleSelection, registered_tools};
use unifi_toolgen::verification::{
    ArtifactCheck, CoverageReport, ToolCounter, compare_with_context, count_artifact_tools,
    verify_consistency,
};

#[derive(Parser)]
#[command(name = "unifi-toolgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Flags that override individual configuration file values
#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Endpoint inventory document (JSON or YAML)
    #[arg(long, global = true)]
    inventory: Option<PathBuf>,
    /// Directory of captured sample files
    #[arg(long, global = true)]
    samples_dir: Option<PathBuf>,
    /// Field inventory used for endpoints without samples
    #[arg(long, global = true)]
    field_inventory: Option<PathBuf>,
    /// Template directory containing a manifest.yml
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,
    /// Output directory for generated files
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    /// Prefix of every generated tool name
    #[arg(long, global = true)]
    tool_prefix: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the server and its tests from the inventory
    Generate,
    /// Count expected tools straight from the inventory document
    Count {
        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recount, cross-check against the built context and the generated server
    Verify {
        /// Generated server file; defaults to <output-dir>/server.py
        #[arg(long)]
        server: Option<PathBuf>,
    },
    /// List the tools a generated server registers for a module selection
    Modules {
        /// Comma-separated module names, or v1 / v2
        #[arg(long, default_value = DEFAULT_SELECTION)]
        select: String,
        /// Leave out every mutating tool
        #[arg(long)]
        read_only: bool,
    },
}

impl ConfigOverrides {
    fn resolve(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = GeneratorConfig::load(&self.config)
            .with_context(|| format!("Failed to load config {}", self.config.display()))?;

        if let Some(path) = &self.inventory {
            config.inventory_path = path.clone();
        }
        if let Some(path) = &self.samples_dir {
            config.samples_dir = path.clone();
        }
        if let Some(path) = &self.field_inventory {
            config.field_inventory_path = Some(path.clone());
        }
        if let Some(path) = &self.template_dir {
            config.template_dir = path.clone();
        }
        if let Some(path) = &self.output_dir {
            config.output_dir = path.clone();
        }
        if let Some(prefix) = &self.tool_prefix {
            config.tool_prefix = prefix.clone();
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn tables_for(config: &GeneratorConfig) -> NamingTables {
    NamingTables::builtin().with_prefix(&config.tool_prefix)
}

async fn build_context(config: &GeneratorConfig, tables: &NamingTables) -> anyhow::Result<ServerContext> {
    let mut loader = FileInventoryLoader::new(&config.samples_dir);
    if let Some(path) = &config.field_inventory_path {
        loader = loader.with_field_inventory(path);
    }
    let inventory = loader
        .load(&config.inventory_path)
        .await
        .with_context(|| format!("Failed to load inventory {}", config.inventory_path.display()))?;
    Ok(ServerContextBuilder::new(tables).build(&inventory))
}

async fn run_generate(config: &GeneratorConfig) -> anyhow::Result<ExitCode> {
    let summary = generate(config).await.context("Generation failed")?;
    println!(
        "Generated {} tools ({} always-on) into {} at {}",
        summary.tool_count,
        summary.always_on_count,
        summary.output_dir.display(),
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for path in &summary.files_written {
        println!("  {}", display_relative(path, &summary.output_dir));
    }
    if !summary.rest_skipped.is_empty() {
        println!("Skipped REST endpoints: {}", summary.rest_skipped.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_count(config: &GeneratorConfig, json: bool) -> anyhow::Result<ExitCode> {
    let tables = tables_for(config);
    let counts = ToolCounter::new(&tables)
        .count_file(&config.inventory_path)
        .await
        .with_context(|| format!("Failed to count {}", config.inventory_path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        print!("{}", CoverageReport::new(&counts));
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_verify(config: &GeneratorConfig, server: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let tables = tables_for(config);
    let counts = ToolCounter::new(&tables)
        .count_file(&config.inventory_path)
        .await
        .with_context(|| format!("Failed to count {}", config.inventory_path.display()))?;

    let mut failures = Vec::new();
    if let Err(e) = verify_consistency(&counts) {
        failures.push(e.to_string());
    }

    let context = build_context(config, &tables).await?;
    failures.extend(compare_with_context(&counts, &context).iter().map(ToString::to_string));

    let server = server.unwrap_or_else(|| config.server_output_path());
    let artifact = count_artifact_tools(&server, &config.tool_prefix)
        .await
        .with_context(|| format!("Failed to read {}", server.display()))?
        .map(|actual| ArtifactCheck::new(counts.total(), actual));
    if artifact.is_none() {
        warn!(path = %server.display(), "No generated server found, skipping artifact check");
    }
    if let Some(check) = artifact.filter(|c| !c.is_match()) {
        failures.push(format!("Generated server tool count differs by {:+}", check.diff()));
    }

    print!("{}", CoverageReport::new(&counts).with_artifact(artifact));
    if failures.is_empty() {
        info!(tools = counts.total(), "Verification passed");
        return Ok(ExitCode::SUCCESS);
    }
    for failure in &failures {
        eprintln!("error: {failure}");
    }
    Ok(ExitCode::FAILURE)
}

async fn run_modules(config: &GeneratorConfig, select: &str, read_only: bool) -> anyhow::Result<ExitCode> {
    let tables = tables_for(config);
    let context = build_context(config, &tables).await?;
    let selection = ModuleSelection::parse(select);
    let tools = registered_tools(&context, &selection, read_only);

    info!(
        selection = %selection,
        read_only,
        tools = tools.len(),
        "Resolved module selection"
    );
    for name in &tools {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.overrides.resolve()?;
    match cli.command {
        Commands::Generate => run_generate(&config).await,
        Commands::Count { json } => run_count(&config, json).await,
        Commands::Verify { server } => run_verify(&config, server).await,
        Commands::Modules { select, read_only } => run_modules(&config, &select, read_only).await,
    }
}
