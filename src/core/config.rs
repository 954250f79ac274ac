//! Configuration for a generation run.
//!
//! Paths and naming options come from an optional `unifi-toolgen.toml` and
//! may be overridden individually from the command line. The naming tables
//! are not part of this file; see [`crate::naming::NamingTables`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "unifi-toolgen.toml";

/// Configuration for the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Endpoint inventory document (JSON or YAML)
    pub inventory_path: PathBuf,
    /// Directory holding `<prefix>_<name>.json` sample files
    pub samples_dir: PathBuf,
    /// Optional field inventory used to enrich endpoints without samples
    pub field_inventory_path: Option<PathBuf>,
    /// Template directory containing a `manifest.yml`
    pub template_dir: PathBuf,
    /// Directory the rendered files are written to
    pub output_dir: PathBuf,
    /// Prefix of every generated tool name
    pub tool_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from("endpoint-inventory.json"),
            samples_dir: PathBuf::from("api-samples"),
            field_inventory_path: None,
            template_dir: PathBuf::from("templates/fastmcp"),
            output_dir: PathBuf::from("generated"),
            tool_prefix: "unifi".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// the resulting configuration fails [`GeneratorConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded generator config");
        Ok(config)
    }

    /// Check the values that would otherwise produce broken output.
    pub fn validate(&self) -> Result<()> {
        if self.tool_prefix.is_empty() {
            return Err(Error::config("tool_prefix cannot be empty"));
        }
        if !self
            .tool_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::config(format!(
                "tool_prefix '{}' must contain only ASCII alphanumerics and underscores",
                self.tool_prefix
            )));
        }
        Ok(())
    }

    /// Path of the generated server module, used when verifying tool counts
    pub fn server_output_path(&self) -> PathBuf {
        self.output_dir.join("server.py")
    }
}
