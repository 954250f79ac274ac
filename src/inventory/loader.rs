//! File-based inventory loader
//!
//! Reads the endpoint inventory, then attaches per-endpoint samples and the
//! optional field inventory. Only the inventory document itself can fail.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::document::{inventory_from_document, read_document};
use super::model::{ApiInventory, EndpointCategory};
use super::samples::{load_field_inventory, load_sample_records};
use crate::core::error::Result;

/// Loads an [`ApiInventory`] from some source
#[async_trait]
pub trait InventoryLoader: Send + Sync {
    /// Load the inventory document at `source` with all attached data
    async fn load(&self, source: &Path) -> Result<ApiInventory>;
}

/// Loads the inventory, samples and field inventory from local files
#[derive(Debug, Clone)]
pub struct FileInventoryLoader {
    samples_dir: PathBuf,
    field_inventory_path: Option<PathBuf>,
}

impl FileInventoryLoader {
    pub fn new(samples_dir: impl Into<PathBuf>) -> Self {
        Self {
            samples_dir: samples_dir.into(),
            field_inventory_path: None,
        }
    }

    /// Enrich sample-less endpoints from a field inventory file
    pub fn with_field_inventory(mut self, path: impl Into<PathBuf>) -> Self {
        self.field_inventory_path = Some(path.into());
        self
    }

    async fn attach_samples(&self, inventory: &mut ApiInventory) {
        for category in EndpointCategory::ALL {
            if !category.has_samples() {
                continue;
            }
            for endpoint in inventory.endpoints_mut(category).values_mut() {
                endpoint.samples =
                    load_sample_records(&self.samples_dir, category.sample_prefix(), &endpoint.name)
                        .await;
            }
        }
    }

    async fn attach_field_inventory(&self, inventory: &mut ApiInventory) {
        let Some(path) = &self.field_inventory_path else {
            return;
        };
        let field_names = load_field_inventory(path).await;
        if field_names.is_empty() {
            return;
        }

        let mut enriched = 0usize;
        for category in EndpointCategory::ALL {
            for endpoint in inventory.endpoints_mut(category).values_mut() {
                if endpoint.has_samples() {
                    continue;
                }
                if let Some(names) = field_names.get(&endpoint.data_key()) {
                    endpoint.known_fields = names.clone();
                    enriched += 1;
                }
            }
        }
        debug!(enriched, "Merged field inventory into sample-less endpoints");
    }
}

#[async_trait]
impl InventoryLoader for FileInventoryLoader {
    async fn load(&self, source: &Path) -> Result<ApiInventory> {
        let document = read_document(source).await?;
        let mut inventory = inventory_from_document(&document)?;

        self.attach_samples(&mut inventory).await;
        self.attach_field_inventory(&mut inventory).await;

        info!(
            controller_version = %inventory.controller_version,
            rest = inventory.rest_endpoints.len(),
            stat = inventory.stat_endpoints.len(),
            cmd = inventory.cmd_endpoints.len(),
            v2 = inventory.v2_endpoints.len(),
            global = inventory.global_endpoints.len(),
            "Loaded endpoint inventory"
        );
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use std::fs;

    fn write_fixture(dir: &Path) -> PathBuf {
        let inventory = dir.join("endpoint-inventory.json");
        fs::write(
            &inventory,
            r#"{
                "controller_version": "9.0.114",
                "rest_endpoints": {
                    "networkconf": {"path": "/api/s/{site}/rest/networkconf", "methods": ["GET", "POST", "PUT", "DELETE"]},
                    "tag": {"path": "/api/s/{site}/rest/tag"}
                },
                "stat_endpoints": {"health": {"path": "/api/s/{site}/stat/health"}},
                "cmd_endpoints": {"stamgr": {"path": "/api/s/{site}/cmd/stamgr", "commands": ["block-sta"]}}
            }"#,
        )
        .unwrap();

        let samples = dir.join("api-samples");
        fs::create_dir_all(&samples).unwrap();
        fs::write(
            samples.join("rest_networkconf.json"),
            r#"{"meta": {"rc": "ok"}, "data": [{"_id": "a", "name": "LAN"}]}"#,
        )
        .unwrap();
        fs::write(samples.join("stat_health.json"), r#"[{"subsystem": "wan"}]"#).unwrap();
        inventory
    }

    #[tokio::test]
    async fn test_load_attaches_samples() {
        let dir = tempfile::tempdir().unwrap();
        let inventory_path = write_fixture(dir.path());

        let loader = FileInventoryLoader::new(dir.path().join("api-samples"));
        let inv = loader.load(&inventory_path).await.unwrap();

        assert_eq!(inv.controller_version, "9.0.114");
        assert_eq!(inv.rest_endpoints["networkconf"].samples.len(), 1);
        assert!(inv.rest_endpoints["tag"].samples.is_empty());
        assert_eq!(inv.stat_endpoints["health"].samples.len(), 1);
        assert!(inv.cmd_endpoints["stamgr"].samples.is_empty());
    }

    #[tokio::test]
    async fn test_field_inventory_only_fills_sample_less_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let inventory_path = write_fixture(dir.path());
        let fields = dir.path().join("field-inventory.json");
        fs::write(
            &fields,
            r#"{
                "rest_tag": {"field_count": 2, "fields": {"name": "str", "member_table": "list"}},
                "rest_networkconf": {"field_count": 1, "fields": {"vlan": "int"}}
            }"#,
        )
        .unwrap();

        let loader = FileInventoryLoader::new(dir.path().join("api-samples")).with_field_inventory(&fields);
        let inv = loader.load(&inventory_path).await.unwrap();

        assert_eq!(inv.rest_endpoints["tag"].known_fields, vec!["member_table", "name"]);
        assert!(inv.rest_endpoints["networkconf"].known_fields.is_empty());
    }

    #[tokio::test]
    async fn test_missing_optional_inputs_are_not_errors() {
        let dir = tempfile::tempdir().unwrap();
        let inventory_path = write_fixture(dir.path());

        let loader = FileInventoryLoader::new(dir.path().join("no-samples-here"))
            .with_field_inventory(dir.path().join("missing.json"));
        let inv = loader.load(&inventory_path).await.unwrap();
        assert!(inv.rest_endpoints.values().all(|ep| ep.samples.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_inventory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileInventoryLoader::new(dir.path());
        let result = loader.load(&dir.path().join("endpoint-inventory.json")).await;
        assert!(matches!(result, Err(Error::Inventory(_))));
    }

    #[tokio::test]
    async fn test_loading_twice_is_structurally_equal() {
        let dir = tempfile::tempdir().unwrap();
        let inventory_path = write_fixture(dir.path());
        let loader = FileInventoryLoader::new(dir.path().join("api-samples"));

        let first = loader.load(&inventory_path).await.unwrap();
        let second = loader.load(&inventory_path).await.unwrap();
        assert_eq!(first, second);
    }
}
