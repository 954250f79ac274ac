//! Parsing of the endpoint inventory document.
//!
//! The document is JSON as written by the probing tools; YAML is accepted
//! for hand-maintained inventories. Parsing is split from file I/O so the
//! verification utility can read the same raw document independently of
//! the loader's model.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::core::error::{Error, Result};
use crate::inventory::model::{
    ApiInventory, Endpoint, EndpointCategory, EndpointSource, HttpMethod,
};

/// Document keys of categories the generator does not yet turn into tools
pub const UNTOOLED_CATEGORIES: [&str; 3] =
    ["list_endpoints", "guest_endpoints", "websocket_endpoints"];

/// Parse document text as JSON or YAML, using the file extension as a hint.
pub fn parse_document(content: &str, source: &Path) -> Result<JsonValue> {
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let value: JsonValue = match extension.as_deref() {
        Some("json") => serde_json::from_str(content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(content)?,
        _ => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| {
                Error::inventory(format!(
                    "Failed to parse inventory {}: {e}",
                    source.display()
                ))
            })?,
    };

    if !value.is_object() {
        return Err(Error::inventory(format!(
            "Inventory {} must be a mapping of endpoint categories",
            source.display()
        )));
    }
    Ok(value)
}

/// Read and parse the inventory document. A missing file is fatal.
pub async fn read_document(path: &Path) -> Result<JsonValue> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::inventory(format!(
            "Failed to read endpoint inventory {}: {e}",
            path.display()
        ))
    })?;
    parse_document(&content, path)
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    path: String,
    #[serde(default)]
    methods: Option<Vec<String>>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    commands: Vec<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    live_status: Option<u16>,
    #[serde(default)]
    sample_count: Option<u64>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    auth: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawInventory {
    #[serde(default = "unknown_version")]
    controller_version: String,
    #[serde(default)]
    rest_endpoints: BTreeMap<String, RawEndpoint>,
    #[serde(default)]
    stat_endpoints: BTreeMap<String, RawEndpoint>,
    #[serde(default)]
    cmd_endpoints: BTreeMap<String, RawEndpoint>,
    #[serde(default)]
    v2_endpoints: BTreeMap<String, RawEndpoint>,
    #[serde(default)]
    global_endpoints: BTreeMap<String, RawEndpoint>,
}

fn unknown_version() -> String {
    "unknown".to_string()
}

/// Parse declared verbs, dropping unknown ones and repeats.
///
/// An absent declaration means a single GET. A declared but empty list, or
/// one holding only unknown verbs, yields no methods.
pub fn parse_methods(name: &str, raw: Option<&[String]>) -> Vec<HttpMethod> {
    let Some(raw) = raw else {
        return vec![HttpMethod::Get];
    };
    let mut methods: Vec<HttpMethod> = Vec::with_capacity(raw.len());
    for declared in raw {
        match declared.parse::<HttpMethod>() {
            Ok(method) if !methods.contains(&method) => methods.push(method),
            Ok(_) => {}
            Err(e) => warn!(endpoint = %name, error = %e, "Ignoring declared method"),
        }
    }
    methods
}

fn to_endpoint(name: &str, category: EndpointCategory, raw: RawEndpoint) -> Endpoint {
    let mut endpoint = Endpoint::new(name, category, raw.path);

    endpoint.methods = match category {
        EndpointCategory::Rest | EndpointCategory::V2 => {
            parse_methods(name, raw.methods.as_deref())
        }
        EndpointCategory::Stat | EndpointCategory::Global => {
            parse_methods(name, raw.method.as_ref().map(std::slice::from_ref))
        }
        EndpointCategory::Command => vec![HttpMethod::Post],
    };
    if category == EndpointCategory::Command {
        endpoint.commands = raw.commands;
    }
    endpoint.note = raw.note.filter(|n| !n.is_empty());
    endpoint.live_status = raw.live_status;
    endpoint.sample_count = raw.sample_count;
    endpoint.source = match raw.source.as_deref() {
        Some("community") => EndpointSource::Community,
        _ => EndpointSource::Builtin,
    };
    endpoint.auth = raw.auth.unwrap_or(true);
    endpoint
}

/// Turn a parsed document into the endpoint model, without samples attached.
pub fn inventory_from_document(document: &JsonValue) -> Result<ApiInventory> {
    let raw: RawInventory = serde_json::from_value(document.clone())
        .map_err(|e| Error::inventory(format!("Malformed endpoint inventory: {e}")))?;

    let mut inventory = ApiInventory::new(raw.controller_version);
    let sections = [
        (EndpointCategory::Rest, raw.rest_endpoints),
        (EndpointCategory::Stat, raw.stat_endpoints),
        (EndpointCategory::Command, raw.cmd_endpoints),
        (EndpointCategory::V2, raw.v2_endpoints),
        (EndpointCategory::Global, raw.global_endpoints),
    ];
    for (category, entries) in sections {
        for (name, entry) in entries {
            inventory.insert(to_endpoint(&name, category, entry));
        }
    }

    for key in UNTOOLED_CATEGORIES {
        let count = document
            .get(key)
            .and_then(JsonValue::as_object)
            .map_or(0, |m| m.len());
        inventory.untooled_counts.insert(key.to_string(), count);
    }

    Ok(inventory)
}
