//! Sample and field-inventory files attached to endpoints.
//!
//! Nothing in here is fatal: a missing or unreadable file means "no data".

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::inventory::model::SampleRecord;

/// Extract the record list from a sample document.
///
/// v1 responses wrap records as `{"meta": …, "data": [...]}`; v2 responses
/// are a bare list. Any other shape yields no records.
pub fn extract_records(document: JsonValue) -> Vec<SampleRecord> {
    match document {
        JsonValue::Object(mut map) => match map.remove("data") {
            Some(JsonValue::Array(records)) => records,
            _ => Vec::new(),
        },
        JsonValue::Array(records) => records,
        _ => Vec::new(),
    }
}

/// Load `<samples_dir>/<prefix>_<name>.json` and return its records.
pub async fn load_sample_records(samples_dir: &Path, prefix: &str, name: &str) -> Vec<SampleRecord> {
    let sample_file = samples_dir.join(format!("{prefix}_{name}.json"));
    let content = match tokio::fs::read_to_string(&sample_file).await {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };

    match serde_json::from_str::<JsonValue>(&content) {
        Ok(document) => {
            let records = extract_records(document);
            debug!(file = %sample_file.display(), records = records.len(), "Loaded samples");
            records
        }
        Err(e) => {
            warn!(file = %sample_file.display(), error = %e, "Unparseable sample file, ignoring");
            Vec::new()
        }
    }
}

/// Field names per endpoint key from a field-inventory document.
///
/// Keys look like `rest_networkconf` or `v2_traffic_rules`; names are sorted
/// and entries without fields are dropped.
pub fn field_names_from_document(document: &JsonValue) -> BTreeMap<String, Vec<String>> {
    let Some(entries) = document.as_object() else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(key, entry)| {
            let fields = entry.get("fields")?.as_object()?;
            let mut names: Vec<String> = fields.keys().cloned().collect();
            names.sort();
            (!names.is_empty()).then(|| (key.clone(), names))
        })
        .collect()
}

/// Load the optional field inventory. Missing or malformed files yield an
/// empty map.
pub async fn load_field_inventory(path: &Path) -> BTreeMap<String, Vec<String>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(_) => {
            debug!(path = %path.display(), "No field inventory");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str::<JsonValue>(&content) {
        Ok(document) => field_names_from_document(&document),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unparseable field inventory, ignoring");
            BTreeMap::new()
        }
    }
}
