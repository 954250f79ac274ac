//! Infer field types and metadata from sample records.
//!
//! Inference is best effort: records that are not JSON objects and null
//! values are skipped, and an empty sample list yields an empty schema.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::field::{FieldDescriptor, FieldType};
use crate::inventory::SampleRecord;

/// Fields that are always read-only (set by the controller)
const READONLY_EXACT: &[&str] = &["_id", "site_id", "key"];
const READONLY_PREFIXES: &[&str] = &["_", "attr_"];
const READONLY_SUFFIXES: &[&str] = &["-r"];

/// Largest observed vocabulary still reported as an enum
pub const MAX_ENUM_VALUES: usize = 10;

const ENUM_EXCLUDED_SUFFIXES: &[&str] = &["_id", "_ids"];
const ENUM_EXCLUDED_NAMES: &[&str] = &[
    "mac",
    "ip",
    "x_passphrase",
    "x_password",
    "x_secret",
    "desc",
    "description",
    "note",
    "serial",
    "version",
    "model",
    "essid",
    "bssid",
    "ssid",
    "login",
    "password",
    "domain",
    "label",
    "key",
];
const ENUM_EXCLUDED_SUBSTRINGS: &[&str] = &["address", "host", "url", "port", "subnet", "name"];

static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}(?:\.\d{1,3}){3}(?:/\d{1,2})?$").expect("valid IPv4 pattern")
});
static IPV6_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:[0-9a-fA-F]{1,4}:){3,7}[0-9a-fA-F]{1,4}|[0-9a-fA-F:]*::[0-9a-fA-F:]*)(?:/\d{1,3})?$")
        .expect("valid IPv6 pattern")
});
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid UUID pattern")
});
static MAC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{2}[:-]){5}[0-9a-fA-F]{2}$").expect("valid MAC pattern")
});

/// Whether a field is controller-managed, judged from its name alone
pub fn is_read_only(field_name: &str) -> bool {
    READONLY_EXACT.contains(&field_name)
        || READONLY_PREFIXES.iter().any(|p| field_name.starts_with(p))
        || READONLY_SUFFIXES.iter().any(|s| field_name.ends_with(s))
}

/// Whether a field's name allows closed-vocabulary inference
pub fn is_enum_candidate(field_name: &str) -> bool {
    let lower = field_name.to_ascii_lowercase();
    if ENUM_EXCLUDED_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return false;
    }
    if ENUM_EXCLUDED_NAMES.contains(&lower.as_str()) {
        return false;
    }
    !ENUM_EXCLUDED_SUBSTRINGS.iter().any(|s| lower.contains(s))
}

/// Whether a string looks like per-instance data (IP, MAC, UUID)
pub fn looks_like_instance_value(value: &str) -> bool {
    IPV4_RE.is_match(value)
        || MAC_RE.is_match(value)
        || UUID_RE.is_match(value)
        || IPV6_RE.is_match(value)
}

#[derive(Default)]
struct FieldStats {
    /// Observed types in first-seen order with their counts
    type_counts: Vec<(FieldType, usize)>,
    present: usize,
    string_values: BTreeSet<String>,
    instance_like: bool,
}

impl FieldStats {
    fn observe(&mut self, field_type: FieldType, value: &serde_json::Value) {
        self.present += 1;
        match self.type_counts.iter_mut().find(|(t, _)| *t == field_type) {
            Some((_, count)) => *count += 1,
            None => self.type_counts.push((field_type, 1)),
        }
        if let Some(s) = value.as_str() {
            if looks_like_instance_value(s) {
                self.instance_like = true;
            }
            self.string_values.insert(s.to_string());
        }
    }

    /// Most frequent type; the first-seen type wins a tie
    fn best_type(&self) -> FieldType {
        let mut best = (FieldType::String, 0usize);
        for &(field_type, count) in &self.type_counts {
            if count > best.1 {
                best = (field_type, count);
            }
        }
        best.0
    }

    /// `total` is the number of records, not the records holding the field
    fn enum_values(&self, field_name: &str, total: usize) -> Vec<String> {
        if self.instance_like || !is_enum_candidate(field_name) {
            return Vec::new();
        }
        let distinct = self.string_values.len();
        if distinct == 0 || distinct > MAX_ENUM_VALUES {
            return Vec::new();
        }
        // As many values as records means instance data, not a vocabulary
        if total > 1 && distinct >= total {
            return Vec::new();
        }
        self.string_values.iter().cloned().collect()
    }
}

/// Infer a schema from a list of sample records.
///
/// Returns field name → descriptor, sorted by field name.
pub fn infer_schema(records: &[SampleRecord]) -> BTreeMap<String, FieldDescriptor> {
    if records.is_empty() {
        return BTreeMap::new();
    }

    let total = records.len();
    let mut stats: BTreeMap<String, FieldStats> = BTreeMap::new();

    for record in records {
        let Some(object) = record.as_object() else {
            continue;
        };
        for (key, value) in object {
            let Some(field_type) = FieldType::of(value) else {
                continue;
            };
            stats
                .entry(key.clone())
                .or_default()
                .observe(field_type, value);
        }
    }

    stats
        .into_iter()
        .map(|(name, field_stats)| {
            let field_type = field_stats.best_type();
            let mut descriptor = FieldDescriptor::new(name.clone(), field_type);
            descriptor.read_only = is_read_only(&name);
            descriptor.common = field_stats.present == total;
            if field_type == FieldType::String {
                descriptor.enum_values = field_stats.enum_values(&name, total);
            }
            (name, descriptor)
        })
        .collect()
}
