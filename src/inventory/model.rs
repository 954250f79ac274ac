//! In-memory endpoint model produced by the inventory loader.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A loosely-typed record captured from an API response.
///
/// Records are normally JSON objects, but nothing guarantees it; consumers
/// skip anything that is not a mapping.
pub type SampleRecord = JsonValue;

/// The five endpoint categories that produce tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointCategory {
    Rest,
    Stat,
    Command,
    V2,
    Global,
}

impl EndpointCategory {
    /// All categories in inventory order
    pub const ALL: [EndpointCategory; 5] = [
        EndpointCategory::Rest,
        EndpointCategory::Stat,
        EndpointCategory::Command,
        EndpointCategory::V2,
        EndpointCategory::Global,
    ];

    /// Key of this category's section in the inventory document
    pub fn document_key(&self) -> &'static str {
        match self {
            EndpointCategory::Rest => "rest_endpoints",
            EndpointCategory::Stat => "stat_endpoints",
            EndpointCategory::Command => "cmd_endpoints",
            EndpointCategory::V2 => "v2_endpoints",
            EndpointCategory::Global => "global_endpoints",
        }
    }

    /// File name prefix used for sample and field-inventory lookups
    pub fn sample_prefix(&self) -> &'static str {
        match self {
            EndpointCategory::Rest => "rest",
            EndpointCategory::Stat => "stat",
            EndpointCategory::Command => "cmd",
            EndpointCategory::V2 => "v2",
            EndpointCategory::Global => "global",
        }
    }

    /// Whether the probing tools capture sample files for this category
    pub fn has_samples(&self) -> bool {
        matches!(
            self,
            EndpointCategory::Rest | EndpointCategory::Stat | EndpointCategory::V2
        )
    }
}

impl fmt::Display for EndpointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sample_prefix())
    }
}

/// HTTP verbs an endpoint may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET is the only verb that never changes controller state
    pub fn is_read(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("unsupported HTTP method '{other}'")),
        }
    }
}

/// Where an endpoint definition came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointSource {
    #[default]
    Builtin,
    Community,
}

/// One addressable capability of the wrapped API.
///
/// Created once per run from the inventory document and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub category: EndpointCategory,
    /// Path template, possibly containing a `{site}` placeholder
    pub path: String,
    /// Declared verbs; Stat and Global endpoints carry exactly one
    pub methods: Vec<HttpMethod>,
    /// Sub-commands of a Command endpoint (empty elsewhere)
    pub commands: Vec<String>,
    pub note: Option<String>,
    pub live_status: Option<u16>,
    pub sample_count: Option<u64>,
    pub source: EndpointSource,
    /// Whether the call needs an authenticated session (Global only)
    pub auth: bool,
    pub samples: Vec<SampleRecord>,
    /// Field names from the field inventory, used only for documentation
    pub known_fields: Vec<String>,
}

impl Endpoint {
    /// Create an endpoint with defaults for every optional attribute
    pub fn new(name: impl Into<String>, category: EndpointCategory, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            path: path.into(),
            methods: vec![HttpMethod::Get],
            commands: Vec::new(),
            note: None,
            live_status: None,
            sample_count: None,
            source: EndpointSource::Builtin,
            auth: true,
            samples: Vec::new(),
            known_fields: Vec::new(),
        }
    }

    /// The single verb of a Stat or Global endpoint
    pub fn method(&self) -> HttpMethod {
        self.methods.first().copied().unwrap_or(HttpMethod::Get)
    }

    pub fn has_samples(&self) -> bool {
        !self.samples.is_empty()
    }

    /// Key used by sample files and the field inventory, e.g. `rest_networkconf`
    pub fn data_key(&self) -> String {
        format!("{}_{}", self.category.sample_prefix(), self.name)
    }
}

/// Every endpoint of one controller, grouped by category and sorted by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInventory {
    pub controller_version: String,
    pub rest_endpoints: BTreeMap<String, Endpoint>,
    pub stat_endpoints: BTreeMap<String, Endpoint>,
    pub cmd_endpoints: BTreeMap<String, Endpoint>,
    pub v2_endpoints: BTreeMap<String, Endpoint>,
    pub global_endpoints: BTreeMap<String, Endpoint>,
    /// Declared but not yet tooled categories: document key → endpoint count
    pub untooled_counts: BTreeMap<String, usize>,
}

impl ApiInventory {
    pub fn new(controller_version: impl Into<String>) -> Self {
        Self {
            controller_version: controller_version.into(),
            rest_endpoints: BTreeMap::new(),
            stat_endpoints: BTreeMap::new(),
            cmd_endpoints: BTreeMap::new(),
            v2_endpoints: BTreeMap::new(),
            global_endpoints: BTreeMap::new(),
            untooled_counts: BTreeMap::new(),
        }
    }

    pub fn endpoints(&self, category: EndpointCategory) -> &BTreeMap<String, Endpoint> {
        match category {
            EndpointCategory::Rest => &self.rest_endpoints,
            EndpointCategory::Stat => &self.stat_endpoints,
            EndpointCategory::Command => &self.cmd_endpoints,
            EndpointCategory::V2 => &self.v2_endpoints,
            EndpointCategory::Global => &self.global_endpoints,
        }
    }

    pub fn endpoints_mut(&mut self, category: EndpointCategory) -> &mut BTreeMap<String, Endpoint> {
        match category {
            EndpointCategory::Rest => &mut self.rest_endpoints,
            EndpointCategory::Stat => &mut self.stat_endpoints,
            EndpointCategory::Command => &mut self.cmd_endpoints,
            EndpointCategory::V2 => &mut self.v2_endpoints,
            EndpointCategory::Global => &mut self.global_endpoints,
        }
    }

    /// Add an endpoint under its own category, replacing any namesake
    pub fn insert(&mut self, endpoint: Endpoint) {
        let category = endpoint.category;
        self.endpoints_mut(category)
            .insert(endpoint.name.clone(), endpoint);
    }
}
