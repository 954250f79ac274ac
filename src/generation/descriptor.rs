//! Tool descriptors and the per-category entries handed to templates

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::inventory::HttpMethod;
use crate::naming::{Module, Operation, RestClass};
use crate::schema::{FieldDescriptor, FieldType};

/// Where a tool comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolSource {
    Rest,
    Stat,
    Command,
    V2,
    Global,
    /// Composite helpers that wrap several API calls
    Helper,
}

/// API generation a module-tagged tool belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    V2,
}

/// One generated, independently invocable tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    /// Fully prefixed tool name, e.g. `unifi_list_networks`
    pub name: String,
    /// Owning endpoint name (manager name for commands)
    pub endpoint: String,
    pub source: ToolSource,
    /// REST and v2 operation; `None` for single-shot tools
    pub operation: Option<Operation>,
    pub method: Option<HttpMethod>,
    pub path: Option<String>,
    /// `None` marks an always-on tool
    pub module: Option<Module>,
    pub api_version: ApiVersion,
    pub is_crud: bool,
    pub is_readonly: bool,
    pub is_setting: bool,
    pub is_hardware_dependent: bool,
    /// Changes controller state; rendered tools require confirmation
    pub is_mutation: bool,
    pub writable_fields: Vec<WritableField>,
    pub create_payload: Option<JsonValue>,
    pub workflow_hint: Option<String>,
}

impl ToolDescriptor {
    pub(crate) fn new(name: String, endpoint: &str, source: ToolSource) -> Self {
        Self {
            name,
            endpoint: endpoint.to_string(),
            source,
            operation: None,
            method: None,
            path: None,
            module: None,
            api_version: ApiVersion::V1,
            is_crud: false,
            is_readonly: false,
            is_setting: false,
            is_hardware_dependent: false,
            is_mutation: false,
            writable_fields: Vec::new(),
            create_payload: None,
            workflow_hint: None,
        }
    }

    pub fn is_always_on(&self) -> bool {
        self.module.is_none()
    }
}

/// A non-read-only field offered as a parameter of create/update tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WritableField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub annotation: String,
    pub common: bool,
    pub enum_values: Vec<String>,
    /// Tool that lists valid values for this identifier field
    pub cross_ref: Option<String>,
    /// `name (type: "a"|"b", see tool)`
    pub description: String,
}

/// A REST resource and everything its templates need
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestEntry {
    pub resource: String,
    pub singular: String,
    pub plural: String,
    pub path: String,
    pub methods: Vec<HttpMethod>,
    pub class: RestClass,
    pub is_crud: bool,
    pub is_readonly: bool,
    pub is_setting: bool,
    pub is_hardware_dependent: bool,
    pub has_samples: bool,
    pub schema: Vec<FieldDescriptor>,
    pub writable_fields: Vec<WritableField>,
    pub known_fields: Vec<String>,
    /// Minimal creation payload; `{}` when none is declared
    pub create_payload: JsonValue,
    pub create_payload_literal: String,
    /// The payload carries a `{default_network_id}` placeholder
    pub needs_network_id: bool,
    pub required_create_fields: String,
    pub full_object_update: bool,
    pub no_rest_delete: bool,
    pub workflow_hint: String,
    pub module: Module,
    pub operations: Vec<Operation>,
    /// File-name friendly resource name
    pub file_stem: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatEntry {
    pub resource: String,
    pub display_name: String,
    pub tool_name: String,
    pub path: String,
    pub method: HttpMethod,
    /// Python literal of the request body, `{}` when there is none
    pub post_body: String,
    pub has_samples: bool,
    pub schema: Vec<FieldDescriptor>,
    pub note: Option<String>,
    /// Up to five fields present in every sample
    pub sample_fields: Vec<String>,
    pub module: Module,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandEntry {
    pub manager: String,
    pub command: String,
    /// Unprefixed tool name, e.g. `block_client`
    pub tool_name: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub is_mutation: bool,
    pub is_safe_test: bool,
    pub is_device_dependent: bool,
    pub module: Module,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct V2Entry {
    pub resource: String,
    pub singular: String,
    pub plural: String,
    pub path: String,
    pub methods: Vec<HttpMethod>,
    pub has_samples: bool,
    pub schema: Vec<FieldDescriptor>,
    pub writable_fields: Vec<WritableField>,
    pub create_hint: String,
    pub module: Module,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalEntry {
    pub name: String,
    pub tool_name: String,
    pub method: HttpMethod,
    pub path: String,
    pub auth: bool,
    pub is_mutation: bool,
    pub skip_test: bool,
}
