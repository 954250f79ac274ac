//! The immutable naming and classification configuration.
//!
//! Every consumer (context builder, tool counter, selection oracle) takes a
//! `&NamingTables` so that all of them read the same data. Derived sets such
//! as the CRUD resources and the mutation commands are computed on demand,
//! never stored.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::classify::{Operation, RestClass};
use super::module::Module;
use crate::inventory::HttpMethod;

/// A (manager, command) pair of a command endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CommandKey {
    pub manager: String,
    pub command: String,
}

impl CommandKey {
    pub fn new(manager: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            manager: manager.into(),
            command: command.into(),
        }
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.manager, self.command)
    }
}

/// Singular and plural tool-name fragments of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamePair {
    pub singular: String,
    pub plural: String,
}

impl NamePair {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    /// Names for a resource without a table entry: `(name, name + "s")`
    pub fn fallback(name: &str) -> Self {
        Self::new(name, format!("{name}s"))
    }

    pub fn noun_for(&self, operation: Operation) -> &str {
        if operation.uses_plural() {
            &self.plural
        } else {
            &self.singular
        }
    }
}

/// Method/body replacement for a stat feed that cannot be fetched with GET
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatOverride {
    pub method: HttpMethod,
    pub body: JsonValue,
}

/// Naming and classification tables consulted by every generation stage
#[derive(Debug, Clone, PartialEq)]
pub struct NamingTables {
    /// Prefix of every generated tool name
    pub tool_prefix: String,

    // REST
    pub resource_names: BTreeMap<String, NamePair>,
    pub read_only_rest: BTreeSet<String>,
    pub setting_resource: String,
    pub no_rest_delete: BTreeSet<String>,
    pub full_object_update_rest: BTreeSet<String>,
    pub hardware_dependent_rest: BTreeSet<String>,
    pub minimal_create_payloads: BTreeMap<String, JsonValue>,
    pub required_create_fields: BTreeMap<String, String>,
    pub workflow_hints: BTreeMap<String, String>,
    /// Field name → tool that lists valid values for it
    pub id_cross_refs: BTreeMap<String, String>,
    pub rest_modules: BTreeMap<String, Module>,

    // Stat
    pub stat_names: BTreeMap<String, String>,
    pub stat_overrides: BTreeMap<String, StatOverride>,
    pub stat_modules: BTreeMap<String, Module>,

    // Commands
    pub command_tool_names: BTreeMap<CommandKey, String>,
    pub command_params: BTreeMap<CommandKey, BTreeMap<String, String>>,
    /// Commands that only read state; everything else needs confirmation
    pub non_mutating_commands: BTreeSet<CommandKey>,
    pub safe_test_commands: BTreeSet<CommandKey>,
    pub device_dependent_commands: BTreeSet<CommandKey>,
    pub skip_commands: BTreeSet<CommandKey>,
    pub cmd_modules: BTreeMap<CommandKey, Module>,

    // v2
    pub v2_resource_names: BTreeMap<String, NamePair>,
    pub v2_create_hints: BTreeMap<String, String>,
    pub v2_modules: BTreeMap<String, Module>,

    // Global
    pub mutating_globals: BTreeSet<String>,
    pub untestable_globals: BTreeSet<String>,
}

impl NamingTables {
    /// Empty tables: every REST resource is unclassified, every other
    /// endpoint falls back to its default name and module
    pub fn new(tool_prefix: impl Into<String>) -> Self {
        Self {
            tool_prefix: tool_prefix.into(),
            resource_names: BTreeMap::new(),
            read_only_rest: BTreeSet::new(),
            setting_resource: "setting".to_string(),
            no_rest_delete: BTreeSet::new(),
            full_object_update_rest: BTreeSet::new(),
            hardware_dependent_rest: BTreeSet::new(),
            minimal_create_payloads: BTreeMap::new(),
            required_create_fields: BTreeMap::new(),
            workflow_hints: BTreeMap::new(),
            id_cross_refs: BTreeMap::new(),
            rest_modules: BTreeMap::new(),
            stat_names: BTreeMap::new(),
            stat_overrides: BTreeMap::new(),
            stat_modules: BTreeMap::new(),
            command_tool_names: BTreeMap::new(),
            command_params: BTreeMap::new(),
            non_mutating_commands: BTreeSet::new(),
            safe_test_commands: BTreeSet::new(),
            device_dependent_commands: BTreeSet::new(),
            skip_commands: BTreeSet::new(),
            cmd_modules: BTreeMap::new(),
            v2_resource_names: BTreeMap::new(),
            v2_create_hints: BTreeMap::new(),
            v2_modules: BTreeMap::new(),
            mutating_globals: BTreeSet::new(),
            untestable_globals: BTreeSet::new(),
        }
    }

    /// Same tables under a different tool prefix
    pub fn with_prefix(&self, tool_prefix: impl Into<String>) -> Self {
        Self {
            tool_prefix: tool_prefix.into(),
            ..self.clone()
        }
    }

    /// `<prefix>_<suffix>`
    pub fn tool_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.tool_prefix, suffix)
    }

    /// Name of a REST or v2 tool, e.g. `unifi_list_networks`
    pub fn operation_tool_name(&self, operation: Operation, names: &NamePair) -> String {
        self.tool_name(&format!("{}_{}", operation.as_str(), names.noun_for(operation)))
    }

    // ---- REST ----

    /// Resources that support create/update (and usually delete).
    ///
    /// Always all named resources minus the read-only set.
    pub fn crud_rest(&self) -> BTreeSet<&str> {
        self.resource_names
            .keys()
            .filter(|name| !self.read_only_rest.contains(*name))
            .map(String::as_str)
            .collect()
    }

    pub fn classify_rest(&self, name: &str) -> RestClass {
        if name == self.setting_resource {
            RestClass::Setting
        } else if self.read_only_rest.contains(name) {
            RestClass::ReadOnly
        } else if self.resource_names.contains_key(name) {
            RestClass::Crud {
                deletable: !self.no_rest_delete.contains(name),
            }
        } else {
            RestClass::Unclassified
        }
    }

    pub fn rest_names(&self, name: &str) -> NamePair {
        self.resource_names
            .get(name)
            .cloned()
            .unwrap_or_else(|| NamePair::fallback(name))
    }

    pub fn rest_module(&self, name: &str) -> Module {
        self.rest_modules
            .get(name)
            .copied()
            .unwrap_or(Module::DEFAULT_REST)
    }

    // ---- Stat ----

    pub fn stat_display_name(&self, name: &str) -> String {
        self.stat_names
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    pub fn stat_module(&self, name: &str) -> Module {
        self.stat_modules
            .get(name)
            .copied()
            .unwrap_or(Module::DEFAULT_STAT)
    }

    // ---- Commands ----

    /// Tool name without prefix; falls back to `<command>_<manager>` with
    /// dashes replaced by underscores
    pub fn command_tool_name(&self, key: &CommandKey) -> String {
        match self.command_tool_names.get(key) {
            Some(name) => name.clone(),
            None => format!("{}_{}", key.command, key.manager).replace('-', "_"),
        }
    }

    /// Declared commands that require confirmation.
    ///
    /// Always the declared command names minus the non-mutating exceptions.
    pub fn mutation_commands(&self) -> BTreeSet<&CommandKey> {
        self.command_tool_names
            .keys()
            .filter(|key| !self.non_mutating_commands.contains(*key))
            .collect()
    }

    /// Undeclared commands are treated as mutating
    pub fn is_mutating_command(&self, key: &CommandKey) -> bool {
        !self.non_mutating_commands.contains(key)
    }

    pub fn is_skipped_command(&self, key: &CommandKey) -> bool {
        self.skip_commands.contains(key)
    }

    pub fn command_params(&self, key: &CommandKey) -> BTreeMap<String, String> {
        self.command_params.get(key).cloned().unwrap_or_default()
    }

    pub fn cmd_module(&self, key: &CommandKey) -> Module {
        self.cmd_modules
            .get(key)
            .copied()
            .unwrap_or(Module::DEFAULT_COMMAND)
    }

    // ---- v2 ----

    pub fn v2_names(&self, name: &str) -> NamePair {
        self.v2_resource_names
            .get(name)
            .cloned()
            .unwrap_or_else(|| NamePair::fallback(name))
    }

    pub fn v2_module(&self, name: &str) -> Module {
        self.v2_modules
            .get(name)
            .copied()
            .unwrap_or(Module::DEFAULT_V2)
    }

    // ---- Helpers ----

    /// Per-port override helper, registered with the device module
    pub fn port_override_tool(&self) -> String {
        self.tool_name("set_port_override")
    }

    /// Issue-reporting helper, always registered
    pub fn report_issue_tool(&self) -> String {
        self.tool_name("report_issue")
    }

    /// Maintainer-facing invariant violations; empty when the tables are sound
    pub fn consistency_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let crud = self.crud_rest();

        for name in &self.read_only_rest {
            if !self.resource_names.contains_key(name) {
                problems.push(format!("read-only resource '{name}' has no naming entry"));
            }
        }
        for name in &self.no_rest_delete {
            if !crud.contains(name.as_str()) {
                problems.push(format!("no-delete resource '{name}' is not a CRUD resource"));
            }
            if !self.workflow_hints.contains_key(name) {
                problems.push(format!("no-delete resource '{name}' has no workflow hint"));
            }
        }
        for name in self.minimal_create_payloads.keys() {
            if !crud.contains(name.as_str()) {
                problems.push(format!("create payload for non-CRUD resource '{name}'"));
            }
        }
        for key in &self.non_mutating_commands {
            if !self.command_tool_names.contains_key(key) {
                problems.push(format!("non-mutating command {key} is not declared"));
            }
        }
        for key in self.command_params.keys() {
            if !self.command_tool_names.contains_key(key) {
                problems.push(format!("parameters for undeclared command {key}"));
            }
        }
        problems
    }
}
