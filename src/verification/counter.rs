//! Tool counts recomputed from the raw inventory document and the naming
//! tables, without going through the loader model or the context builder.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::core::error::Result;
use crate::generation::{ApiVersion, ModuleCount, empty_module_counts};
use crate::inventory::{UNTOOLED_CATEGORIES, parse_methods, read_document};
use crate::naming::{CommandKey, Module, NamingTables, Operation, RestClass};

/// Endpoints declared per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointCounts {
    pub rest: usize,
    pub stat: usize,
    pub cmd_managers: usize,
    pub cmd_commands: usize,
    pub v2: usize,
    pub global: usize,
    pub list: usize,
    pub guest: usize,
    pub websocket: usize,
    pub total: usize,
}

/// Tools expected per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryToolCounts {
    pub rest: usize,
    pub stat: usize,
    pub cmd: usize,
    pub v2: usize,
    pub global: usize,
    pub port_override: usize,
    pub report_issue: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestCount {
    pub tools: usize,
    pub class: RestClass,
}

/// Everything the counter derives from one inventory document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCounts {
    pub endpoints: EndpointCounts,
    pub tools: CategoryToolCounts,
    pub rest_detail: BTreeMap<String, RestCount>,
    pub rest_skipped: Vec<String>,
    pub v2_detail: BTreeMap<String, usize>,
    /// Declared commands per manager, before the skip set applies
    pub cmd_detail: BTreeMap<String, Vec<String>>,
    pub cmd_skipped: Vec<String>,
    pub modules: BTreeMap<Module, ModuleCount>,
    pub always_on: usize,
    pub read_only: usize,
    pub mutating: usize,
}

impl ToolCounts {
    pub fn total(&self) -> usize {
        self.tools.total
    }

    /// v1 tools across all modules plus the always-on tools
    pub fn v1_total(&self) -> usize {
        self.modules.values().map(|m| m.v1).sum::<usize>() + self.always_on
    }

    /// v2 tools across all modules plus the always-on tools
    pub fn v2_total(&self) -> usize {
        self.modules.values().map(|m| m.v2).sum::<usize>() + self.always_on
    }

    /// Tools registered when exactly `module` is selected
    pub fn module_expected(&self, module: Module) -> usize {
        self.modules.get(&module).map_or(0, ModuleCount::total) + self.always_on
    }
}

pub(crate) fn section<'d>(document: &'d JsonValue, key: &str) -> Option<&'d Map<String, JsonValue>> {
    document.get(key).and_then(JsonValue::as_object)
}

pub(crate) fn section_len(document: &JsonValue, key: &str) -> usize {
    section(document, key).map_or(0, Map::len)
}

pub(crate) fn declared_commands(entry: &JsonValue) -> Vec<String> {
    entry
        .get("commands")
        .and_then(JsonValue::as_array)
        .map(|cmds| {
            cmds.iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn declared_v2_methods(name: &str, entry: &JsonValue) -> Vec<crate::inventory::HttpMethod> {
    let raw: Option<Vec<String>> = entry.get("methods").and_then(JsonValue::as_array).map(|ms| {
        ms.iter()
            .filter_map(JsonValue::as_str)
            .map(str::to_string)
            .collect()
    });
    parse_methods(name, raw.as_deref())
}

/// Recomputes expected tool counts from a raw inventory document
pub struct ToolCounter<'a> {
    tables: &'a NamingTables,
}

impl<'a> ToolCounter<'a> {
    pub fn new(tables: &'a NamingTables) -> Self {
        Self { tables }
    }

    /// Read the inventory at `path` and count it
    pub async fn count_file(&self, path: &Path) -> Result<ToolCounts> {
        let document = read_document(path).await?;
        Ok(self.count(&document))
    }

    pub fn count(&self, document: &JsonValue) -> ToolCounts {
        let tables = self.tables;
        let mut modules = empty_module_counts();
        let mut tools = CategoryToolCounts::default();

        // REST: cardinality by classification, unnamed resources skipped
        let mut rest_detail = BTreeMap::new();
        let mut rest_skipped = Vec::new();
        for name in section(document, "rest_endpoints").into_iter().flat_map(Map::keys) {
            let class = tables.classify_rest(name);
            if !class.is_generated() {
                rest_skipped.push(name.clone());
                continue;
            }
            let module = modules.entry(tables.rest_module(name)).or_default();
            for operation in class.operations() {
                module.add(ApiVersion::V1, operation.is_mutating());
            }
            tools.rest += class.tool_count();
            rest_detail.insert(name.clone(), RestCount { tools: class.tool_count(), class });
        }

        // Stat: one read-only tool per feed
        for name in section(document, "stat_endpoints").into_iter().flat_map(Map::keys) {
            modules
                .entry(tables.stat_module(name))
                .or_default()
                .add(ApiVersion::V1, false);
            tools.stat += 1;
        }

        // Commands: one tool per declared command outside the skip set
        let mut cmd_detail = BTreeMap::new();
        let mut cmd_skipped = Vec::new();
        let mut cmd_commands = 0;
        for (manager, entry) in section(document, "cmd_endpoints").into_iter().flatten() {
            let commands = declared_commands(entry);
            cmd_commands += commands.len();
            for command in &commands {
                let key = CommandKey::new(manager, command);
                if tables.is_skipped_command(&key) {
                    cmd_skipped.push(key.to_string());
                    continue;
                }
                modules
                    .entry(tables.cmd_module(&key))
                    .or_default()
                    .add(ApiVersion::V1, tables.is_mutating_command(&key));
                tools.cmd += 1;
            }
            cmd_detail.insert(manager.clone(), commands);
        }

        // v2: one tool per declared verb
        let mut v2_detail = BTreeMap::new();
        for (name, entry) in section(document, "v2_endpoints").into_iter().flatten() {
            let methods = declared_v2_methods(name, entry);
            let module = modules.entry(tables.v2_module(name)).or_default();
            for method in &methods {
                module.add(ApiVersion::V2, Operation::for_v2_method(*method).is_mutating());
            }
            tools.v2 += methods.len();
            v2_detail.insert(name.clone(), methods.len());
        }

        // Globals are always on; their split is tracked outside the modules
        let mut global_mutating = 0;
        for name in section(document, "global_endpoints").into_iter().flat_map(Map::keys) {
            if tables.mutating_globals.contains(name) {
                global_mutating += 1;
            }
            tools.global += 1;
        }

        tools.port_override = 1;
        modules
            .entry(Module::Device)
            .or_default()
            .add(ApiVersion::V1, true);
        tools.report_issue = 1;

        tools.total = tools.rest
            + tools.stat
            + tools.cmd
            + tools.v2
            + tools.global
            + tools.port_override
            + tools.report_issue;

        let always_on = tools.global + tools.report_issue;
        let module_read_only: usize = modules.values().map(|m| m.read_only).sum();
        let module_mutating: usize = modules.values().map(|m| m.mutating).sum();

        let endpoints = endpoint_counts(document, cmd_commands);

        ToolCounts {
            endpoints,
            tools,
            rest_detail,
            rest_skipped,
            v2_detail,
            cmd_detail,
            cmd_skipped,
            modules,
            always_on,
            read_only: module_read_only + (always_on - global_mutating),
            mutating: module_mutating + global_mutating,
        }
    }
}

fn endpoint_counts(document: &JsonValue, cmd_commands: usize) -> EndpointCounts {
    let mut counts = EndpointCounts {
        rest: section_len(document, "rest_endpoints"),
        stat: section_len(document, "stat_endpoints"),
        cmd_managers: section_len(document, "cmd_endpoints"),
        cmd_commands,
        v2: section_len(document, "v2_endpoints"),
        global: section_len(document, "global_endpoints"),
        list: section_len(document, UNTOOLED_CATEGORIES[0]),
        guest: section_len(document, UNTOOLED_CATEGORIES[1]),
        websocket: section_len(document, UNTOOLED_CATEGORIES[2]),
        total: 0,
    };
    counts.total = counts.rest
        + counts.stat
        + counts.cmd_commands
        + counts.v2
        + counts.global
        + counts.list
        + counts.guest
        + counts.websocket;
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> JsonValue {
        json!({
            "controller_version": "9.0.114",
            "rest_endpoints": {
                "networkconf": {"path": "/api/s/{site}/rest/networkconf"},
                "user": {"path": "/api/s/{site}/rest/user"},
                "setting": {"path": "/api/s/{site}/rest/setting"},
                "alarm": {"path": "/api/s/{site}/rest/alarm"},
                "hotspotop": {"path": "/api/s/{site}/rest/hotspotop"}
            },
            "stat_endpoints": {
                "health": {"path": "/api/s/{site}/stat/health"},
                "sta": {"path": "/api/s/{site}/stat/sta"}
            },
            "cmd_endpoints": {
                "sitemgr": {"path": "/api/s/{site}/cmd/sitemgr", "commands": ["get-admins", "delete-site", "move-device"]}
            },
            "v2_endpoints": {
                "traffic_rules": {"path": "/v2/api/site/{site}/trafficrules", "methods": ["GET", "POST", "PUT", "DELETE"]}
            },
            "global_endpoints": {
                "status": {"path": "/status"},
                "logout": {"path": "/api/logout", "method": "POST"}
            },
            "guest_endpoints": {"authorize": {"path": "/guest/s/{site}/login"}}
        })
    }

    #[test]
    fn test_category_counts() {
        let counts = ToolCounter::new(NamingTables::builtin()).count(&document());

        // networkconf 5, user 4 (no delete), setting 3, alarm 1
        assert_eq!(counts.tools.rest, 13);
        assert_eq!(counts.rest_skipped, vec!["hotspotop"]);
        assert_eq!(counts.rest_detail["user"].tools, 4);
        assert_eq!(counts.tools.stat, 2);
        assert_eq!(counts.tools.cmd, 2);
        assert_eq!(counts.cmd_skipped, vec!["sitemgr/delete-site"]);
        assert_eq!(counts.tools.v2, 4);
        assert_eq!(counts.tools.global, 2);
        assert_eq!(counts.tools.total, 13 + 2 + 2 + 4 + 2 + 1 + 1);
    }

    #[test]
    fn test_endpoint_counts_include_untooled() {
        let counts = ToolCounter::new(NamingTables::builtin()).count(&document());
        assert_eq!(counts.endpoints.cmd_commands, 3);
        assert_eq!(counts.endpoints.guest, 1);
        assert_eq!(counts.endpoints.total, 5 + 2 + 3 + 1 + 2 + 1);
    }

    #[test]
    fn test_module_breakdown() {
        let counts = ToolCounter::new(NamingTables::builtin()).count(&document());

        let firewall = counts.modules[&Module::Firewall];
        assert_eq!(firewall.v2, 4);
        assert_eq!(firewall.read_only, 1);
        assert_eq!(firewall.mutating, 3);

        // device holds only the port override helper here
        assert_eq!(counts.modules[&Module::Device], ModuleCount { v1: 1, v2: 0, read_only: 0, mutating: 1 });
        assert_eq!(counts.always_on, 3);
    }

    #[test]
    fn test_read_only_plus_mutating_is_total() {
        let counts = ToolCounter::new(NamingTables::builtin()).count(&document());
        assert_eq!(counts.read_only + counts.mutating, counts.total());
        // logout is a mutating global
        assert!(counts.mutating >= 1);
    }

    #[test]
    fn test_counting_is_repeatable() {
        let counter = ToolCounter::new(NamingTables::builtin());
        assert_eq!(counter.count(&document()), counter.count(&document()));
    }

    #[test]
    fn test_shortcut_totals() {
        let counts = ToolCounter::new(NamingTables::builtin()).count(&document());
        assert_eq!(counts.v2_total(), 4 + counts.always_on);
        assert_eq!(counts.v1_total() + counts.v2_total() - counts.always_on, counts.total());
        assert_eq!(counts.module_expected(Module::Hotspot), counts.always_on);
    }

    #[test]
    fn test_declared_empty_v2_methods_count_no_tools() {
        let doc = json!({
            "v2_endpoints": {
                "zones": {"path": "/v2/z", "methods": []},
                "rules": {"path": "/v2/r"}
            }
        });
        let counts = ToolCounter::new(NamingTables::builtin()).count(&doc);
        assert_eq!(counts.endpoints.v2, 2);
        assert_eq!(counts.tools.v2, 1);
        assert_eq!(counts.read_only + counts.mutating, counts.total());
    }
}
