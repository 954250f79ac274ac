//! Expected tool names per module, derived from the raw document.
//!
//! These sets are the oracle for module selection: loading a module alone
//! must register exactly its tools, its v2 tools and the always-on tools.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value as JsonValue};

use super::counter::{declared_commands, declared_v2_methods, section};
use crate::naming::{CommandKey, Module, NamingTables, Operation};

pub type ModuleToolNames = BTreeMap<Module, BTreeSet<String>>;

fn empty_modules() -> ModuleToolNames {
    Module::ALL.into_iter().map(|m| (m, BTreeSet::new())).collect()
}

/// Global endpoint tools plus the report-issue helper
pub fn always_on_tools(document: &JsonValue, tables: &NamingTables) -> BTreeSet<String> {
    let mut names: BTreeSet<String> = section(document, "global_endpoints")
        .into_iter()
        .flat_map(Map::keys)
        .map(|name| tables.tool_name(name))
        .collect();
    names.insert(tables.report_issue_tool());
    names
}

/// v1 tools (REST, stat, command, port override) per module
pub fn v1_module_tools(document: &JsonValue, tables: &NamingTables) -> ModuleToolNames {
    let mut tools = empty_modules();

    for name in section(document, "rest_endpoints").into_iter().flat_map(Map::keys) {
        let class = tables.classify_rest(name);
        if !class.is_generated() {
            continue;
        }
        let names = tables.rest_names(name);
        let module_tools = tools.entry(tables.rest_module(name)).or_default();
        for &operation in class.operations() {
            module_tools.insert(tables.operation_tool_name(operation, &names));
        }
    }

    for name in section(document, "stat_endpoints").into_iter().flat_map(Map::keys) {
        let display = tables.stat_display_name(name);
        tools
            .entry(tables.stat_module(name))
            .or_default()
            .insert(tables.tool_name(&format!("list_{display}")));
    }

    for (manager, entry) in section(document, "cmd_endpoints").into_iter().flatten() {
        for command in declared_commands(entry) {
            let key = CommandKey::new(manager, command);
            if tables.is_skipped_command(&key) {
                continue;
            }
            tools
                .entry(tables.cmd_module(&key))
                .or_default()
                .insert(tables.tool_name(&tables.command_tool_name(&key)));
        }
    }

    tools
        .entry(Module::Device)
        .or_default()
        .insert(tables.port_override_tool());
    tools
}

/// v2 tools per module; only modules that own v2 tools appear
pub fn v2_module_tools(document: &JsonValue, tables: &NamingTables) -> ModuleToolNames {
    let mut tools = ModuleToolNames::new();
    for (name, entry) in section(document, "v2_endpoints").into_iter().flatten() {
        let names = tables.v2_names(name);
        let module_tools = tools.entry(tables.v2_module(name)).or_default();
        for method in declared_v2_methods(name, entry) {
            let operation = Operation::for_v2_method(method);
            module_tools.insert(tables.operation_tool_name(operation, &names));
        }
    }
    tools
}

/// v1 and v2 tools per module, combined
pub fn expected_module_tools(document: &JsonValue, tables: &NamingTables) -> ModuleToolNames {
    let mut tools = v1_module_tools(document, tables);
    for (module, names) in v2_module_tools(document, tables) {
        tools.entry(module).or_default().extend(names);
    }
    tools
}
