//! Context builder: inventory + schema inference + naming tables → one
//! renderable [`ServerContext`].
//!
//! The builder performs no I/O and never mutates the inventory.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use tracing::{debug, info};

use super::context::RenderContext;
use super::counts::{ModuleCount, module_counts};
use super::descriptor::{
    ApiVersion, CommandEntry, GlobalEntry, RestEntry, StatEntry, ToolDescriptor, ToolSource,
    V2Entry, WritableField,
};
use super::utils::{python_literal, to_snake_case};
use crate::core::error::Result;
use crate::inventory::{ApiInventory, Endpoint, HttpMethod};
use crate::naming::{CommandKey, Module, NamingTables, Operation, RestClass};
use crate::schema::{FieldDescriptor, infer_schema};

/// Placeholder the test layer replaces with the default network's id
pub const DEFAULT_NETWORK_PLACEHOLDER: &str = "{default_network_id}";

/// Common fields surfaced as examples in stat tool docs
const SAMPLE_FIELD_LIMIT: usize = 5;

/// Everything the server and test templates render from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerContext {
    pub controller_version: String,
    pub tool_prefix: String,
    pub rest_tools: Vec<RestEntry>,
    pub stat_tools: Vec<StatEntry>,
    pub cmd_tools: Vec<CommandEntry>,
    pub v2_tools: Vec<V2Entry>,
    pub global_tools: Vec<GlobalEntry>,
    /// Every generated tool, in rendering order
    pub tools: Vec<ToolDescriptor>,
    /// REST endpoints without a naming entry; they produce no tools
    pub rest_skipped: Vec<String>,
    /// Commands dropped by the skip set, as `manager/command`
    pub cmd_skipped: Vec<String>,
    pub module_order: Vec<Module>,
    pub tool_count: usize,
    pub always_on_count: usize,
    pub module_counts: BTreeMap<Module, ModuleCount>,
    pub read_only_count: usize,
    pub mutating_count: usize,
}

impl ServerContext {
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn tools_in_module(&self, module: Module) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().filter(move |t| t.module == Some(module))
    }

    pub fn always_on_tools(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().filter(|t| t.is_always_on())
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Flatten into template variables, adding per-module groupings under
    /// `by_module.<module>.{rest,stat,cmd,v2}`
    pub fn to_render_context(&self) -> Result<RenderContext> {
        let mut context = RenderContext::from_serialize(self)?;

        let mut by_module = serde_json::Map::new();
        for module in Module::ALL {
            let group = json!({
                "rest": self.rest_tools.iter().filter(|t| t.module == module).collect::<Vec<_>>(),
                "stat": self.stat_tools.iter().filter(|t| t.module == module).collect::<Vec<_>>(),
                "cmd": self.cmd_tools.iter().filter(|t| t.module == module).collect::<Vec<_>>(),
                "v2": self.v2_tools.iter().filter(|t| t.module == module).collect::<Vec<_>>(),
            });
            by_module.insert(module.as_str().to_string(), group);
        }
        context.add_variable("by_module", JsonValue::Object(by_module));
        context.add_variable(
            "generated_rest_tools",
            serde_json::to_value(
                self.rest_tools
                    .iter()
                    .filter(|t| t.class.is_generated())
                    .collect::<Vec<_>>(),
            )?,
        );
        Ok(context)
    }
}

/// Builds a [`ServerContext`] from a loaded inventory
pub struct ServerContextBuilder<'a> {
    tables: &'a NamingTables,
}

impl<'a> ServerContextBuilder<'a> {
    pub fn new(tables: &'a NamingTables) -> Self {
        Self { tables }
    }

    pub fn build(&self, inventory: &ApiInventory) -> ServerContext {
        let mut tools = Vec::new();

        let mut rest_tools = Vec::new();
        let mut rest_skipped = Vec::new();
        for endpoint in inventory.rest_endpoints.values() {
            let entry = self.rest_entry(endpoint);
            if entry.class.is_generated() {
                tools.extend(self.rest_descriptors(&entry));
            } else {
                debug!(resource = %endpoint.name, "No naming entry, skipping REST endpoint");
                rest_skipped.push(endpoint.name.clone());
            }
            rest_tools.push(entry);
        }

        let stat_tools: Vec<StatEntry> = inventory
            .stat_endpoints
            .values()
            .map(|ep| self.stat_entry(ep))
            .collect();
        tools.extend(stat_tools.iter().map(|entry| self.stat_descriptor(entry)));

        let mut cmd_tools = Vec::new();
        let mut cmd_skipped = Vec::new();
        for endpoint in inventory.cmd_endpoints.values() {
            for command in &endpoint.commands {
                let key = CommandKey::new(&endpoint.name, command);
                if self.tables.is_skipped_command(&key) {
                    cmd_skipped.push(key.to_string());
                    continue;
                }
                let entry = self.cmd_entry(endpoint, key);
                tools.push(self.cmd_descriptor(&entry));
                cmd_tools.push(entry);
            }
        }

        let v2_tools: Vec<V2Entry> = inventory
            .v2_endpoints
            .values()
            .map(|ep| self.v2_entry(ep))
            .collect();
        for entry in &v2_tools {
            tools.extend(self.v2_descriptors(entry));
        }

        let global_tools: Vec<GlobalEntry> = inventory
            .global_endpoints
            .values()
            .map(|ep| self.global_entry(ep))
            .collect();
        tools.extend(global_tools.iter().map(global_descriptor));

        tools.push(self.port_override_descriptor());
        tools.push(self.report_issue_descriptor());

        let tool_count = expected_tool_count(&rest_tools, &stat_tools, &cmd_tools, &v2_tools, &global_tools);
        let always_on_count = tools.iter().filter(|t| t.is_always_on()).count();
        let mutating_count = tools.iter().filter(|t| t.is_mutation).count();
        let read_only_count = tools.len() - mutating_count;

        info!(
            tools = tool_count,
            always_on = always_on_count,
            rest_skipped = rest_skipped.len(),
            cmd_skipped = cmd_skipped.len(),
            "Built server context"
        );

        ServerContext {
            controller_version: inventory.controller_version.clone(),
            tool_prefix: self.tables.tool_prefix.clone(),
            module_counts: module_counts(&tools),
            rest_tools,
            stat_tools,
            cmd_tools,
            v2_tools,
            global_tools,
            tools,
            rest_skipped,
            cmd_skipped,
            module_order: Module::ALL.to_vec(),
            tool_count,
            always_on_count,
            read_only_count,
            mutating_count,
        }
    }

    // ---- REST ----

    fn rest_entry(&self, endpoint: &Endpoint) -> RestEntry {
        let name = endpoint.name.as_str();
        let names = self.tables.rest_names(name);
        let class = self.tables.classify_rest(name);
        let schema = infer_schema(&endpoint.samples);
        let create_payload = self
            .tables
            .minimal_create_payloads
            .get(name)
            .cloned()
            .unwrap_or_else(|| json!({}));

        RestEntry {
            resource: endpoint.name.clone(),
            singular: names.singular,
            plural: names.plural,
            path: endpoint.path.clone(),
            methods: endpoint.methods.clone(),
            is_crud: class.is_crud(),
            is_readonly: self.tables.read_only_rest.contains(name),
            is_setting: class == RestClass::Setting,
            is_hardware_dependent: self.tables.hardware_dependent_rest.contains(name),
            has_samples: endpoint.has_samples(),
            writable_fields: self.writable_fields(&schema),
            schema: schema.into_values().collect(),
            known_fields: endpoint.known_fields.clone(),
            create_payload_literal: python_literal(&create_payload),
            needs_network_id: create_payload.to_string().contains(DEFAULT_NETWORK_PLACEHOLDER),
            create_payload,
            required_create_fields: self
                .tables
                .required_create_fields
                .get(name)
                .cloned()
                .unwrap_or_default(),
            full_object_update: self.tables.full_object_update_rest.contains(name),
            no_rest_delete: self.tables.no_rest_delete.contains(name),
            workflow_hint: self.tables.workflow_hints.get(name).cloned().unwrap_or_default(),
            module: self.tables.rest_module(name),
            operations: class.operations().to_vec(),
            file_stem: to_snake_case(name),
            class,
        }
    }

    fn rest_descriptors(&self, entry: &RestEntry) -> Vec<ToolDescriptor> {
        let names = self.tables.rest_names(&entry.resource);
        entry
            .operations
            .iter()
            .map(|&operation| {
                let mut tool = ToolDescriptor::new(
                    self.tables.operation_tool_name(operation, &names),
                    &entry.resource,
                    ToolSource::Rest,
                );
                tool.operation = Some(operation);
                tool.method = Some(operation.rest_method());
                tool.path = Some(entry.path.clone());
                tool.module = Some(entry.module);
                tool.is_crud = entry.is_crud;
                tool.is_readonly = entry.is_readonly;
                tool.is_setting = entry.is_setting;
                tool.is_hardware_dependent = entry.is_hardware_dependent;
                tool.is_mutation = operation.is_mutating();
                if matches!(operation, Operation::Create | Operation::Update) {
                    tool.writable_fields = entry.writable_fields.clone();
                }
                if operation == Operation::Create && entry.is_crud {
                    tool.create_payload = Some(entry.create_payload.clone());
                }
                if operation == Operation::Update && !entry.workflow_hint.is_empty() {
                    tool.workflow_hint = Some(entry.workflow_hint.clone());
                }
                tool
            })
            .collect()
    }

    // ---- Stat ----

    fn stat_entry(&self, endpoint: &Endpoint) -> StatEntry {
        let name = endpoint.name.as_str();
        let display_name = self.tables.stat_display_name(name);
        let schema = infer_schema(&endpoint.samples);
        let (method, post_body) = match self.tables.stat_overrides.get(name) {
            Some(over) => (over.method, python_literal(&over.body)),
            None => (endpoint.method(), "{}".to_string()),
        };

        StatEntry {
            resource: endpoint.name.clone(),
            tool_name: self.tables.tool_name(&format!("list_{display_name}")),
            display_name,
            path: endpoint.path.clone(),
            method,
            post_body,
            has_samples: endpoint.has_samples(),
            sample_fields: schema
                .values()
                .filter(|f| f.common)
                .take(SAMPLE_FIELD_LIMIT)
                .map(|f| f.name.clone())
                .collect(),
            schema: schema.into_values().collect(),
            note: endpoint.note.clone(),
            module: self.tables.stat_module(name),
        }
    }

    fn stat_descriptor(&self, entry: &StatEntry) -> ToolDescriptor {
        let mut tool = ToolDescriptor::new(entry.tool_name.clone(), &entry.resource, ToolSource::Stat);
        tool.operation = Some(Operation::List);
        tool.method = Some(entry.method);
        tool.path = Some(entry.path.clone());
        tool.module = Some(entry.module);
        tool.is_readonly = true;
        tool
    }

    // ---- Commands ----

    fn cmd_entry(&self, endpoint: &Endpoint, key: CommandKey) -> CommandEntry {
        CommandEntry {
            tool_name: self.tables.command_tool_name(&key),
            path: endpoint.path.clone(),
            params: self.tables.command_params(&key),
            is_mutation: self.tables.is_mutating_command(&key),
            is_safe_test: self.tables.safe_test_commands.contains(&key),
            is_device_dependent: self.tables.device_dependent_commands.contains(&key),
            module: self.tables.cmd_module(&key),
            manager: key.manager,
            command: key.command,
        }
    }

    fn cmd_descriptor(&self, entry: &CommandEntry) -> ToolDescriptor {
        let mut tool = ToolDescriptor::new(
            self.tables.tool_name(&entry.tool_name),
            &entry.manager,
            ToolSource::Command,
        );
        tool.method = Some(HttpMethod::Post);
        tool.path = Some(entry.path.clone());
        tool.module = Some(entry.module);
        tool.is_mutation = entry.is_mutation;
        tool
    }

    // ---- v2 ----

    fn v2_entry(&self, endpoint: &Endpoint) -> V2Entry {
        let name = endpoint.name.as_str();
        let names = self.tables.v2_names(name);
        let schema = infer_schema(&endpoint.samples);

        V2Entry {
            resource: endpoint.name.clone(),
            singular: names.singular,
            plural: names.plural,
            path: endpoint.path.clone(),
            methods: endpoint.methods.clone(),
            has_samples: endpoint.has_samples(),
            writable_fields: self.writable_fields(&schema),
            schema: schema.into_values().collect(),
            create_hint: self.tables.v2_create_hints.get(name).cloned().unwrap_or_default(),
            module: self.tables.v2_module(name),
            operations: endpoint
                .methods
                .iter()
                .map(|&m| Operation::for_v2_method(m))
                .collect(),
        }
    }

    fn v2_descriptors(&self, entry: &V2Entry) -> Vec<ToolDescriptor> {
        let names = self.tables.v2_names(&entry.resource);
        entry
            .methods
            .iter()
            .zip(&entry.operations)
            .map(|(&method, &operation)| {
                let mut tool = ToolDescriptor::new(
                    self.tables.operation_tool_name(operation, &names),
                    &entry.resource,
                    ToolSource::V2,
                );
                tool.operation = Some(operation);
                tool.method = Some(method);
                tool.path = Some(entry.path.clone());
                tool.module = Some(entry.module);
                tool.api_version = ApiVersion::V2;
                tool.is_mutation = !method.is_read();
                if matches!(operation, Operation::Create | Operation::Update | Operation::Patch) {
                    tool.writable_fields = entry.writable_fields.clone();
                }
                if operation == Operation::Create && !entry.create_hint.is_empty() {
                    tool.workflow_hint = Some(entry.create_hint.clone());
                }
                tool
            })
            .collect()
    }

    // ---- Global and helpers ----

    fn global_entry(&self, endpoint: &Endpoint) -> GlobalEntry {
        GlobalEntry {
            name: endpoint.name.clone(),
            tool_name: self.tables.tool_name(&endpoint.name),
            method: endpoint.method(),
            path: endpoint.path.clone(),
            auth: endpoint.auth,
            is_mutation: self.tables.mutating_globals.contains(&endpoint.name),
            skip_test: self.tables.untestable_globals.contains(&endpoint.name),
        }
    }

    fn port_override_descriptor(&self) -> ToolDescriptor {
        let mut tool = ToolDescriptor::new(self.tables.port_override_tool(), "device", ToolSource::Helper);
        tool.method = Some(HttpMethod::Put);
        tool.path = Some("/api/s/{site}/rest/device/{device_id}".to_string());
        tool.module = Some(Module::Device);
        tool.is_mutation = true;
        tool
    }

    fn report_issue_descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.tables.report_issue_tool(), "report_issue", ToolSource::Helper)
    }

    // ---- Writable fields ----

    /// Non-read-only fields, enum/cross-ref fields first, then common ones,
    /// then alphabetical
    fn writable_fields(&self, schema: &BTreeMap<String, FieldDescriptor>) -> Vec<WritableField> {
        let mut fields: Vec<WritableField> = schema
            .values()
            .filter(|f| !f.read_only)
            .map(|f| self.writable_field(f))
            .collect();
        fields.sort_by(|a, b| {
            field_priority(a)
                .cmp(&field_priority(b))
                .then_with(|| a.name.cmp(&b.name))
        });
        fields
    }

    fn writable_field(&self, field: &FieldDescriptor) -> WritableField {
        let cross_ref = self.tables.id_cross_refs.get(&field.name).cloned();

        let mut detail = field.annotation.clone();
        if field.has_enum() {
            let quoted: Vec<String> = field.enum_values.iter().map(|v| format!("\"{v}\"")).collect();
            detail.push_str(": ");
            detail.push_str(&quoted.join("|"));
        }
        if let Some(tool) = &cross_ref {
            detail.push_str(", see ");
            detail.push_str(tool);
        }

        WritableField {
            name: field.name.clone(),
            field_type: field.field_type,
            annotation: field.annotation.clone(),
            common: field.common,
            enum_values: field.enum_values.clone(),
            description: format!("{} ({detail})", field.name),
            cross_ref,
        }
    }
}

fn field_priority(field: &WritableField) -> u8 {
    if !field.enum_values.is_empty() || field.cross_ref.is_some() {
        0
    } else if field.common {
        1
    } else {
        2
    }
}

fn global_descriptor(entry: &GlobalEntry) -> ToolDescriptor {
    let mut tool = ToolDescriptor::new(entry.tool_name.clone(), &entry.name, ToolSource::Global);
    tool.method = Some(entry.method);
    tool.path = Some(entry.path.clone());
    tool.is_mutation = entry.is_mutation;
    tool
}

/// Grand total from the per-category cardinality rules: REST by class, one
/// per stat feed and kept command, one per declared v2 verb, one per global,
/// plus the port-override and report-issue helpers
fn expected_tool_count(
    rest: &[RestEntry],
    stat: &[StatEntry],
    cmd: &[CommandEntry],
    v2: &[V2Entry],
    global: &[GlobalEntry],
) -> usize {
    rest.iter().map(|r| r.class.tool_count()).sum::<usize>()
        + stat.len()
        + cmd.len()
        + v2.iter().map(|v| v.methods.len()).sum::<usize>()
        + global.len()
        + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::EndpointCategory;
    use crate::naming::NamePair;

    fn tables() -> NamingTables {
        let mut t = NamingTables::new("unifi");
        t.resource_names.insert("widget".into(), NamePair::new("widget", "widgets"));
        t.resource_names.insert("legacyuser".into(), NamePair::new("legacy_user", "legacy_users"));
        t.resource_names.insert("setting".into(), NamePair::new("setting", "settings"));
        t.resource_names.insert("event".into(), NamePair::new("event", "events"));
        t.read_only_rest.extend(["setting".to_string(), "event".to_string()]);
        t.no_rest_delete.insert("legacyuser".into());
        t.workflow_hints.insert(
            "legacyuser".into(),
            "Delete is unsupported; call unifi_forget_client instead.".into(),
        );
        t.rest_modules.insert("widget".into(), Module::Device);
        t.id_cross_refs.insert("networkconf_id".into(), "unifi_list_networks".into());
        t.minimal_create_payloads.insert(
            "widget".into(),
            json!({"name": "w_{unique}", "networkconf_id": "{default_network_id}"}),
        );
        t.skip_commands.insert(CommandKey::new("sitemgr", "delete-site"));
        t.non_mutating_commands.insert(CommandKey::new("sitemgr", "get-admins"));
        t.command_tool_names.insert(CommandKey::new("sitemgr", "get-admins"), "get_admins".into());
        t.v2_resource_names.insert("traffic_rules".into(), NamePair::new("traffic_rule", "traffic_rules"));
        t.v2_modules.insert("traffic_rules".into(), Module::Firewall);
        t.mutating_globals.insert("logout".into());
        t
    }

    fn endpoint(name: &str, category: EndpointCategory) -> Endpoint {
        Endpoint::new(name, category, format!("/api/s/{{site}}/{category}/{name}"))
    }

    fn inventory() -> ApiInventory {
        let mut inv = ApiInventory::new("9.0.114");
        let mut widget = endpoint("widget", EndpointCategory::Rest);
        widget.methods = vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete];
        widget.samples = vec![
            json!({"_id": "1", "name": "a", "mode": "auto", "networkconf_id": "n1", "vlan": 10}),
            json!({"_id": "2", "name": "b", "mode": "auto"}),
        ];
        inv.insert(widget);
        inv.insert(endpoint("legacyuser", EndpointCategory::Rest));
        inv.insert(endpoint("setting", EndpointCategory::Rest));
        inv.insert(endpoint("event", EndpointCategory::Rest));
        inv.insert(endpoint("hotspotop", EndpointCategory::Rest));
        inv.insert(endpoint("health", EndpointCategory::Stat));

        let mut sitemgr = endpoint("sitemgr", EndpointCategory::Command);
        sitemgr.commands = vec!["get-admins".into(), "delete-site".into(), "set-site-name".into()];
        inv.insert(sitemgr);

        let mut rules = endpoint("traffic_rules", EndpointCategory::V2);
        rules.methods = vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Patch];
        inv.insert(rules);

        inv.insert(endpoint("status", EndpointCategory::Global));
        inv.insert(endpoint("logout", EndpointCategory::Global));
        inv
    }

    fn build() -> ServerContext {
        ServerContextBuilder::new(&tables()).build(&inventory())
    }

    #[test]
    fn test_crud_widget_gets_five_tools_in_one_module() {
        let ctx = build();
        let widget: Vec<&ToolDescriptor> = ctx.tools.iter().filter(|t| t.endpoint == "widget").collect();
        let names: Vec<&str> = widget.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "unifi_list_widgets",
                "unifi_get_widget",
                "unifi_create_widget",
                "unifi_update_widget",
                "unifi_delete_widget"
            ]
        );
        assert!(widget.iter().all(|t| t.module == Some(Module::Device)));
    }

    #[test]
    fn test_no_delete_resource_gets_four_tools_and_hint() {
        let ctx = build();
        let tools: Vec<&ToolDescriptor> = ctx.tools.iter().filter(|t| t.endpoint == "legacyuser").collect();
        assert_eq!(tools.len(), 4);
        assert!(ctx.tool("unifi_delete_legacy_user").is_none());

        let update = ctx.tool("unifi_update_legacy_user").unwrap();
        assert!(update.workflow_hint.as_deref().unwrap().contains("unifi_forget_client"));
    }

    #[test]
    fn test_setting_and_read_only_cardinality() {
        let ctx = build();
        assert_eq!(ctx.tools.iter().filter(|t| t.endpoint == "setting").count(), 3);
        assert_eq!(ctx.tools.iter().filter(|t| t.endpoint == "event").count(), 1);
        assert!(ctx.tool("unifi_list_events").unwrap().is_readonly);
    }

    #[test]
    fn test_unnamed_rest_endpoint_is_skipped() {
        let ctx = build();
        assert_eq!(ctx.rest_skipped, vec!["hotspotop"]);
        assert!(ctx.tools.iter().all(|t| t.endpoint != "hotspotop"));
        let entry = ctx.rest_tools.iter().find(|r| r.resource == "hotspotop").unwrap();
        assert_eq!(entry.class, RestClass::Unclassified);
    }

    #[test]
    fn test_command_skip_fallback_and_mutation() {
        let ctx = build();
        assert_eq!(ctx.cmd_skipped, vec!["sitemgr/delete-site"]);
        let names: Vec<&str> = ctx.cmd_tools.iter().map(|c| c.tool_name.as_str()).collect();
        assert_eq!(names, vec!["get_admins", "set_site_name_sitemgr"]);
        assert!(!ctx.tool("unifi_get_admins").unwrap().is_mutation);
        assert!(ctx.tool("unifi_set_site_name_sitemgr").unwrap().is_mutation);
        assert_eq!(ctx.tool("unifi_get_admins").unwrap().module, Some(Module::Admin));
    }

    #[test]
    fn test_v2_one_tool_per_verb() {
        let ctx = build();
        let list = ctx.tool("unifi_list_traffic_rules").unwrap();
        assert!(!list.is_mutation);
        assert_eq!(list.api_version, ApiVersion::V2);
        assert!(ctx.tool("unifi_create_traffic_rule").unwrap().is_mutation);
        assert!(ctx.tool("unifi_patch_traffic_rule").unwrap().is_mutation);
        assert_eq!(ctx.tools_in_module(Module::Firewall).count(), 3);
    }

    #[test]
    fn test_globals_and_helpers() {
        let ctx = build();
        assert!(ctx.tool("unifi_logout").unwrap().is_mutation);
        assert!(!ctx.tool("unifi_status").unwrap().is_mutation);

        let always_on: Vec<&str> = ctx.always_on_tools().map(|t| t.name.as_str()).collect();
        assert_eq!(always_on, vec!["unifi_logout", "unifi_status", "unifi_report_issue"]);

        let port = ctx.tool("unifi_set_port_override").unwrap();
        assert_eq!(port.module, Some(Module::Device));
        assert!(port.is_mutation);
    }

    #[test]
    fn test_counts_partition_the_total() {
        let ctx = build();
        // 5 + 4 + 3 + 1 + 0 REST, 1 stat, 2 cmd, 3 v2, 2 global, 2 helpers
        assert_eq!(ctx.tool_count, 23);
        assert_eq!(ctx.tool_count, ctx.tools.len());
        let module_sum: usize = ctx.module_counts.values().map(ModuleCount::total).sum();
        assert_eq!(module_sum + ctx.always_on_count, ctx.tool_count);
        assert_eq!(ctx.read_only_count + ctx.mutating_count, ctx.tool_count);
        assert_eq!(ctx.module_counts[&Module::Firewall].v2, 3);
    }

    #[test]
    fn test_writable_fields_order_and_description() {
        let ctx = build();
        let widget = ctx.rest_tools.iter().find(|r| r.resource == "widget").unwrap();
        let names: Vec<&str> = widget.writable_fields.iter().map(|f| f.name.as_str()).collect();
        // enum/cross-ref first, then common, then the rest; `_id` is read-only
        assert_eq!(names, vec!["mode", "networkconf_id", "name", "vlan"]);
        assert_eq!(widget.writable_fields[0].description, "mode (str: \"auto\")");
        assert_eq!(
            widget.writable_fields[1].description,
            "networkconf_id (str, see unifi_list_networks)"
        );
        assert!(widget.needs_network_id);
    }

    #[test]
    fn test_sample_less_endpoint_still_gets_tools() {
        let ctx = build();
        let legacy = ctx.rest_tools.iter().find(|r| r.resource == "legacyuser").unwrap();
        assert!(legacy.schema.is_empty());
        assert!(legacy.writable_fields.is_empty());
        assert_eq!(legacy.operations.len(), 4);
    }

    #[test]
    fn test_render_context_groups_by_module() {
        let ctx = build();
        let render = ctx.to_render_context().unwrap();
        let device_rest = render.data["by_module"]["device"]["rest"].as_array().unwrap();
        assert_eq!(device_rest.len(), 1);
        assert_eq!(render.data["tool_count"], 23);
        assert_eq!(render.data["generated_rest_tools"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_empty_inventory_has_only_helpers() {
        let ctx = ServerContextBuilder::new(&tables()).build(&ApiInventory::new("x"));
        assert_eq!(ctx.tool_count, 2);
        assert_eq!(ctx.always_on_count, 1);
    }

    #[test]
    fn test_stat_override_applies() {
        let mut t = tables();
        t.stat_overrides.insert(
            "health".into(),
            crate::naming::StatOverride { method: HttpMethod::Post, body: json!({"mac": "00:00:00:00:00:00"}) },
        );
        let ctx = ServerContextBuilder::new(&t).build(&inventory());
        let health = &ctx.stat_tools[0];
        assert_eq!(health.method, HttpMethod::Post);
        assert_eq!(health.post_body, "{'mac': '00:00:00:00:00:00'}");
    }
}
