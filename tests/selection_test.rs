//! The selection oracle against the counter's expected module tool names

mod common;

use std::collections::BTreeSet;

use tempfile::TempDir;
use unifi_toolgen::generation::{ServerContext, ServerContextBuilder};
use unifi_toolgen::inventory::{FileInventoryLoader, InventoryLoader};
use unifi_toolgen::naming::{Module, NamingTables};
use unifi_toolgen::selection::{ModuleSelection, registered_tools};
use unifi_toolgen::verification::{always_on_tools, expected_module_tools};

async fn context(dir: &TempDir) -> ServerContext {
    let config = common::write_fixture(dir.path());
    let inventory = FileInventoryLoader::new(&config.samples_dir)
        .load(&config.inventory_path)
        .await
        .unwrap();
    ServerContextBuilder::new(NamingTables::builtin()).build(&inventory)
}

fn names(tools: Vec<&str>) -> BTreeSet<String> {
    tools.into_iter().map(str::to_string).collect()
}

#[tokio::test]
async fn test_each_module_alone_matches_expected_names() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir).await;
    let document = common::inventory_document();
    let tables = NamingTables::builtin();
    let expected = expected_module_tools(&document, tables);
    let always_on = always_on_tools(&document, tables);

    for module in Module::ALL {
        let selection = ModuleSelection::parse(module.as_str());
        let registered = names(registered_tools(&context, &selection, false));
        let mut want = expected.get(&module).cloned().unwrap_or_default();
        want.extend(always_on.iter().cloned());
        assert_eq!(registered, want, "module {module}");
    }
}

#[tokio::test]
async fn test_device_module_only() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir).await;

    let registered = names(registered_tools(&context, &ModuleSelection::parse("device"), false));
    let want: BTreeSet<String> = [
        "unifi_list_devices",
        "unifi_restart_device",
        "unifi_set_port_override",
        "unifi_status",
        "unifi_logout",
        "unifi_report_issue",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    assert_eq!(registered, want);
}

#[tokio::test]
async fn test_v2_tools_reachable_two_ways() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir).await;

    let by_module = names(registered_tools(&context, &ModuleSelection::parse("firewall"), false));
    let by_version = names(registered_tools(&context, &ModuleSelection::parse("v2"), false));
    assert!(by_module.contains("unifi_create_firewall_policy"));
    assert_eq!(by_module, by_version);

    let v1_only = names(registered_tools(&context, &ModuleSelection::parse("v1"), false));
    assert!(!v1_only.contains("unifi_list_traffic_rules"));
}

#[tokio::test]
async fn test_full_selection_registers_everything() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir).await;
    let all = registered_tools(&context, &ModuleSelection::parse("v1, v2"), false);
    assert_eq!(all.len(), common::FIXTURE_TOOL_COUNT);
}

#[tokio::test]
async fn test_empty_and_unknown_selection_is_always_on_only() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir).await;
    for expression in ["", "bogus", " , "] {
        let registered = names(registered_tools(&context, &ModuleSelection::parse(expression), false));
        let want: BTreeSet<String> = ["unifi_status", "unifi_logout", "unifi_report_issue"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(registered, want, "selection {expression:?}");
    }
}

#[tokio::test]
async fn test_read_only_strips_mutating_tools() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir).await;

    let all = registered_tools(&context, &ModuleSelection::parse("v1,v2"), true);
    assert_eq!(all.len(), common::FIXTURE_TOOL_COUNT - common::FIXTURE_MUTATING);
    assert!(!all.contains(&"unifi_logout"));
    assert!(!all.contains(&"unifi_set_port_override"));
    assert!(all.contains(&"unifi_status"));
    assert!(all.contains(&"unifi_get_speedtest_status"));

    let device = registered_tools(&context, &ModuleSelection::parse("device"), true);
    let device: BTreeSet<&str> = device.into_iter().collect();
    assert_eq!(
        device,
        ["unifi_list_devices", "unifi_status", "unifi_report_issue"].into_iter().collect()
    );
}
