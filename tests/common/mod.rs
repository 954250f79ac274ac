//! Shared fixture: a small controller inventory with samples covering every
//! endpoint category and classification.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use unifi_toolgen::core::config::GeneratorConfig;

/// REST 13 + stat 3 + cmd 5 + v2 5 + global 2 + port override + report issue
pub const FIXTURE_TOOL_COUNT: usize = 30;
pub const FIXTURE_MUTATING: usize = 14;

pub fn inventory_document() -> serde_json::Value {
    json!({
        "controller_version": "9.0.114",
        "rest_endpoints": {
            "networkconf": {"path": "/api/s/{site}/rest/networkconf", "methods": ["GET", "POST", "PUT", "DELETE"]},
            "user": {"path": "/api/s/{site}/rest/user", "methods": ["GET", "POST", "PUT"]},
            "setting": {"path": "/api/s/{site}/rest/setting", "methods": ["GET", "PUT"]},
            "event": {"path": "/api/s/{site}/rest/event"},
            "hotspotop": {"path": "/api/s/{site}/rest/hotspotop"}
        },
        "stat_endpoints": {
            "device": {"path": "/api/s/{site}/stat/device"},
            "sta": {"path": "/api/s/{site}/stat/sta"},
            "session": {"path": "/api/s/{site}/stat/session", "note": "Client sessions"}
        },
        "cmd_endpoints": {
            "stamgr": {"path": "/api/s/{site}/cmd/stamgr", "commands": ["block-sta", "kick-sta"]},
            "devmgr": {"path": "/api/s/{site}/cmd/devmgr", "commands": ["restart", "speedtest-status"]},
            "sitemgr": {"path": "/api/s/{site}/cmd/sitemgr", "commands": ["add-site", "get-admins"]}
        },
        "v2_endpoints": {
            "firewall_policies": {
                "path": "/proxy/network/v2/api/site/{site}/firewall-policies",
                "methods": ["GET", "POST", "PUT", "DELETE"]
            },
            "traffic_rules": {"path": "/proxy/network/v2/api/site/{site}/trafficrules"}
        },
        "global_endpoints": {
            "status": {"path": "/status", "auth": false},
            "logout": {"path": "/api/logout", "method": "POST"}
        },
        "websocket_endpoints": {
            "events": {"path": "/wss/s/{site}/events"}
        }
    })
}

fn write_json(path: &Path, value: serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// Write the inventory and samples under `dir`, returning a config that
/// points at them and at the shipped FastMCP templates
pub fn write_fixture(dir: &Path) -> GeneratorConfig {
    let samples = dir.join("api-samples");
    fs::create_dir_all(&samples).unwrap();

    write_json(&dir.join("endpoint-inventory.json"), inventory_document());
    write_json(
        &samples.join("rest_networkconf.json"),
        json!({"meta": {"rc": "ok"}, "data": [
            {"_id": "n1", "site_id": "s1", "name": "LAN", "purpose": "corporate", "vlan": 1, "dhcpd_enabled": true},
            {"_id": "n2", "site_id": "s1", "name": "Guest", "purpose": "guest", "vlan": 20, "dhcpd_enabled": true},
            {"_id": "n3", "site_id": "s1", "name": "IoT", "purpose": "corporate", "vlan": 30}
        ]}),
    );
    write_json(
        &samples.join("rest_user.json"),
        json!([
            {"_id": "u1", "mac": "aa:bb:cc:dd:ee:01", "status": "online", "usergroup_id": "g1"},
            {"_id": "u2", "mac": "aa:bb:cc:dd:ee:02", "status": "offline", "usergroup_id": "g1"},
            {"_id": "u3", "mac": "aa:bb:cc:dd:ee:03", "status": "online"}
        ]),
    );
    write_json(
        &samples.join("stat_device.json"),
        json!({"data": [{"_id": "d1", "mac": "aa:bb:cc:00:00:01", "model": "USW", "state": 1}]}),
    );
    // unreadable samples degrade to no data
    fs::write(samples.join("rest_setting.json"), "{ not json").unwrap();

    GeneratorConfig {
        inventory_path: dir.join("endpoint-inventory.json"),
        samples_dir: samples,
        field_inventory_path: None,
        template_dir: templates_dir(),
        output_dir: dir.join("generated"),
        tool_prefix: "unifi".to_string(),
    }
}

pub fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/fastmcp")
}
