//! Built-in tables for the UniFi Network controller API

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde_json::json;

use super::module::Module;
use super::tables::{CommandKey, NamePair, NamingTables, StatOverride};
use crate::inventory::HttpMethod;

static BUILTIN: Lazy<NamingTables> = Lazy::new(build);

impl NamingTables {
    /// The UniFi tables, built once per process
    pub fn builtin() -> &'static NamingTables {
        &BUILTIN
    }
}

fn names(entries: &[(&str, &str, &str)]) -> BTreeMap<String, NamePair> {
    entries
        .iter()
        .map(|(key, singular, plural)| (key.to_string(), NamePair::new(*singular, *plural)))
        .collect()
}

fn set(entries: &[&str]) -> BTreeSet<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

fn strings(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn modules(entries: &[(&str, Module)]) -> BTreeMap<String, Module> {
    entries.iter().map(|(k, m)| (k.to_string(), *m)).collect()
}

fn cmd(manager: &str, command: &str) -> CommandKey {
    CommandKey::new(manager, command)
}

fn cmd_set(entries: &[(&str, &str)]) -> BTreeSet<CommandKey> {
    entries.iter().map(|(m, c)| cmd(m, c)).collect()
}

/// One declared command: key, tool name, parameters, module
const COMMANDS: &[(&str, &str, &str, &[(&str, &str)], Module)] = &[
    ("stamgr", "block-sta", "block_client", &[("mac", "str")], Module::Client),
    ("stamgr", "unblock-sta", "unblock_client", &[("mac", "str")], Module::Client),
    ("stamgr", "kick-sta", "kick_client", &[("mac", "str")], Module::Client),
    ("stamgr", "forget-sta", "forget_client", &[("macs", "list")], Module::Client),
    ("stamgr", "unauthorize-guest", "unauthorize_guest", &[("mac", "str")], Module::Hotspot),
    ("stamgr", "authorize-guest", "authorize_guest", &[("mac", "str"), ("minutes", "int")], Module::Hotspot),
    ("devmgr", "adopt", "adopt_device", &[("mac", "str")], Module::Device),
    ("devmgr", "restart", "restart_device", &[("mac", "str")], Module::Device),
    ("devmgr", "force-provision", "force_provision_device", &[("mac", "str")], Module::Device),
    ("devmgr", "power-cycle", "power_cycle_port", &[("mac", "str"), ("port_idx", "int")], Module::Device),
    ("devmgr", "speedtest", "run_speedtest", &[], Module::Monitor),
    ("devmgr", "speedtest-status", "get_speedtest_status", &[], Module::Monitor),
    ("devmgr", "set-locate", "locate_device", &[("mac", "str")], Module::Device),
    ("devmgr", "unset-locate", "unlocate_device", &[("mac", "str")], Module::Device),
    ("devmgr", "upgrade", "upgrade_device", &[("mac", "str")], Module::Device),
    ("devmgr", "upgrade-external", "upgrade_device_external", &[("mac", "str"), ("url", "str")], Module::Device),
    ("devmgr", "migrate", "migrate_device", &[("mac", "str"), ("inform_url", "str")], Module::Device),
    ("devmgr", "cancel-migrate", "cancel_migrate_device", &[("mac", "str")], Module::Device),
    ("devmgr", "spectrum-scan", "spectrum_scan", &[("mac", "str")], Module::Wifi),
    ("evtmgr", "archive-all-alarms", "archive_all_alarms", &[], Module::Monitor),
    ("sitemgr", "add-site", "add_site", &[("desc", "str")], Module::Admin),
    ("sitemgr", "delete-site", "delete_site", &[("site", "str")], Module::Admin),
    ("sitemgr", "update-site", "update_site", &[("desc", "str")], Module::Admin),
    ("sitemgr", "get-admins", "get_admins", &[], Module::Admin),
    ("sitemgr", "move-device", "move_device", &[("mac", "str"), ("site", "str")], Module::Admin),
    ("sitemgr", "delete-device", "delete_device", &[("mac", "str")], Module::Admin),
    ("backup", "list-backups", "list_backups", &[], Module::System),
    ("backup", "delete-backup", "delete_backup", &[("filename", "str")], Module::System),
    ("system", "backup", "create_backup", &[], Module::System),
    ("stat", "clear-dpi", "clear_dpi", &[], Module::Monitor),
];

fn build() -> NamingTables {
    let mut tables = NamingTables::new("unifi");

    tables.resource_names = names(&[
        ("networkconf", "network", "networks"),
        ("wlanconf", "wlan", "wlans"),
        ("wlangroup", "wlan_group", "wlan_groups"),
        ("portconf", "port_profile", "port_profiles"),
        ("portforward", "port_forward", "port_forwards"),
        ("firewallrule", "firewall_rule", "firewall_rules"),
        ("firewallgroup", "firewall_group", "firewall_groups"),
        ("dynamicdns", "dynamic_dns", "dynamic_dns_entries"),
        ("routing", "route", "routes"),
        ("usergroup", "user_group", "user_groups"),
        ("user", "user", "users"),
        ("tag", "tag", "tags"),
        ("setting", "setting", "settings"),
        ("alarm", "alarm", "alarms"),
        ("event", "event", "events"),
        ("radiusprofile", "radius_profile", "radius_profiles"),
        ("account", "account", "accounts"),
    ]);
    tables.read_only_rest = set(&["setting", "alarm", "event"]);
    // Client records are removed with stamgr forget-sta, not REST DELETE
    tables.no_rest_delete = set(&["user"]);
    tables.workflow_hints = strings(&[(
        "user",
        "Client records cannot be deleted through REST. To remove a client, call unifi_forget_client with its MAC.",
    )]);
    tables.full_object_update_rest = set(&["firewallrule", "routing", "wlanconf"]);
    tables.hardware_dependent_rest = set(&["routing", "wlanconf"]);
    tables.required_create_fields = strings(&[
        ("networkconf", "name, purpose"),
        ("wlanconf", "name, security, x_passphrase, networkconf_id"),
        ("portforward", "name, fwd, fwd_port, dst_port, proto"),
        ("firewallrule", "name, action, ruleset, rule_index, protocol"),
        ("firewallgroup", "name, group_type, group_members"),
        ("dynamicdns", "service, host_name, login, x_password"),
        ("routing", "name, type, static-route_network, static-route_nexthop"),
        ("account", "name, x_password"),
    ]);
    tables.minimal_create_payloads = [
        (
            "networkconf",
            json!({"name": "test_network_{unique}", "purpose": "vlan-only", "vlan_enabled": true, "vlan": 999}),
        ),
        (
            "wlanconf",
            json!({
                "name": "test_wlan_{unique}", "security": "wpapsk", "wpa_mode": "wpa2", "wpa_enc": "ccmp",
                "x_passphrase": "testpassword12345678", "networkconf_id": "{default_network_id}"
            }),
        ),
        ("wlangroup", json!({"name": "test_wlangroup_{unique}"})),
        (
            "portconf",
            json!({"name": "test_portprofile_{unique}", "forward": "customize", "native_networkconf_id": "{default_network_id}"}),
        ),
        (
            "portforward",
            json!({"name": "test_portforward_{unique}", "fwd": "192.168.1.100", "fwd_port": "8080", "dst_port": "9090", "proto": "tcp_udp"}),
        ),
        (
            "firewallrule",
            json!({
                "name": "test_fwrule_{unique}", "action": "drop", "ruleset": "WAN_IN", "protocol": "all",
                "rule_index": 4000, "protocol_match_excepted": false,
                "src_firewallgroup_ids": [], "src_mac_address": "", "src_address": "",
                "src_networkconf_id": "", "src_networkconf_type": "NETv4",
                "dst_firewallgroup_ids": [], "dst_address": "", "dst_networkconf_id": "",
                "dst_networkconf_type": "NETv4", "state_new": true, "state_established": true,
                "state_related": true, "state_invalid": false, "logging": false, "ipsec": "", "enabled": true
            }),
        ),
        (
            "firewallgroup",
            json!({"name": "test_fwgroup_{unique}", "group_type": "address-group", "group_members": ["192.168.1.0/24"]}),
        ),
        (
            "dynamicdns",
            json!({"service": "dyndns", "host_name": "test_{unique}.example.com", "login": "testuser", "x_password": "testpass"}),
        ),
        (
            "routing",
            json!({
                "name": "test_route_{unique}", "type": "static-route", "static-route_network": "10.99.99.0/24",
                "static-route_nexthop": "192.168.1.1", "enabled": true
            }),
        ),
        ("usergroup", json!({"name": "test_usergroup_{unique}"})),
        ("tag", json!({"name": "test_tag_{unique}", "member_table": []})),
        (
            "radiusprofile",
            json!({"name": "test_radius_{unique}", "auth_servers": [{"ip": "192.168.1.200", "port": 1812, "x_secret": "secret"}]}),
        ),
        ("account", json!({"name": "test_account_{unique}", "x_password": "testpassword"})),
    ]
    .into_iter()
    .map(|(name, payload)| (name.to_string(), payload))
    .collect();
    tables.id_cross_refs = strings(&[
        ("native_networkconf_id", "unifi_list_networks"),
        ("networkconf_id", "unifi_list_networks"),
        ("voice_networkconf_id", "unifi_list_networks"),
        ("last_connection_network_id", "unifi_list_networks"),
        ("portconf_id", "unifi_list_port_profiles"),
        ("wlangroup_id", "unifi_list_wlan_groups"),
        ("usergroup_id", "unifi_list_user_groups"),
        ("radiusprofile_id", "unifi_list_radius_profiles"),
        ("src_firewallgroup_ids", "unifi_list_firewall_groups"),
        ("dst_firewallgroup_ids", "unifi_list_firewall_groups"),
        ("src_networkconf_id", "unifi_list_networks"),
        ("dst_networkconf_id", "unifi_list_networks"),
        ("ap_group_ids", "unifi_list_wlan_groups"),
    ]);
    tables.rest_modules = modules(&[
        ("networkconf", Module::Network),
        ("wlanconf", Module::Wifi),
        ("wlangroup", Module::Wifi),
        ("portconf", Module::Device),
        ("portforward", Module::Firewall),
        ("firewallrule", Module::Firewall),
        ("firewallgroup", Module::Firewall),
        ("dynamicdns", Module::Routing),
        ("routing", Module::Routing),
        ("usergroup", Module::Client),
        ("user", Module::Client),
        ("tag", Module::System),
        ("setting", Module::System),
        ("alarm", Module::Monitor),
        ("event", Module::Monitor),
        ("radiusprofile", Module::Hotspot),
        ("account", Module::Hotspot),
    ]);

    tables.stat_names = strings(&[
        ("device", "devices"),
        ("sta", "clients"),
        ("health", "health"),
        ("event", "stat_events"),
        ("alarm", "stat_alarms"),
        ("rogueap", "rogue_aps"),
        ("sitedpi", "site_dpi"),
        ("stadpi", "client_dpi"),
        ("dynamicdns", "dynamic_dns_stats"),
        ("portforward", "port_forward_stats"),
        ("sysinfo", "sysinfo"),
        ("ccode", "country_codes"),
        ("current_channel", "current_channels"),
        ("device_basic", "devices_basic"),
        ("routing", "routing_stats"),
        ("authorization", "authorizations"),
        ("session", "sessions"),
        ("report", "report"),
    ]);
    // GET on stat/session answers 400 InvalidArgs
    tables.stat_overrides.insert(
        "session".to_string(),
        StatOverride {
            method: HttpMethod::Post,
            body: json!({"mac": "00:00:00:00:00:00"}),
        },
    );
    tables.stat_modules = modules(&[
        ("device", Module::Device),
        ("device_basic", Module::Device),
        ("sta", Module::Client),
        ("stadpi", Module::Client),
        ("session", Module::Client),
        ("rogueap", Module::Wifi),
        ("ccode", Module::Wifi),
        ("current_channel", Module::Wifi),
        ("portforward", Module::Firewall),
        ("dynamicdns", Module::Routing),
        ("routing", Module::Routing),
        ("authorization", Module::Hotspot),
        ("health", Module::Monitor),
        ("event", Module::Monitor),
        ("alarm", Module::Monitor),
        ("sitedpi", Module::Monitor),
        ("report", Module::Monitor),
        ("sysinfo", Module::System),
    ]);

    for (manager, command, tool, params, module) in COMMANDS {
        let key = cmd(manager, command);
        tables.command_tool_names.insert(key.clone(), tool.to_string());
        tables.command_params.insert(key.clone(), strings(params));
        tables.cmd_modules.insert(key, *module);
    }
    tables.non_mutating_commands = cmd_set(&[
        ("devmgr", "speedtest-status"),
        ("sitemgr", "get-admins"),
        ("backup", "list-backups"),
    ]);
    tables.safe_test_commands = cmd_set(&[
        ("devmgr", "set-locate"),
        ("devmgr", "unset-locate"),
        ("devmgr", "speedtest-status"),
        ("evtmgr", "archive-all-alarms"),
        ("sitemgr", "get-admins"),
        ("backup", "list-backups"),
    ]);
    // Answer with an error unless a real device is adopted
    tables.device_dependent_commands = cmd_set(&[("devmgr", "set-locate"), ("devmgr", "unset-locate")]);
    // Site lifecycle is out of reach of a site-scoped server
    tables.skip_commands = cmd_set(&[("sitemgr", "add-site"), ("sitemgr", "delete-site")]);

    tables.v2_resource_names = names(&[
        ("firewall_policies", "firewall_policy", "firewall_policies"),
        ("traffic_rules", "traffic_rule", "traffic_rules"),
    ]);
    tables.v2_create_hints = strings(&[
        (
            "firewall_policies",
            "Requires source and destination zone ids; list existing policies first to copy a valid zone layout.",
        ),
        (
            "traffic_rules",
            "Requires matching_target and target_devices; list existing rules first to see the accepted shapes.",
        ),
    ]);
    tables.v2_modules = modules(&[
        ("firewall_policies", Module::Firewall),
        ("traffic_rules", Module::Firewall),
    ]);

    tables.mutating_globals = set(&["logout", "system_poweroff", "system_reboot"]);
    tables.untestable_globals = set(&["logout", "system_poweroff", "system_reboot"]);

    tables
}
