//! Module vocabulary used to partition generated tools

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named partition of tools, selectable at server startup.
///
/// Declaration order is the canonical module order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Device,
    Client,
    Wifi,
    Network,
    Firewall,
    Routing,
    Hotspot,
    Monitor,
    System,
    Admin,
    Advanced,
}

impl Module {
    pub const ALL: [Module; 11] = [
        Module::Device,
        Module::Client,
        Module::Wifi,
        Module::Network,
        Module::Firewall,
        Module::Routing,
        Module::Hotspot,
        Module::Monitor,
        Module::System,
        Module::Admin,
        Module::Advanced,
    ];

    /// Fallback for REST resources without a module entry
    pub const DEFAULT_REST: Module = Module::Advanced;
    /// Fallback for stat feeds without a module entry
    pub const DEFAULT_STAT: Module = Module::Monitor;
    /// Fallback for commands without a module entry
    pub const DEFAULT_COMMAND: Module = Module::Admin;
    /// Fallback for v2 resources without a module entry
    pub const DEFAULT_V2: Module = Module::Advanced;

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Device => "device",
            Module::Client => "client",
            Module::Wifi => "wifi",
            Module::Network => "network",
            Module::Firewall => "firewall",
            Module::Routing => "routing",
            Module::Hotspot => "hotspot",
            Module::Monitor => "monitor",
            Module::System => "system",
            Module::Admin => "admin",
            Module::Advanced => "advanced",
        }
    }

    /// Module names in canonical order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Module::as_str).collect()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| format!("unknown module '{s}'"))
    }
}
