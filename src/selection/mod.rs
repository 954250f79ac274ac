//! Runtime module selection
//!
//! Mirrors what a generated server registers at startup for a given
//! selection expression such as `"device,client"` or `"v1,v2"`, so the
//! module partition can be checked without starting the server.

use std::collections::BTreeSet;
use std::fmt;

use tracing::warn;

use crate::generation::{ApiVersion, ServerContext, ToolDescriptor};
use crate::naming::Module;

/// Selection a generated server uses when none is configured
pub const DEFAULT_SELECTION: &str = "v1,v2";

/// A parsed selection expression.
///
/// `v1` enables the v1 tools of every module and `v2` the v2 tools of every
/// module. Naming a module enables both its v1 and v2 tools, so a v2 tool is
/// reachable through `v2` and through its own module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSelection {
    pub modules: BTreeSet<Module>,
    pub all_v1: bool,
    pub all_v2: bool,
}

impl ModuleSelection {
    /// Parse a comma-separated expression. Whitespace around names is
    /// ignored; unknown names are logged and dropped.
    pub fn parse(expression: &str) -> Self {
        let mut selection = Self::default();
        for part in expression.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "v1" => selection.all_v1 = true,
                "v2" => selection.all_v2 = true,
                other => match other.parse::<Module>() {
                    Ok(module) => {
                        selection.modules.insert(module);
                    }
                    Err(_) => warn!(module = %part, "Ignoring unknown module in selection"),
                },
            }
        }
        selection
    }

    /// Only the always-on tools
    pub fn is_empty(&self) -> bool {
        !self.all_v1 && !self.all_v2 && self.modules.is_empty()
    }

    /// Whether a module-tagged tool would be registered; always-on tools
    /// are always selected
    pub fn selects(&self, tool: &ToolDescriptor) -> bool {
        let Some(module) = tool.module else {
            return true;
        };
        let whole_version = match tool.api_version {
            ApiVersion::V1 => self.all_v1,
            ApiVersion::V2 => self.all_v2,
        };
        whole_version || self.modules.contains(&module)
    }
}

impl fmt::Display for ModuleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        if self.all_v1 {
            parts.push("v1");
        }
        if self.all_v2 {
            parts.push("v2");
        }
        parts.extend(self.modules.iter().map(Module::as_str));
        f.write_str(&parts.join(","))
    }
}

/// Names of the tools a generated server registers for `selection`.
///
/// With `read_only` set, every mutating tool is dropped, always-on ones
/// included.
pub fn registered_tools<'c>(
    context: &'c ServerContext,
    selection: &ModuleSelection,
    read_only: bool,
) -> Vec<&'c str> {
    context
        .tools
        .iter()
        .filter(|tool| selection.selects(tool))
        .filter(|tool| !(read_only && tool.is_mutation))
        .map(|tool| tool.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_parse_shortcuts_and_whitespace() {
        let sel = ModuleSelection::parse(" v1 , v2 ");
        assert!(sel.all_v1 && sel.all_v2);
        assert!(sel.modules.is_empty());
        assert_eq!(sel.to_string(), "v1,v2");
    }

    #[test]
    #[traced_test]
    fn test_parse_modules() {
        let sel = ModuleSelection::parse("device,Client,,bogus");
        assert_eq!(
            sel.modules.into_iter().collect::<Vec<_>>(),
            vec![Module::Device, Module::Client]
        );
        assert!(logs_contain("Ignoring unknown module in selection"));
    }

    #[test]
    fn test_empty_selection() {
        assert!(ModuleSelection::parse("").is_empty());
        assert!(ModuleSelection::parse(" , ").is_empty());
        assert!(!ModuleSelection::parse(DEFAULT_SELECTION).is_empty());
    }
}
