//! Human-readable coverage report

use std::fmt;

use super::artifact::ArtifactCheck;
use super::counter::ToolCounts;
use crate::naming::Module;

const RULE: &str = "============================================================";

/// Endpoint and tool counts, skipped endpoints, the module table and the
/// optional artifact comparison
pub struct CoverageReport<'a> {
    pub counts: &'a ToolCounts,
    pub artifact: Option<ArtifactCheck>,
}

impl<'a> CoverageReport<'a> {
    pub fn new(counts: &'a ToolCounts) -> Self {
        Self {
            counts,
            artifact: None,
        }
    }

    pub fn with_artifact(mut self, check: Option<ArtifactCheck>) -> Self {
        self.artifact = check;
        self
    }

    fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{title}")?;
        writeln!(f, "{RULE}")
    }

    fn endpoints(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ep = &self.counts.endpoints;
        Self::heading(f, "ENDPOINT COUNTS")?;
        writeln!(f, "  REST endpoints:      {}", ep.rest)?;
        writeln!(f, "  Stat endpoints:      {}", ep.stat)?;
        writeln!(f, "  Cmd managers:        {} ({} commands)", ep.cmd_managers, ep.cmd_commands)?;
        writeln!(f, "  v2 endpoints:        {}", ep.v2)?;
        writeln!(f, "  Global endpoints:    {}", ep.global)?;
        for (label, count) in [("List", ep.list), ("Guest", ep.guest), ("WebSocket", ep.websocket)] {
            if count > 0 {
                writeln!(f, "  {:<21}{count}  (not yet generating tools)", format!("{label} endpoints:"))?;
            }
        }
        writeln!(f, "  TOTAL endpoints:     {}", ep.total)
    }

    fn tools(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts;
        let t = &counts.tools;
        Self::heading(f, "TOOL COUNTS")?;
        writeln!(f, "  REST tools:          {}", t.rest)?;
        for (name, detail) in &counts.rest_detail {
            writeln!(f, "    {name:<25} → {} tools ({})", detail.tools, detail.class.label())?;
        }
        if !counts.rest_skipped.is_empty() {
            writeln!(f, "  REST skipped:        {} (no naming entry)", counts.rest_skipped.len())?;
            for name in &counts.rest_skipped {
                writeln!(f, "    {name}")?;
            }
        }
        writeln!(f, "  Stat tools:          {}", t.stat)?;
        writeln!(f, "  Cmd tools:           {}", t.cmd)?;
        for (manager, commands) in &counts.cmd_detail {
            writeln!(f, "    {manager:<25} → {} commands", commands.len())?;
        }
        if !counts.cmd_skipped.is_empty() {
            writeln!(f, "  Cmd skipped:         {}", counts.cmd_skipped.join(", "))?;
        }
        writeln!(f, "  v2 tools:            {}", t.v2)?;
        for (name, n) in &counts.v2_detail {
            writeln!(f, "    {name:<25} → {n} tools")?;
        }
        writeln!(f, "  Global tools:        {}", t.global)?;
        writeln!(f, "  Port override:       {}", t.port_override)?;
        writeln!(f, "  Report issue:        {}", t.report_issue)?;
        writeln!(f, "  TOTAL tools:         {}", t.total)?;
        writeln!(f, "  Read-only / mutating: {} / {}", counts.read_only, counts.mutating)
    }

    fn modules(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::heading(f, "MODULES")?;
        writeln!(f, "  {:<10} {:>4} {:>4} {:>9} {:>8}", "module", "v1", "v2", "read-only", "mutating")?;
        for module in Module::ALL {
            let m = self.counts.modules.get(&module).copied().unwrap_or_default();
            writeln!(
                f,
                "  {:<10} {:>4} {:>4} {:>9} {:>8}",
                module.as_str(),
                m.v1,
                m.v2,
                m.read_only,
                m.mutating
            )?;
        }
        writeln!(f, "  {:<10} {:>4}", "always-on", self.counts.always_on)
    }

    fn verification(&self, f: &mut fmt::Formatter<'_>, check: ArtifactCheck) -> fmt::Result {
        Self::heading(f, "VERIFICATION")?;
        match check {
            ArtifactCheck::Match { count } => {
                writeln!(f, "  Computed: {count}  Generated: {count}")?;
                writeln!(f, "  ✓ MATCH")
            }
            ArtifactCheck::Mismatch { expected, actual } => {
                writeln!(f, "  Computed: {expected}  Generated: {actual}")?;
                writeln!(f, "  ✗ MISMATCH (diff: {:+})", check.diff())
            }
        }
    }
}

impl fmt::Display for CoverageReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.endpoints(f)?;
        writeln!(f)?;
        self.tools(f)?;
        writeln!(f)?;
        self.modules(f)?;
        if let Some(check) = self.artifact {
            writeln!(f)?;
            self.verification(f, check)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NamingTables;
    use crate::verification::ToolCounter;
    use serde_json::json;

    fn counts() -> ToolCounts {
        let doc = json!({
            "rest_endpoints": {"networkconf": {"path": "/n"}, "hotspotop": {"path": "/h"}},
            "websocket_endpoints": {"events": {"path": "/wss"}}
        });
        ToolCounter::new(NamingTables::builtin()).count(&doc)
    }

    #[test]
    fn test_report_sections() {
        let counts = counts();
        let text = CoverageReport::new(&counts).to_string();
        assert!(text.contains("ENDPOINT COUNTS"));
        assert!(text.contains("WebSocket endpoints: 1"));
        assert!(text.contains("networkconf"));
        assert!(text.contains("(CRUD)"));
        assert!(text.contains("REST skipped:        1"));
        assert!(text.contains("hotspotop"));
        assert!(!text.contains("VERIFICATION"));
    }

    #[test]
    fn test_report_mismatch() {
        let counts = counts();
        let text = CoverageReport::new(&counts)
            .with_artifact(Some(ArtifactCheck::new(7, 5)))
            .to_string();
        assert!(text.contains("MISMATCH (diff: -2)"));
    }
}
