//! Per-module tool counts

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::descriptor::{ApiVersion, ToolDescriptor};
use crate::naming::Module;

/// Tools of one module, split by API generation and by mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCount {
    pub v1: usize,
    pub v2: usize,
    pub read_only: usize,
    pub mutating: usize,
}

impl ModuleCount {
    pub fn total(&self) -> usize {
        self.v1 + self.v2
    }

    /// Record one tool
    pub fn add(&mut self, api_version: ApiVersion, is_mutation: bool) {
        match api_version {
            ApiVersion::V1 => self.v1 += 1,
            ApiVersion::V2 => self.v2 += 1,
        }
        if is_mutation {
            self.mutating += 1;
        } else {
            self.read_only += 1;
        }
    }
}

/// Every module in canonical order, zero-filled
pub fn empty_module_counts() -> BTreeMap<Module, ModuleCount> {
    Module::ALL
        .into_iter()
        .map(|m| (m, ModuleCount::default()))
        .collect()
}

/// Tally module-tagged descriptors; always-on tools are left out
pub fn module_counts(tools: &[ToolDescriptor]) -> BTreeMap<Module, ModuleCount> {
    let mut counts = empty_module_counts();
    for tool in tools {
        if let Some(module) = tool.module {
            counts
                .entry(module)
                .or_default()
                .add(tool.api_version, tool.is_mutation);
        }
    }
    counts
}
