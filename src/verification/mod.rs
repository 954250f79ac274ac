//! Count/verification utility
//!
//! Recomputes the expected tool counts straight from the raw inventory
//! document and the naming tables, bypassing the loader model and the
//! context builder, and checks them against each other and against a
//! generated server file.

pub mod artifact;
pub mod consistency;
pub mod counter;
pub mod expected;
pub mod report;

pub use artifact::{ArtifactCheck, count_artifact_tools, count_tool_definitions};
pub use consistency::{VerificationError, compare_with_context, verify_consistency};
pub use counter::{CategoryToolCounts, EndpointCounts, RestCount, ToolCounter, ToolCounts};
pub use expected::{ModuleToolNames, always_on_tools, expected_module_tools, v1_module_tools, v2_module_tools};
pub use report::CoverageReport;
