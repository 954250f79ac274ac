//! Generation domain: turns a loaded inventory into a renderable context
//!
//! [`ServerContextBuilder`] combines the inventory, schema inference and the
//! naming tables into per-category entries, a flat list of
//! [`ToolDescriptor`]s and the aggregate counts the templates print.

pub mod builder;
pub mod context;
pub mod counts;
pub mod descriptor;
pub mod utils;

pub use builder::{DEFAULT_NETWORK_PLACEHOLDER, ServerContext, ServerContextBuilder};
pub use context::{Artifact, RenderContext};
pub use counts::{ModuleCount, empty_module_counts, module_counts};
pub use descriptor::{
    ApiVersion, CommandEntry, GlobalEntry, RestEntry, StatEntry, ToolDescriptor, ToolSource,
    V2Entry, WritableField,
};
