//! Naming and classification tables
//!
//! Maps raw endpoint identifiers to tool-name fragments, REST
//! classifications, command metadata and module tags. The tables are an
//! immutable value built once and passed by reference to every consumer.

mod builtin;
pub mod classify;
pub mod module;
pub mod tables;

pub use classify::{Operation, RestClass};
pub use module::Module;
pub use tables::{CommandKey, NamePair, NamingTables, StatOverride};
