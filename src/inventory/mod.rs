//! Endpoint inventory loading
//!
//! Parses the declarative endpoint inventory into [`ApiInventory`] and
//! attaches captured sample records per endpoint.

pub mod document;
pub mod loader;
pub mod model;
pub mod samples;

pub use document::{UNTOOLED_CATEGORIES, inventory_from_document, parse_document, parse_methods, read_document};
pub use loader::{FileInventoryLoader, InventoryLoader};
pub use model::{ApiInventory, Endpoint, EndpointCategory, EndpointSource, HttpMethod, SampleRecord};
