//! Infrastructure layer - concrete implementations of the template and output ports

pub mod output;
pub mod templates;

pub use output::FileSystemOutputService;
pub use templates::{FileSystemTemplateLoader, TeraTemplateRenderer};
