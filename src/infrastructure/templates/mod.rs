//! Template bundles: a `manifest.yml`, the Tera sources it names, and the
//! renderer that turns them into artifacts.

pub mod filesystem_loader;
pub mod manifest;
pub mod renderer;
pub mod traits;
pub mod types;

pub use filesystem_loader::FileSystemTemplateLoader;
pub use manifest::parse_manifest_yaml;
pub use renderer::TeraTemplateRenderer;
pub use traits::{TemplateLoader, TemplateRenderer};
pub use types::{ManifestFile, TemplateBundle, TemplateFile, TemplateManifest};
