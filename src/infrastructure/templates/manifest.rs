//! Manifest parsing

use std::collections::BTreeSet;

use super::types::TemplateManifest;
use crate::core::error::{Error, Result};

/// Parse and validate manifest YAML
pub fn parse_manifest_yaml(content: &str) -> Result<TemplateManifest> {
    let manifest: TemplateManifest = serde_yaml::from_str(content)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &TemplateManifest) -> Result<()> {
    if manifest.files.is_empty() {
        return Err(Error::template(format!(
            "Manifest '{}' lists no files",
            manifest.name
        )));
    }

    let mut seen = BTreeSet::new();
    for file in &manifest.files {
        if file.source.trim().is_empty() || file.destination.trim().is_empty() {
            return Err(Error::template(format!(
                "Manifest '{}' has an entry with an empty source or destination",
                manifest.name
            )));
        }
        // a per-item destination is expected to vary with the item
        if file.for_each.is_none() && !seen.insert(file.destination.as_str()) {
            return Err(Error::template(format!(
                "Duplicate destination '{}' in manifest '{}'",
                file.destination, manifest.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let yaml = r#"
name: fastmcp
description: FastMCP server
files:
  - source: server.py.tera
    destination: server.py
  - source: test_resource.py.tera
    destination: "tests/test_{{ item.file_stem }}.py"
    for_each: generated_rest_tools
"#;
        let manifest = parse_manifest_yaml(yaml).unwrap();
        assert_eq!(manifest.name, "fastmcp");
        assert_eq!(manifest.version, "0.1.0");
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[0].for_each, None);
        assert_eq!(
            manifest.files[1].for_each.as_deref(),
            Some("generated_rest_tools")
        );
    }

    #[test]
    fn test_empty_manifest_rejected() {
        let err = parse_manifest_yaml("name: empty\nfiles: []\n").unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_duplicate_destination_rejected() {
        let yaml = r#"
name: dup
files:
  - source: a.tera
    destination: server.py
  - source: b.tera
    destination: server.py
"#;
        let err = parse_manifest_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate destination"));
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let err = parse_manifest_yaml("name: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }
}
