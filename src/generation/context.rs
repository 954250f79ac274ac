//! Render context handed to the template layer

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::core::error::Result;

/// Template data as one JSON object plus named variables.
///
/// Variables are mirrored into `data` so templates see a single namespace.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub data: JsonValue,
    pub variables: BTreeMap<String, JsonValue>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            data: JsonValue::Object(serde_json::Map::new()),
            variables: BTreeMap::new(),
        }
    }

    /// Build a context whose top-level keys are the fields of `value`
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let mut context = Self::new();
        if let JsonValue::Object(map) = serde_json::to_value(value)? {
            for (key, value) in map {
                context.add_variable(&key, value);
            }
        }
        Ok(context)
    }

    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        if let Some(obj) = self.data.as_object_mut() {
            obj.insert(key.to_string(), value.clone());
        }
        self.variables.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn to_tera_context(&self) -> Result<tera::Context> {
        Ok(tera::Context::from_value(self.data.clone())?)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A rendered file, with its path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}
