//! Field descriptors produced by schema inference

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Primitive type observed for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Object,
}

impl FieldType {
    /// Classify a JSON value. Booleans are checked before numbers so they
    /// are never reported as integers.
    pub fn of(value: &JsonValue) -> Option<FieldType> {
        match value {
            JsonValue::Null => None,
            JsonValue::Bool(_) => Some(FieldType::Boolean),
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => Some(FieldType::Integer),
            JsonValue::Number(_) => Some(FieldType::Float),
            JsonValue::Array(_) => Some(FieldType::List),
            JsonValue::Object(_) => Some(FieldType::Object),
            JsonValue::String(_) => Some(FieldType::String),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::List => "list",
            FieldType::Object => "object",
        }
    }

    /// Annotation used in the generated Python signatures
    pub fn python_annotation(&self) -> &'static str {
        match self {
            FieldType::String => "str",
            FieldType::Integer => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "bool",
            FieldType::List => "list",
            FieldType::Object => "dict",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inferred description of one field across an endpoint's samples.
///
/// `read_only`, `common` and `enum_values` are always derived, never read
/// from input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub annotation: String,
    pub read_only: bool,
    /// Present in every sample record
    pub common: bool,
    /// Closed vocabulary observed for string fields, sorted; empty otherwise
    pub enum_values: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            annotation: field_type.python_annotation().to_string(),
            read_only: false,
            common: false,
            enum_values: Vec::new(),
        }
    }

    pub fn has_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }
}
