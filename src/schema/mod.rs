//! Schema inference over captured sample records

pub mod field;
pub mod inference;

pub use field::{FieldDescriptor, FieldType};
pub use inference::{MAX_ENUM_VALUES, infer_schema, is_enum_candidate, is_read_only, looks_like_instance_value};
