//! REST classification and per-verb tool naming

use serde::Serialize;

use crate::inventory::HttpMethod;

/// The tool-producing operations of a REST or v2 resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Patch,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Patch => "patch",
            Operation::Delete => "delete",
        }
    }

    pub fn is_mutating(&self) -> bool {
        !matches!(self, Operation::List | Operation::Get)
    }

    /// List tools are named after the plural noun, everything else the singular
    pub fn uses_plural(&self) -> bool {
        matches!(self, Operation::List)
    }

    /// HTTP verb a REST tool of this operation issues
    pub fn rest_method(&self) -> HttpMethod {
        match self {
            Operation::List | Operation::Get => HttpMethod::Get,
            Operation::Create => HttpMethod::Post,
            Operation::Update => HttpMethod::Put,
            Operation::Patch => HttpMethod::Patch,
            Operation::Delete => HttpMethod::Delete,
        }
    }

    /// The single v2 operation a declared verb produces
    pub fn for_v2_method(method: HttpMethod) -> Operation {
        match method {
            HttpMethod::Get => Operation::List,
            HttpMethod::Post => Operation::Create,
            HttpMethod::Put => Operation::Update,
            HttpMethod::Patch => Operation::Patch,
            HttpMethod::Delete => Operation::Delete,
        }
    }
}

/// Outcome of classifying a REST resource against the naming tables.
///
/// `Unclassified` resources produce no tools and are reported as skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RestClass {
    Setting,
    ReadOnly,
    Crud { deletable: bool },
    Unclassified,
}

impl RestClass {
    /// Operations generated for this class, in rendering order
    pub fn operations(&self) -> &'static [Operation] {
        match self {
            RestClass::Setting => &[Operation::List, Operation::Get, Operation::Update],
            RestClass::ReadOnly => &[Operation::List],
            RestClass::Crud { deletable: true } => &[
                Operation::List,
                Operation::Get,
                Operation::Create,
                Operation::Update,
                Operation::Delete,
            ],
            RestClass::Crud { deletable: false } => &[
                Operation::List,
                Operation::Get,
                Operation::Create,
                Operation::Update,
            ],
            RestClass::Unclassified => &[],
        }
    }

    pub fn tool_count(&self) -> usize {
        self.operations().len()
    }

    pub fn is_crud(&self) -> bool {
        matches!(self, RestClass::Crud { .. })
    }

    pub fn is_generated(&self) -> bool {
        !matches!(self, RestClass::Unclassified)
    }

    /// Short label used in coverage reports
    pub fn label(&self) -> &'static str {
        match self {
            RestClass::Setting => "settings",
            RestClass::ReadOnly => "read-only",
            RestClass::Crud { deletable: true } => "CRUD",
            RestClass::Crud { deletable: false } => "CRUD, no delete",
            RestClass::Unclassified => "skipped",
        }
    }
}
