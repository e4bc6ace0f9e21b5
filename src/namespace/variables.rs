//! Context variables: the addressable tokens a user can embed in node
//! configuration.

use serde::{Deserialize, Serialize};

use crate::schema::types::FieldType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableCategory {
    Trigger,
    Node,
    Variable,
    Metadata,
    Builtin,
}

/// Display order of groups in the autocomplete list.
pub const GROUP_ORDER: [VariableCategory; 5] = [
    VariableCategory::Trigger,
    VariableCategory::Node,
    VariableCategory::Variable,
    VariableCategory::Metadata,
    VariableCategory::Builtin,
];

/// One addressable value. Ephemeral — recomputed on every namespace
/// rebuild, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextVariable {
    /// The literal reference token, e.g. `@{node-1.orderId}`.
    pub value: String,
    pub label: String,
    pub description: String,
    pub category: VariableCategory,
    pub node_id: Option<String>,
    pub field_path: Option<String>,
    pub field_type: Option<FieldType>,
}

impl ContextVariable {
    /// Case-insensitive substring match over label, token and description.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.label.to_lowercase().contains(query_lower)
            || self.value.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
    }
}

/// How tokens are rendered. Expression editors embed `@{…}` references in
/// free text; the context field selector stores bare `_nodeOutputs.` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStyle {
    #[default]
    Expression,
    Path,
}

impl TokenStyle {
    /// Token for a node output field; `field_path` of `None` addresses the
    /// node's entire payload.
    pub fn node_token(self, node_id: &str, field_path: Option<&str>) -> String {
        match (self, field_path) {
            (TokenStyle::Expression, Some(path)) => format!("@{{{node_id}.{path}}}"),
            (TokenStyle::Expression, None) => format!("@{{{node_id}}}"),
            (TokenStyle::Path, Some(path)) => format!("_nodeOutputs.{node_id}.{path}"),
            (TokenStyle::Path, None) => format!("_nodeOutputs.{node_id}"),
        }
    }

    pub fn variables_token(self, name: Option<&str>) -> String {
        match (self, name) {
            (TokenStyle::Expression, Some(name)) => format!("@{{_variables.{name}}}"),
            (TokenStyle::Expression, None) => "@{_variables}".to_string(),
            (TokenStyle::Path, Some(name)) => format!("_variables.{name}"),
            (TokenStyle::Path, None) => "variables".to_string(),
        }
    }

    pub fn metadata_token(self) -> String {
        match self {
            TokenStyle::Expression => "@{_metadata}".to_string(),
            TokenStyle::Path => "_metadata".to_string(),
        }
    }

    pub fn builtin_token(self, call: &str) -> String {
        match self {
            TokenStyle::Expression => format!("@{{{call}}}"),
            TokenStyle::Path => call.to_string(),
        }
    }
}

/// Zero-argument builtin functions available in every expression.
pub const BUILTIN_FUNCTIONS: &[(&str, &str)] = &[
    ("_now()", "Current timestamp in milliseconds"),
    ("_uuid()", "Generate a UUID"),
    ("_random()", "Random number between 0 and 1"),
    ("_timestamp()", "Current timestamp in seconds"),
];
