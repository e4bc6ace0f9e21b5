//! Rust types mirroring the registry's schema JSON.
//!
//! These types are the serde target for trigger/action schema payloads.
//! A `FieldDefinition` may nest arbitrarily deep through `fields`, and a
//! field may point at a *named* object type via its validation block —
//! including a type that is an ancestor of itself.

use serde::{Deserialize, Serialize};

/// Declared type of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Datetime,
    Email,
    Phone,
    Url,
    Json,
    Array,
    Object,
}

impl FieldType {
    /// Container fields carry a nested `fields` list (for `array`, the
    /// shape of one element).
    pub fn is_container(self) -> bool {
        matches!(self, FieldType::Array | FieldType::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Url => "url",
            FieldType::Json => "json",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique within its parent field list.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub default_value: Option<serde_json::Value>,
    pub validation: Option<FieldValidation>,
    /// Present only for object/array fields; defines the nested shape.
    pub fields: Option<Vec<FieldDefinition>>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDefinition {
            name: name.into(),
            field_type,
            required: false,
            display_name: None,
            description: None,
            default_value: None,
            validation: None,
            fields: None,
        }
    }

    pub fn with_fields(
        name: impl Into<String>,
        field_type: FieldType,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        FieldDefinition {
            fields: Some(fields),
            ..FieldDefinition::new(name, field_type)
        }
    }

    /// The id of the named object type this field descends into, if any.
    /// Object fields link via `objectTypeId`, array fields via
    /// `itemObjectTypeId`.
    pub fn linked_type_id(&self) -> Option<&str> {
        let validation = self.validation.as_ref()?;
        match self.field_type {
            FieldType::Object => validation.object_type_id.as_deref(),
            FieldType::Array => validation.item_object_type_id.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
    #[serde(rename = "enum")]
    pub allowed_values: Option<Vec<String>>,
    /// Named type an `object` field resolves through.
    pub object_type_id: Option<String>,
    /// Named element type an `array` field resolves through.
    pub item_object_type_id: Option<String>,
}

/// A node's input or output is an ordered list of these. Ordering matters
/// for display only; resolution ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    /// Identifier, not guaranteed globally unique.
    pub schema_id: String,
    pub event_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    pub filter: Option<SchemaFilter>,
    pub mapping: Option<serde_json::Value>,
}

impl SchemaDefinition {
    pub fn new(schema_id: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        SchemaDefinition {
            schema_id: schema_id.into(),
            event_type: None,
            description: None,
            fields,
            filter: None,
            mapping: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFilter {
    pub field: String,
    pub operator: String,
    pub value: serde_json::Value,
}
