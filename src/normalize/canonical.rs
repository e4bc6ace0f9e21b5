//! Canonical persisted config shapes, one per node category.
//!
//! The open-map config is collapsed into a tagged union exactly once, at
//! the persistence boundary. Unknown keys from form state are dropped,
//! not merged — incidental widget state must never leak into storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::category::{ConfigMap, NodeCategory};
use crate::schema::types::SchemaDefinition;

/// The one blocking error class in this subsystem: a node that is
/// structurally expected to carry a registry identity but doesn't.
/// Silent fallback here would persist a broken reference.
#[derive(Debug, Clone, Error)]
pub enum NormalizeError {
    #[error("{category} node '{node_id}' has no {id_field} configured")]
    MissingRegistryIdentity {
        node_id: String,
        category: NodeCategory,
        id_field: &'static str,
    },
}

/// A single field mapping persisted under `inputMappings`/`outputMapping`,
/// keyed by destination field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// A context-variable token or a literal static value.
    pub source: String,
    /// Expected field type.
    #[serde(rename = "type")]
    pub mapping_type: String,
}

/// Canonical persisted config for a TRIGGER node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    pub trigger_config_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<SchemaDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_config: Option<ConfigMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_values: Option<ConfigMap>,
}

/// Canonical persisted config for a registry-backed ACTION node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    pub registry_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_values: Option<ConfigMap>,
    /// BTreeMap for deterministic serialization of persisted mappings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_mappings: Option<BTreeMap<String, FieldMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_mapping: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Vec<SchemaDefinition>>,
}

#[derive(Debug, Clone)]
pub enum CanonicalConfig {
    Trigger(TriggerConfig),
    Action(ActionConfig),
    /// Logic nodes have no registry identity; their flattened config
    /// passes through as-is.
    Logic(ConfigMap),
}

impl CanonicalConfig {
    pub fn category(&self) -> NodeCategory {
        match self {
            CanonicalConfig::Trigger(_) => NodeCategory::Trigger,
            CanonicalConfig::Action(_) => NodeCategory::Action,
            CanonicalConfig::Logic(_) => NodeCategory::Logic,
        }
    }

    /// The flat object written into the node's persisted `data.config`.
    pub fn to_map(&self) -> ConfigMap {
        match self {
            CanonicalConfig::Trigger(cfg) => object_of(cfg),
            CanonicalConfig::Action(cfg) => object_of(cfg),
            CanonicalConfig::Logic(map) => map.clone(),
        }
    }
}

fn object_of<T: Serialize>(value: &T) -> ConfigMap {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => ConfigMap::new(),
    }
}

/// Collapse an already-flattened config into the canonical shape for the
/// given category.
pub fn canonicalize(
    category: NodeCategory,
    flat: ConfigMap,
    node_id: &str,
) -> Result<CanonicalConfig, NormalizeError> {
    match category {
        NodeCategory::Trigger => {
            let trigger_config_id = required_id(&flat, "triggerConfigId").ok_or_else(|| {
                NormalizeError::MissingRegistryIdentity {
                    node_id: node_id.to_string(),
                    category,
                    id_field: "triggerConfigId",
                }
            })?;
            Ok(CanonicalConfig::Trigger(TriggerConfig {
                trigger_config_id,
                trigger_type: string_field(&flat, "triggerType"),
                schemas: typed_field(&flat, "schemas"),
                instance_config: typed_field(&flat, "instanceConfig"),
                config_values: typed_field(&flat, "configValues"),
            }))
        }
        NodeCategory::Action => {
            let registry_id = required_id(&flat, "registryId").ok_or_else(|| {
                NormalizeError::MissingRegistryIdentity {
                    node_id: node_id.to_string(),
                    category,
                    id_field: "registryId",
                }
            })?;
            Ok(CanonicalConfig::Action(ActionConfig {
                registry_id,
                config_values: typed_field(&flat, "configValues"),
                input_mappings: typed_field(&flat, "inputMappings"),
                output_mapping: typed_field(&flat, "outputMapping"),
                output_schema: typed_field(&flat, "outputSchema"),
            }))
        }
        NodeCategory::Logic => Ok(CanonicalConfig::Logic(flat)),
    }
}

fn required_id(flat: &ConfigMap, key: &str) -> Option<String> {
    match flat.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn string_field(flat: &ConfigMap, key: &str) -> Option<String> {
    match flat.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// A present-but-malformed value degrades to absent rather than failing
/// the save.
fn typed_field<T: serde::de::DeserializeOwned>(flat: &ConfigMap, key: &str) -> Option<T> {
    flat.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}
