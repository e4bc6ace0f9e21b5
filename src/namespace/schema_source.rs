//! Where a node's output schema actually lives.
//!
//! Incremental evolution left schemas in three storage locations. The
//! lookup is an ordered list of named strategies, first non-empty hit
//! wins; concluding "no schema" is only allowed after all of them miss on
//! both the flat config and the legacy nested one.

use serde_json::Value;

use crate::category::ConfigMap;
use crate::schema::types::SchemaDefinition;

/// Locate a node's output schemas in its persisted config.
pub fn locate_output_schemas(config: &ConfigMap) -> Option<Vec<SchemaDefinition>> {
    locate_at_level(config).or_else(|| {
        // Configs written before the flatten-at-load migration may still
        // carry a nested `config` object; readers must tolerate it.
        match config.get("config") {
            Some(Value::Object(nested)) => locate_at_level(nested),
            _ => None,
        }
    })
}

fn locate_at_level(config: &ConfigMap) -> Option<Vec<SchemaDefinition>> {
    from_output_schema(config)
        .or_else(|| from_trigger_schemas(config))
        .or_else(|| from_config_template(config))
}

/// Strategy 1: `config.outputSchema` — the current storage location.
fn from_output_schema(config: &ConfigMap) -> Option<Vec<SchemaDefinition>> {
    parse_schemas(config.get("outputSchema"))
}

/// Strategy 2: `config.schemas` — where trigger-registry configs keep them.
fn from_trigger_schemas(config: &ConfigMap) -> Option<Vec<SchemaDefinition>> {
    parse_schemas(config.get("schemas"))
}

/// Strategy 3: `config.configTemplate.outputSchema` — the oldest
/// action-template location.
fn from_config_template(config: &ConfigMap) -> Option<Vec<SchemaDefinition>> {
    match config.get("configTemplate") {
        Some(Value::Object(template)) => parse_schemas(template.get("outputSchema")),
        _ => None,
    }
}

/// A present-but-empty or malformed schema list counts as a miss so the
/// next strategy gets a chance.
fn parse_schemas(value: Option<&Value>) -> Option<Vec<SchemaDefinition>> {
    let value = value?;
    let schemas: Vec<SchemaDefinition> = serde_json::from_value(value.clone()).ok()?;
    if schemas.is_empty() { None } else { Some(schemas) }
}
