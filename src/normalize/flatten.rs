//! Config flattening: collapse the legacy doubly-nested shape and strip
//! metadata-only keys.

use serde_json::Value;

use crate::category::ConfigMap;

/// Keys that never persist: they are form/display metadata, or the nested
/// legacy container itself.
pub const EXCLUDED_KEYS: &[&str] = &["configTemplate", "objectTypeId", "label", "config"];

/// Produce a single flat object of semantically persisted fields.
///
/// At most one level of nested `config` is merged, and only where the
/// flat level lacks the key — outer wins on conflict. Exclusion applies
/// to both levels.
pub fn flatten_config(raw: &ConfigMap) -> ConfigMap {
    let mut flat = ConfigMap::new();

    // Nested values first, so outer inserts overwrite them.
    if let Some(Value::Object(nested)) = raw.get("config") {
        for (key, value) in nested {
            if !EXCLUDED_KEYS.contains(&key.as_str()) {
                flat.insert(key.clone(), value.clone());
            }
        }
    }

    for (key, value) in raw {
        if !EXCLUDED_KEYS.contains(&key.as_str()) {
            flat.insert(key.clone(), value.clone());
        }
    }

    flat
}
