//! The live form session for the currently-selected node.
//!
//! Registry defaults are a seed, used only where the form has no entry
//! yet; a default must never overwrite something the user typed, even
//! when the fetch resolves after the edit. Switching nodes resets the
//! session wholesale — transient edits do not survive a deselect/reselect
//! cycle.

use serde_json::Value;

use super::flatten::flatten_config;
use crate::category::ConfigMap;

#[derive(Debug, Default)]
pub struct FormSession {
    node_id: Option<String>,
    values: ConfigMap,
}

impl FormSession {
    pub fn new() -> Self {
        FormSession::default()
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Select a node. Re-selecting the same id keeps in-flight edits;
    /// any other id resets the form from that node's persisted config
    /// (flattened at load, so reads never see the nested legacy shape).
    pub fn select(&mut self, node_id: &str, persisted_config: &ConfigMap) {
        if self.node_id.as_deref() == Some(node_id) {
            return;
        }
        self.node_id = Some(node_id.to_string());
        self.values = flatten_config(persisted_config);
    }

    pub fn deselect(&mut self) {
        self.node_id = None;
        self.values = ConfigMap::new();
    }

    /// A user edit to a top-level config key.
    pub fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// A user edit to one input mapping.
    pub fn set_input_mapping(&mut self, field: &str, source: &str, mapping_type: &str) {
        let mappings = self
            .values
            .entry("inputMappings".to_string())
            .or_insert_with(|| Value::Object(ConfigMap::new()));
        if !mappings.is_object() {
            *mappings = Value::Object(ConfigMap::new());
        }
        if let Some(map) = mappings.as_object_mut() {
            map.insert(
                field.to_string(),
                serde_json::json!({ "source": source, "type": mapping_type }),
            );
        }
    }

    /// Seed registry defaults into the form.
    ///
    /// `fetched_for` is the node id captured when the fetch was issued; a
    /// response arriving after the selection moved on is a stale no-op.
    /// Within a live selection, a default fills a key only when the form
    /// has no entry for it — last applicable intent wins, not last
    /// network response. `inputMappings` is merged per field for the same
    /// reason.
    pub fn seed_defaults(&mut self, fetched_for: &str, defaults: &ConfigMap) {
        if self.node_id.as_deref() != Some(fetched_for) {
            return;
        }

        for (key, value) in defaults {
            if key == "inputMappings" {
                self.seed_input_mappings(value);
                continue;
            }
            if !self.values.contains_key(key) {
                self.values.insert(key.clone(), value.clone());
            }
        }
    }

    fn seed_input_mappings(&mut self, defaults: &Value) {
        let Some(default_mappings) = defaults.as_object() else {
            return;
        };
        let current = self
            .values
            .entry("inputMappings".to_string())
            .or_insert_with(|| Value::Object(ConfigMap::new()));
        let Some(current_mappings) = current.as_object_mut() else {
            return;
        };
        for (field, mapping) in default_mappings {
            if !current_mappings.contains_key(field) {
                current_mappings.insert(field.clone(), mapping.clone());
            }
        }
    }

    /// The form's current state, for normalization and scheduling.
    pub fn values(&self) -> &ConfigMap {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> ConfigMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn late_default_does_not_clobber_user_edit() {
        let mut session = FormSession::new();
        session.select("node-a", &map(json!({ "registryId": "act-1" })));
        session.set_input_mapping("recipient", "@{trigger-1.email}", "email");

        // Registry fetch resolves after the edit.
        session.seed_defaults(
            "node-a",
            &map(json!({
                "inputMappings": { "recipient": { "source": "", "type": "email" } },
                "timeout": 30,
            })),
        );

        let mappings = session.values()["inputMappings"].as_object().unwrap();
        assert_eq!(mappings["recipient"]["source"], json!("@{trigger-1.email}"));
        // Untouched keys are seeded normally.
        assert_eq!(session.values()["timeout"], json!(30));
    }

    #[test]
    fn stale_fetch_for_deselected_node_is_dropped() {
        let mut session = FormSession::new();
        session.select("node-a", &ConfigMap::new());
        session.select("node-b", &ConfigMap::new());

        session.seed_defaults("node-a", &map(json!({ "timeout": 30 })));
        assert!(!session.values().contains_key("timeout"));
    }

    #[test]
    fn reselecting_same_node_keeps_edits() {
        let mut session = FormSession::new();
        session.select("node-a", &map(json!({ "registryId": "act-1" })));
        session.set_value("timeout", json!(99));

        session.select("node-a", &map(json!({ "registryId": "act-1" })));
        assert_eq!(session.values()["timeout"], json!(99));
    }

    #[test]
    fn switching_away_and_back_resets_to_persisted() {
        let persisted_a = map(json!({ "registryId": "act-1", "timeout": 10 }));
        let mut session = FormSession::new();
        session.select("node-a", &persisted_a);
        session.set_value("timeout", json!(99));

        session.select("node-b", &ConfigMap::new());
        session.select("node-a", &persisted_a);
        assert_eq!(session.values()["timeout"], json!(10));
    }

    #[test]
    fn selection_flattens_legacy_nested_config() {
        let mut session = FormSession::new();
        session.select(
            "node-a",
            &map(json!({ "config": { "registryId": "act-1" }, "label": "L" })),
        );
        assert_eq!(session.values()["registryId"], json!("act-1"));
        assert!(!session.values().contains_key("label"));
        assert!(!session.values().contains_key("config"));
    }
}
