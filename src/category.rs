//! Node category resolution from a prioritized signal set.
//!
//! Several generations of the editor identified nodes differently: config
//! identity ids (current), the canonical backend enum, and frontend-only
//! type strings (legacy). Every caller across the editor must agree on the
//! answer for the same `(nodeType, config)` pair, so the priority order
//! lives here as one ordered rule list and nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ConfigMap = Map<String, Value>;

/// The canonical backend node category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeCategory {
    Trigger,
    Action,
    Logic,
}

impl NodeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeCategory::Trigger => "TRIGGER",
            NodeCategory::Action => "ACTION",
            NodeCategory::Logic => "LOGIC",
        }
    }

    pub fn from_enum_str(s: &str) -> Option<NodeCategory> {
        match s {
            "TRIGGER" => Some(NodeCategory::Trigger),
            "ACTION" => Some(NodeCategory::Action),
            "LOGIC" => Some(NodeCategory::Logic),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-registry frontend type strings and the category each one meant.
const LEGACY_TYPE_MAP: &[(&str, NodeCategory)] = &[
    ("api-trigger", NodeCategory::Trigger),
    ("schedule-trigger", NodeCategory::Trigger),
    ("file-trigger", NodeCategory::Trigger),
    ("event-trigger", NodeCategory::Trigger),
    ("send-email", NodeCategory::Action),
    ("send-sms", NodeCategory::Action),
    ("send-push", NodeCategory::Action),
    ("send-in-app", NodeCategory::Action),
    ("send-slack", NodeCategory::Action),
    ("send-discord", NodeCategory::Action),
    ("send-teams", NodeCategory::Action),
    ("send-webhook", NodeCategory::Action),
    ("condition", NodeCategory::Logic),
    ("switch", NodeCategory::Logic),
    ("loop", NodeCategory::Logic),
    ("delay", NodeCategory::Logic),
    ("merge", NodeCategory::Logic),
    ("ab-test", NodeCategory::Logic),
    ("wait-events", NodeCategory::Logic),
    // Data nodes fold into LOGIC; the canonical enum has no DATA.
    ("map", NodeCategory::Logic),
    ("filter", NodeCategory::Logic),
    ("transform", NodeCategory::Logic),
    ("read-file", NodeCategory::Logic),
];

/// Resolve a node's category. Pure and idempotent; rules are evaluated in
/// order and the first match wins.
pub fn resolve_category(node_type: &str, config: &ConfigMap) -> NodeCategory {
    rule_trigger_config_id(node_type, config)
        .or_else(|| rule_registry_id(node_type, config))
        .or_else(|| rule_canonical_enum(node_type, config))
        .or_else(|| rule_legacy_type(node_type, config))
        .unwrap_or(NodeCategory::Logic)
}

/// Rule 1: `config.triggerConfigId` present marks a trigger, whatever the
/// type string says.
fn rule_trigger_config_id(_node_type: &str, config: &ConfigMap) -> Option<NodeCategory> {
    value_present(config.get("triggerConfigId")).then_some(NodeCategory::Trigger)
}

/// Rule 2: `config.registryId` (without a trigger id) marks an action.
fn rule_registry_id(_node_type: &str, config: &ConfigMap) -> Option<NodeCategory> {
    value_present(config.get("registryId")).then_some(NodeCategory::Action)
}

/// Rule 3: the canonical backend enum value.
fn rule_canonical_enum(node_type: &str, _config: &ConfigMap) -> Option<NodeCategory> {
    NodeCategory::from_enum_str(node_type)
}

/// Rule 4: legacy frontend-only type strings.
fn rule_legacy_type(node_type: &str, _config: &ConfigMap) -> Option<NodeCategory> {
    LEGACY_TYPE_MAP
        .iter()
        .find(|(legacy, _)| *legacy == node_type)
        .map(|(_, category)| *category)
}

/// A config id counts as present only when non-null and, for strings,
/// non-empty. Empty strings are left behind by cleared form fields.
fn value_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

pub fn is_trigger(node_type: &str, config: &ConfigMap) -> bool {
    resolve_category(node_type, config) == NodeCategory::Trigger
}

pub fn is_action(node_type: &str, config: &ConfigMap) -> bool {
    resolve_category(node_type, config) == NodeCategory::Action
}

pub fn is_logic(node_type: &str, config: &ConfigMap) -> bool {
    resolve_category(node_type, config) == NodeCategory::Logic
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(pairs: &[(&str, Value)]) -> ConfigMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn trigger_config_id_wins_over_everything() {
        let cfg = config(&[
            ("triggerConfigId", json!("trg-1")),
            ("registryId", json!("act-1")),
        ]);
        assert_eq!(resolve_category("ACTION", &cfg), NodeCategory::Trigger);
        assert_eq!(resolve_category("send-email", &cfg), NodeCategory::Trigger);
    }

    #[test]
    fn registry_id_marks_action() {
        let cfg = config(&[("registryId", json!("act-1"))]);
        assert_eq!(resolve_category("LOGIC", &cfg), NodeCategory::Action);
    }

    #[test]
    fn canonical_enum_used_without_config_ids() {
        let empty = ConfigMap::new();
        assert_eq!(resolve_category("TRIGGER", &empty), NodeCategory::Trigger);
        assert_eq!(resolve_category("ACTION", &empty), NodeCategory::Action);
        assert_eq!(resolve_category("LOGIC", &empty), NodeCategory::Logic);
    }

    #[test]
    fn legacy_strings_map_to_their_category() {
        let empty = ConfigMap::new();
        assert_eq!(
            resolve_category("schedule-trigger", &empty),
            NodeCategory::Trigger
        );
        assert_eq!(resolve_category("send-slack", &empty), NodeCategory::Action);
        assert_eq!(resolve_category("condition", &empty), NodeCategory::Logic);
        assert_eq!(resolve_category("transform", &empty), NodeCategory::Logic);
    }

    #[test]
    fn unknown_type_defaults_to_logic() {
        assert_eq!(
            resolve_category("mystery-node", &ConfigMap::new()),
            NodeCategory::Logic
        );
    }

    #[test]
    fn empty_or_null_ids_do_not_count() {
        let cfg = config(&[("triggerConfigId", json!("")), ("registryId", json!(null))]);
        assert_eq!(resolve_category("LOGIC", &cfg), NodeCategory::Logic);
    }

    #[test]
    fn resolution_is_idempotent() {
        let cfg = config(&[("triggerConfigId", json!("trg-9"))]);
        let first = resolve_category("event-trigger", &cfg);
        for _ in 0..10 {
            assert_eq!(resolve_category("event-trigger", &cfg), first);
        }
    }
}
