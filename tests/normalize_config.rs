//! Integration tests for config normalization, the form session, and the
//! debounced write path.

mod helpers;

use editor_core::category::ConfigMap;
use editor_core::normalize::{
    CanonicalConfig, FormSession, WriteScheduler, normalize_config, normalize_node,
};
use helpers::*;
use serde_json::json;

fn map(value: serde_json::Value) -> ConfigMap {
    value.as_object().unwrap().clone()
}

#[test]
fn action_flattening_strips_metadata_without_duplication() {
    let raw = map(json!({
        "config": { "registryId": "x" },
        "registryId": "x",
        "configTemplate": { "outputSchema": [] },
        "label": "L",
    }));
    let canonical = normalize_config("ACTION", &raw, "node-1").unwrap();
    assert_eq!(canonical.to_map(), map(json!({ "registryId": "x" })));
}

#[test]
fn identity_buried_in_nested_config_still_counts() {
    let raw = map(json!({ "config": { "triggerConfigId": "trg-1" } }));
    let canonical = normalize_config("TRIGGER", &raw, "node-1").unwrap();
    let CanonicalConfig::Trigger(trigger) = canonical else {
        panic!("expected trigger config");
    };
    assert_eq!(trigger.trigger_config_id, "trg-1");
}

#[test]
fn trigger_keeps_only_canonical_keys() {
    let raw = map(json!({
        "triggerConfigId": "trg-1",
        "triggerType": "event",
        "instanceConfig": { "topic": "orders" },
        "selectedPanel": "schemas",
        "draftText": "@{",
    }));
    let persisted = normalize_config("TRIGGER", &raw, "node-1").unwrap().to_map();
    assert_eq!(
        persisted,
        map(json!({
            "triggerConfigId": "trg-1",
            "triggerType": "event",
            "instanceConfig": { "topic": "orders" },
        }))
    );
}

#[test]
fn missing_identity_is_the_blocking_error() {
    let raw = map(json!({ "triggerType": "event" }));
    let err = normalize_config("TRIGGER", &raw, "node-7").unwrap_err();
    assert!(err.to_string().contains("node-7"));
}

#[test]
fn normalize_node_rewrites_config_and_type() {
    let mut node = node(
        "action-1",
        "api-trigger",
        "Send Email",
        json!({
            "config": { "registryId": "act-send-email" },
            "label": "Send Email",
            "configValues": { "subject": "hi" },
        }),
    );
    normalize_node(&mut node).unwrap();
    assert_eq!(node.node_type, "ACTION");
    assert_eq!(
        node.data.config,
        map(json!({
            "registryId": "act-send-email",
            "configValues": { "subject": "hi" },
        }))
    );
}

#[test]
fn logic_config_is_passed_through_flattened() {
    let mut node = bare_logic("condition-1");
    normalize_node(&mut node).unwrap();
    assert_eq!(node.data.config, map(json!({ "combineWith": "and" })));
}

// =============================================================================
// Edit preservation across the session + scheduler + registry fetch cycle
// =============================================================================

#[test]
fn user_edit_survives_late_registry_default_then_persists_once() {
    let mut session = FormSession::new();
    let mut scheduler = WriteScheduler::new();

    // Select node A and start typing a mapping.
    session.select("node-a", &map(json!({ "registryId": "act-send-email" })));
    session.set_input_mapping("recipient", "@{trigger-1.customer.email}", "email");
    scheduler.schedule("node-a", session.values().clone(), 1_000);

    // Keystroke burst: each change reschedules with the latest state.
    session.set_value("configValues", json!({ "subject": "Order!" }));
    scheduler.schedule("node-a", session.values().clone(), 1_100);

    // The registry fetch resolves mid-edit with a default for the same
    // mapping; it must seed around the user's entry, not over it.
    session.seed_defaults(
        "node-a",
        &map(json!({
            "inputMappings": { "recipient": { "source": "", "type": "email" } },
            "timeout": 30,
        })),
    );

    // Only the coalesced write fires, with the user's mapping intact.
    assert!(scheduler.poll(1_200, Some("node-a")).is_none());
    let write = scheduler.poll(1_400, Some("node-a")).unwrap();
    assert_eq!(write.node_id, "node-a");
    assert_eq!(
        write.config["inputMappings"]["recipient"]["source"],
        json!("@{trigger-1.customer.email}")
    );

    // The persisted shape drops nothing the user owns.
    let canonical = normalize_config("ACTION", &write.config, "node-a").unwrap();
    let persisted = canonical.to_map();
    assert_eq!(
        persisted["inputMappings"]["recipient"]["source"],
        json!("@{trigger-1.customer.email}")
    );
}

#[test]
fn switching_selection_voids_the_pending_write_and_the_transient_edit() {
    let persisted_a = map(json!({ "registryId": "act-1", "configValues": { "subject": "old" } }));
    let mut session = FormSession::new();
    let mut scheduler = WriteScheduler::new();

    session.select("node-a", &persisted_a);
    session.set_value("configValues", json!({ "subject": "draft" }));
    scheduler.schedule("node-a", session.values().clone(), 0);

    // User switches before the window elapses.
    session.select("node-b", &map(json!({ "registryId": "act-2" })));

    // The stale timer fires against the new selection: no-op.
    assert!(scheduler.poll(500, Some("node-b")).is_none());

    // Coming back to A resets from persisted state, not the draft.
    session.select("node-a", &persisted_a);
    assert_eq!(session.values()["configValues"]["subject"], json!("old"));
}
