//! Integration tests for workflow validation rules (W001–W006).

use editor_core::error::Severity;
use editor_core::parse;
use editor_core::validate;

fn validate(json: &str) -> Vec<editor_core::error::EditorError> {
    let (workflow, graph) = parse::parse_and_build(json).expect("Should build");
    validate::validate_workflow(&workflow, &graph)
}

#[test]
fn example_workflow_passes() {
    let errors = validate(include_str!("fixtures/example_workflow.json"));
    assert!(errors.is_empty(), "Expected no findings, got: {:?}", errors);
}

#[test]
fn w001_no_trigger() {
    let errors = validate(include_str!("fixtures/no_trigger.json"));
    assert!(
        errors.iter().any(|e| e.code == "W001"),
        "Should flag missing trigger: {:?}",
        errors
    );
    insta::assert_snapshot!(
        errors.iter().find(|e| e.code == "W001").unwrap().to_string(),
        @"[Validate:W001] Workflow must have exactly one trigger node, found 0"
    );
}

#[test]
fn w003_unconnected_node() {
    let errors = validate(include_str!("fixtures/unconnected_node.json"));
    assert!(
        errors
            .iter()
            .any(|e| e.code == "W003" && e.node_id.as_deref() == Some("action-1")),
        "Should flag orphan: {:?}",
        errors
    );
}

#[test]
fn w004_cycle_detection() {
    let errors = validate(include_str!("fixtures/cycle.json"));
    assert!(
        errors.iter().any(|e| e.code == "W004"),
        "Should detect cycle: {:?}",
        errors
    );
}

#[test]
fn w005_missing_registry_identity_blocks_save() {
    let errors = validate(include_str!("fixtures/missing_identity.json"));
    let identity_errors: Vec<_> = errors.iter().filter(|e| e.code == "W005").collect();
    assert_eq!(identity_errors.len(), 2, "Both nodes lack identity: {:?}", errors);
    assert!(identity_errors.iter().all(|e| e.severity == Severity::Error));
    assert!(!validate::is_saveable(&errors));
}

#[test]
fn w006_unresolvable_reference_warns_but_does_not_block() {
    let errors = validate(include_str!("fixtures/bad_reference.json"));
    let reference_warnings: Vec<_> = errors.iter().filter(|e| e.code == "W006").collect();
    assert_eq!(reference_warnings.len(), 1, "got: {:?}", errors);
    assert_eq!(reference_warnings[0].severity, Severity::Warning);
    assert!(reference_warnings[0].message.contains("customerEmail"));
    assert!(validate::is_saveable(&errors));
}

#[test]
fn w006_reference_to_unknown_node_warns() {
    let json = r#"{
        "name": "wf",
        "nodes": [
            {
                "id": "trigger-1",
                "type": "TRIGGER",
                "position": { "x": 0, "y": 0 },
                "data": { "label": "T", "config": { "triggerConfigId": "trg-1" } }
            },
            {
                "id": "action-1",
                "type": "ACTION",
                "position": { "x": 0, "y": 100 },
                "data": {
                    "label": "A",
                    "config": {
                        "registryId": "act-1",
                        "configValues": { "url": "https://x.test/@{ghost.id}" }
                    }
                }
            }
        ],
        "edges": [{ "id": "e1", "source": "trigger-1", "target": "action-1" }]
    }"#;
    let errors = validate(json);
    assert!(
        errors
            .iter()
            .any(|e| e.code == "W006" && e.message.contains("ghost")),
        "got: {:?}",
        errors
    );
}

#[test]
fn builtin_references_are_never_flagged() {
    let json = r#"{
        "name": "wf",
        "nodes": [
            {
                "id": "trigger-1",
                "type": "TRIGGER",
                "position": { "x": 0, "y": 0 },
                "data": { "label": "T", "config": { "triggerConfigId": "trg-1" } }
            },
            {
                "id": "action-1",
                "type": "ACTION",
                "position": { "x": 0, "y": 100 },
                "data": {
                    "label": "A",
                    "config": {
                        "registryId": "act-1",
                        "configValues": { "stamp": "@{_now()} @{_variables.env} @{_metadata}" }
                    }
                }
            }
        ],
        "edges": [{ "id": "e1", "source": "trigger-1", "target": "action-1" }]
    }"#;
    let errors = validate(json);
    assert!(
        !errors.iter().any(|e| e.code == "W006"),
        "Underscore references are not node-addressed: {:?}",
        errors
    );
}
