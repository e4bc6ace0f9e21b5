use editor_core::parse::types::{NodeData, Position, Workflow, WorkflowEdge, WorkflowNode};
use serde_json::{Value, json};

// =============================================================================
// Workflow builders
// =============================================================================

pub fn workflow(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Workflow {
    Workflow {
        id: Some("wf-test".into()),
        name: "Test Workflow".into(),
        description: None,
        status: Some("draft".into()),
        nodes,
        edges,
    }
}

pub fn node(id: &str, node_type: &str, label: &str, config: Value) -> WorkflowNode {
    WorkflowNode {
        id: id.into(),
        node_type: node_type.into(),
        position: Position { x: 0.0, y: 0.0 },
        data: NodeData {
            label: label.into(),
            config: config.as_object().cloned().unwrap_or_default(),
        },
    }
}

pub fn edge(id: &str, source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_handle: None,
        target_handle: None,
    }
}

// =============================================================================
// Node builders
// =============================================================================

/// Trigger node with an order-created schema stored in the registry
/// location (`config.schemas`).
pub fn order_trigger(id: &str) -> WorkflowNode {
    node(
        id,
        "TRIGGER",
        "Order Created",
        json!({
            "triggerConfigId": "trg-order-created",
            "triggerType": "event",
            "schemas": [{
                "schemaId": "order-created",
                "fields": [
                    { "name": "orderId", "type": "string" },
                    { "name": "amount", "type": "number" },
                    { "name": "customer", "type": "object", "fields": [
                        { "name": "email", "type": "email" },
                        { "name": "name", "type": "string" },
                    ]},
                ],
            }],
        }),
    )
}

/// Action node with an output schema in the current location
/// (`config.outputSchema`).
pub fn email_action(id: &str) -> WorkflowNode {
    node(
        id,
        "ACTION",
        "Send Email",
        json!({
            "registryId": "act-send-email",
            "outputSchema": [{
                "schemaId": "send-email-result",
                "fields": [
                    { "name": "messageId", "type": "string" },
                    { "name": "status", "type": "string" },
                ],
            }],
        }),
    )
}

/// Logic node with no schema anywhere.
pub fn bare_logic(id: &str) -> WorkflowNode {
    node(id, "LOGIC", "Condition", json!({ "combineWith": "and" }))
}
