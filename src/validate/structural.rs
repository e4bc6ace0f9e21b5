//! Graph-level structural validation rules (W001–W005).

use petgraph::algo::is_cyclic_directed;

use crate::category::NodeCategory;
use crate::error::EditorError;
use crate::normalize::flatten_config;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Workflow, WorkflowNode};

/// Run all structural rules. Returns all errors found.
pub fn validate_structural(workflow: &Workflow, graph: &WorkflowGraph) -> Vec<EditorError> {
    let mut errors = Vec::new();

    w001_exactly_one_trigger(workflow, &mut errors);
    w002_edges_reference_existing_nodes(workflow, graph, &mut errors);
    w003_nodes_are_connected(workflow, graph, &mut errors);
    w004_no_cycles(graph, &mut errors);

    errors
}

fn w001_exactly_one_trigger(workflow: &Workflow, errors: &mut Vec<EditorError>) {
    let trigger_count = workflow.trigger_nodes().count();
    if trigger_count == 0 {
        errors.push(EditorError::validate(
            "W001",
            "Workflow must have exactly one trigger node, found 0",
            None,
        ));
    } else if trigger_count > 1 {
        errors.push(EditorError::validate(
            "W001",
            format!(
                "Workflow must have exactly one trigger node, found {}",
                trigger_count
            ),
            None,
        ));
    }
}

fn w002_edges_reference_existing_nodes(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    errors: &mut Vec<EditorError>,
) {
    for edge in &workflow.edges {
        if !graph.node_indices.contains_key(&edge.source) {
            errors.push(EditorError::validate(
                "W002",
                format!(
                    "Edge '{}' references unknown source node '{}'",
                    edge.id, edge.source
                ),
                None,
            ));
        }
        if !graph.node_indices.contains_key(&edge.target) {
            errors.push(EditorError::validate(
                "W002",
                format!(
                    "Edge '{}' references unknown target node '{}'",
                    edge.id, edge.target
                ),
                None,
            ));
        }
    }
}

/// Every non-trigger node needs an input connection.
fn w003_nodes_are_connected(
    workflow: &Workflow,
    graph: &WorkflowGraph,
    errors: &mut Vec<EditorError>,
) {
    for node in &workflow.nodes {
        if node.is_trigger() {
            continue;
        }
        if graph.incoming_count(&node.id) == 0 {
            errors.push(EditorError::validate(
                "W003",
                format!("Node \"{}\" is not connected", node.label()),
                Some(node.id.clone()),
            ));
        }
    }
}

fn w004_no_cycles(graph: &WorkflowGraph, errors: &mut Vec<EditorError>) {
    if is_cyclic_directed(&graph.graph) {
        errors.push(EditorError::validate(
            "W004",
            "Workflow graph contains a cycle",
            None,
        ));
    }
}

/// W005: a node structurally expected to carry a registry identity must
/// have one. This is the one config defect that blocks saving — silently
/// persisting it would store a broken reference.
pub fn validate_registry_identity(node: &WorkflowNode) -> Vec<EditorError> {
    let flat = flatten_config(node.config());
    let mut errors = Vec::new();

    match node.resolved_category() {
        NodeCategory::Trigger => {
            if !has_id(&flat, "triggerConfigId") {
                errors.push(EditorError::validate(
                    "W005",
                    format!(
                        "Trigger node '{}' has no trigger registry entry configured",
                        node.label()
                    ),
                    Some(node.id.clone()),
                ));
            }
        }
        NodeCategory::Action => {
            if !has_id(&flat, "registryId") {
                errors.push(EditorError::validate(
                    "W005",
                    format!(
                        "Action node '{}' has no action registry entry configured",
                        node.label()
                    ),
                    Some(node.id.clone()),
                ));
            }
        }
        NodeCategory::Logic => {}
    }

    errors
}

fn has_id(flat: &crate::category::ConfigMap, key: &str) -> bool {
    matches!(flat.get(key), Some(serde_json::Value::String(s)) if !s.is_empty())
}
