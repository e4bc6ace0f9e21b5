//! Workflow-level validation (pre-save).
//!
//! Structural rules block saving; reference rules only warn, because a
//! missing schema must never take the editor down with it.

pub mod references;
pub mod structural;

use crate::error::EditorError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{Workflow, WorkflowNode};

/// Run every validation rule over the workflow. Errors block persisting;
/// warnings do not.
pub fn validate_workflow(workflow: &Workflow, graph: &WorkflowGraph) -> Vec<EditorError> {
    let mut errors = structural::validate_structural(workflow, graph);

    for node in &workflow.nodes {
        errors.extend(validate_node(node));
    }

    errors.extend(references::validate_references(workflow));
    errors
}

/// Validate a single node's configuration.
pub fn validate_node(node: &WorkflowNode) -> Vec<EditorError> {
    structural::validate_registry_identity(node)
}

/// True when nothing blocking was found.
pub fn is_saveable(errors: &[EditorError]) -> bool {
    !errors.iter().any(|e| e.is_blocking())
}
