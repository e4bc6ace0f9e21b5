//! Field-reference validation (W006).
//!
//! Walks every string value in every node config, extracts well-formed
//! `@{…}` tokens, and checks node-addressed ones against the referenced
//! node's located output schema. Everything here is a warning: a node
//! without a schema simply cannot be checked, and an opaque reference is
//! the documented degradation, not a defect.

use serde_json::Value;

use crate::error::EditorError;
use crate::expression::template::references;
use crate::namespace::schema_source::locate_output_schemas;
use crate::parse::types::{Workflow, WorkflowNode};
use crate::schema::traverse::get_field_by_path;

pub fn validate_references(workflow: &Workflow) -> Vec<EditorError> {
    let mut warnings = Vec::new();
    for node in &workflow.nodes {
        for text in config_strings(node) {
            for token in references(&text) {
                check_reference(workflow, node, &token, &mut warnings);
            }
        }
    }
    warnings
}

/// Every string value reachable in the node's config, nested included.
fn config_strings(node: &WorkflowNode) -> Vec<String> {
    let mut out = Vec::new();
    for value in node.config().values() {
        collect_strings(value, &mut out);
    }
    out
}

fn collect_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}

fn check_reference(
    workflow: &Workflow,
    node: &WorkflowNode,
    token: &str,
    warnings: &mut Vec<EditorError>,
) {
    // Builtins, variables, metadata and trigger aliases all start with
    // `_` and are not node-addressed.
    if token.starts_with('_') || token.is_empty() {
        return;
    }

    let (target_id, field_path) = match token.find('.') {
        Some(pos) => (&token[..pos], &token[pos + 1..]),
        None => (token, ""),
    };

    let Some(target) = workflow.node(target_id) else {
        warnings.push(EditorError::warning(
            "W006",
            format!(
                "Reference '@{{{token}}}' points at unknown node '{target_id}'"
            ),
            Some(node.id.clone()),
        ));
        return;
    };

    // Whole-payload reference: always fine.
    if field_path.is_empty() {
        return;
    }

    // No schema located means nothing to check against — degrade silently.
    let Some(schemas) = locate_output_schemas(target.config()) else {
        return;
    };

    if get_field_by_path(&schemas, field_path).is_none() {
        warnings.push(EditorError::warning(
            "W006",
            format!(
                "Reference '@{{{token}}}' does not match any field of node '{}'",
                target.label()
            ),
            Some(node.id.clone()),
        ));
    }
}
