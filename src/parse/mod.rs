//! Parse phase: JSON → Rust types + graph construction.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::EditorError;

/// Deserialize a workflow JSON string into a `Workflow` struct.
pub fn parse(json: &str) -> Result<Workflow, Vec<EditorError>> {
    serde_json::from_str::<Workflow>(json).map_err(|e| {
        vec![EditorError::parse(
            "P001",
            format!("Failed to parse workflow JSON: {}", e),
        )]
    })
}

/// Deserialize a single node JSON string.
pub fn parse_node(json: &str) -> Result<WorkflowNode, Vec<EditorError>> {
    serde_json::from_str::<WorkflowNode>(json).map_err(|e| {
        vec![EditorError::parse(
            "P001",
            format!("Failed to parse node JSON: {}", e),
        )]
    })
}

/// Parse JSON and build the graph in one step.
pub fn parse_and_build(json: &str) -> Result<(Workflow, WorkflowGraph), Vec<EditorError>> {
    let workflow = parse(json)?;
    let graph = WorkflowGraph::build(&workflow)?;
    Ok((workflow, graph))
}
