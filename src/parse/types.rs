//! Rust types mirroring the canvas's workflow JSON.
//!
//! These types are the serde target for the persisted workflow definition.
//! `type` is kept as a raw string: besides the canonical `TRIGGER`/`ACTION`/
//! `LOGIC` enum values, stored workflows still carry legacy frontend type
//! strings, and category resolution (not deserialization) decides what a
//! node actually is.

use serde::{Deserialize, Serialize};

use crate::category::{self, ConfigMap, NodeCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    /// Open map on purpose: this is the shape-shifting legacy object the
    /// normalizer exists to tame. Readers must treat it as possibly
    /// doubly-nested (`config.config`).
    #[serde(default)]
    pub config: ConfigMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: NodeData,
}

impl WorkflowNode {
    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn config(&self) -> &ConfigMap {
        &self.data.config
    }

    pub fn resolved_category(&self) -> NodeCategory {
        category::resolve_category(&self.node_type, &self.data.config)
    }

    pub fn is_trigger(&self) -> bool {
        self.resolved_category() == NodeCategory::Trigger
    }

    /// Rewrite the stored type string to agree with the resolved category.
    /// Config identity wins over whatever enum or legacy string was stored;
    /// run before persisting so the backend only ever sees canonical values.
    pub fn normalize_type(&mut self) {
        self.node_type = self.resolved_category().as_str().to_string();
    }
}

impl Workflow {
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn trigger_nodes(&self) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes.iter().filter(|n| n.is_trigger())
    }

    /// Canonicalize every node's type string in place.
    pub fn normalize_types(&mut self) {
        for node in &mut self.nodes {
            node.normalize_type();
        }
    }
}
