//! petgraph-based directed graph wrapper for the visual workflow.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};

use super::types::Workflow;
use crate::error::EditorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

#[derive(Debug)]
pub struct WorkflowGraph {
    pub graph: DiGraph<String, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl WorkflowGraph {
    pub fn build(workflow: &Workflow) -> Result<Self, Vec<EditorError>> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut errors = Vec::new();

        for node in &workflow.nodes {
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        for edge in &workflow.edges {
            let source_idx = node_indices.get(&edge.source);
            let target_idx = node_indices.get(&edge.target);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        EdgeLabel {
                            source_handle: edge.source_handle.clone(),
                            target_handle: edge.target_handle.clone(),
                        },
                    );
                }
                (None, _) => {
                    errors.push(EditorError::parse(
                        "P002",
                        format!(
                            "Edge '{}' references unknown source node '{}'",
                            edge.id, edge.source
                        ),
                    ));
                }
                (_, None) => {
                    errors.push(EditorError::parse(
                        "P002",
                        format!(
                            "Edge '{}' references unknown target node '{}'",
                            edge.id, edge.target
                        ),
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(WorkflowGraph { graph, node_indices })
    }

    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    pub fn predecessors(&self, node_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    /// Every node that can reach `node_id` — the nodes whose output is
    /// legitimately referenceable from it. BFS over the reversed graph;
    /// the node itself is excluded.
    pub fn upstream_of(&self, node_id: &str) -> HashSet<String> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return HashSet::new();
        };

        let reversed = Reversed(&self.graph);
        let mut upstream = HashSet::new();
        let mut bfs = Bfs::new(reversed, idx);
        while let Some(nx) = bfs.next(reversed) {
            if nx != idx {
                upstream.insert(self.graph[nx].clone());
            }
        }
        upstream
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.predecessors(node_id).len()
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.successors(node_id).len()
    }
}
