//! Context namespace construction: every addressable value, grouped and
//! ordered, scoped to the node currently being edited.

pub mod schema_source;
pub mod variables;

pub use schema_source::locate_output_schemas;
pub use variables::{BUILTIN_FUNCTIONS, ContextVariable, GROUP_ORDER, TokenStyle, VariableCategory};

use serde::{Deserialize, Serialize};

use crate::parse::graph::WorkflowGraph;
use crate::parse::types::WorkflowNode;
use crate::schema::traverse::leaf_fields;
use crate::schema::types::{FieldType, SchemaDefinition};

/// Which non-trigger nodes are in scope for the node-output group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    /// Only true predecessors of the current node (reachability over
    /// incoming edges). Requires a graph.
    Upstream,
    /// Every node other than the current one — the legacy behavior some
    /// call sites still rely on.
    AllOtherNodes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableGroup {
    pub category: VariableCategory,
    pub heading: String,
    pub variables: Vec<ContextVariable>,
}

/// The built namespace. Group order and in-group order are stable across
/// rebuilds for the same inputs; empty groups are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextNamespace {
    pub groups: Vec<VariableGroup>,
}

impl ContextNamespace {
    pub fn group(&self, category: VariableCategory) -> Option<&VariableGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    pub fn all(&self) -> impl Iterator<Item = &ContextVariable> {
        self.groups.iter().flat_map(|g| g.variables.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn group_heading(category: VariableCategory) -> &'static str {
    match category {
        VariableCategory::Trigger => "Trigger Data",
        VariableCategory::Node => "Node Outputs",
        VariableCategory::Variable => "Variables",
        VariableCategory::Metadata => "Metadata",
        VariableCategory::Builtin => "Built-in Functions",
    }
}

pub struct NamespaceBuilder<'a> {
    nodes: &'a [WorkflowNode],
    current_node_id: &'a str,
    graph: Option<&'a WorkflowGraph>,
    trigger_schema_override: Option<&'a [SchemaDefinition]>,
    variable_names: Vec<String>,
    allowed_types: Option<Vec<FieldType>>,
    search: Option<String>,
    token_style: TokenStyle,
    scope: Option<ScopeMode>,
}

impl<'a> NamespaceBuilder<'a> {
    pub fn new(nodes: &'a [WorkflowNode], current_node_id: &'a str) -> Self {
        NamespaceBuilder {
            nodes,
            current_node_id,
            graph: None,
            trigger_schema_override: None,
            variable_names: Vec::new(),
            allowed_types: None,
            search: None,
            token_style: TokenStyle::Expression,
            scope: None,
        }
    }

    /// Provide the edge graph; enables upstream scoping.
    pub fn with_graph(mut self, graph: &'a WorkflowGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Schemas to use for trigger nodes instead of whatever their configs
    /// carry (the editor passes the freshly-fetched registry schema here).
    pub fn with_trigger_schema(mut self, schemas: &'a [SchemaDefinition]) -> Self {
        self.trigger_schema_override = Some(schemas);
        self
    }

    pub fn with_variable_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variable_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allowed_types(mut self, types: Vec<FieldType>) -> Self {
        self.allowed_types = Some(types);
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn token_style(mut self, style: TokenStyle) -> Self {
        self.token_style = style;
        self
    }

    pub fn scope(mut self, mode: ScopeMode) -> Self {
        self.scope = Some(mode);
        self
    }

    pub fn build(&self) -> ContextNamespace {
        let style = self.token_style;
        let mut groups = Vec::new();

        let effective_scope = match (self.scope, self.graph) {
            (Some(mode), _) => mode,
            (None, Some(_)) => ScopeMode::Upstream,
            (None, None) => ScopeMode::AllOtherNodes,
        };
        let upstream = match (effective_scope, self.graph) {
            (ScopeMode::Upstream, Some(graph)) => Some(graph.upstream_of(self.current_node_id)),
            _ => None,
        };

        // Trigger group: every trigger node, whatever its position.
        let mut trigger_vars = Vec::new();
        for node in self.nodes.iter().filter(|n| n.is_trigger()) {
            let located;
            let schemas: Option<&[SchemaDefinition]> = match self.trigger_schema_override {
                Some(override_schemas) if !override_schemas.is_empty() => Some(override_schemas),
                _ => {
                    located = locate_output_schemas(node.config());
                    located.as_deref()
                }
            };

            match schemas {
                Some(schemas) => {
                    for (path, field) in leaf_fields(schemas) {
                        trigger_vars.push(ContextVariable {
                            value: style.node_token(&node.id, Some(&path)),
                            label: format!("{}.{path}", node.label()),
                            description: format!(
                                "Trigger data from {} ({})",
                                node.label(),
                                field.field_type.as_str()
                            ),
                            category: VariableCategory::Trigger,
                            node_id: Some(node.id.clone()),
                            field_path: Some(path),
                            field_type: Some(field.field_type),
                        });
                    }
                }
                // No schema anywhere: the whole payload must still be
                // addressable.
                None => trigger_vars.push(ContextVariable {
                    value: style.node_token(&node.id, None),
                    label: format!("{} (all fields)", node.label()),
                    description: format!("All trigger data from {}", node.label()),
                    category: VariableCategory::Trigger,
                    node_id: Some(node.id.clone()),
                    field_path: None,
                    field_type: None,
                }),
            }
        }
        groups.push((VariableCategory::Trigger, trigger_vars));

        // Node-output group: non-trigger nodes in scope, excluding the one
        // being edited.
        let mut node_vars = Vec::new();
        for node in self.nodes.iter().filter(|n| {
            !n.is_trigger()
                && n.id != self.current_node_id
                && upstream.as_ref().is_none_or(|up| up.contains(&n.id))
        }) {
            match locate_output_schemas(node.config()) {
                Some(schemas) => {
                    for (path, field) in leaf_fields(&schemas) {
                        node_vars.push(ContextVariable {
                            value: style.node_token(&node.id, Some(&path)),
                            label: format!("{}.{path}", node.label()),
                            description: format!(
                                "Output from {} node ({})",
                                node.label(),
                                field.field_type.as_str()
                            ),
                            category: VariableCategory::Node,
                            node_id: Some(node.id.clone()),
                            field_path: Some(path),
                            field_type: Some(field.field_type),
                        });
                    }
                }
                None => node_vars.push(ContextVariable {
                    value: style.node_token(&node.id, None),
                    label: format!("{} (all fields)", node.label()),
                    description: format!("All output from {} node", node.label()),
                    category: VariableCategory::Node,
                    node_id: Some(node.id.clone()),
                    field_path: None,
                    field_type: None,
                }),
            }
        }
        groups.push((VariableCategory::Node, node_vars));

        // Variables group: fixed entry plus one per supplied name.
        let mut variable_vars = vec![ContextVariable {
            value: style.variables_token(None),
            label: "Variables".to_string(),
            description: "Global workflow variables".to_string(),
            category: VariableCategory::Variable,
            node_id: None,
            field_path: None,
            field_type: None,
        }];
        for name in &self.variable_names {
            variable_vars.push(ContextVariable {
                value: style.variables_token(Some(name)),
                label: format!("_variables.{name}"),
                description: format!("Workflow variable '{name}'"),
                category: VariableCategory::Variable,
                node_id: None,
                field_path: Some(name.clone()),
                field_type: None,
            });
        }
        groups.push((VariableCategory::Variable, variable_vars));

        groups.push((
            VariableCategory::Metadata,
            vec![ContextVariable {
                value: style.metadata_token(),
                label: "Metadata".to_string(),
                description: "Execution metadata (executionId, workflowId, etc.)".to_string(),
                category: VariableCategory::Metadata,
                node_id: None,
                field_path: None,
                field_type: None,
            }],
        ));

        groups.push((
            VariableCategory::Builtin,
            BUILTIN_FUNCTIONS
                .iter()
                .map(|(call, description)| ContextVariable {
                    value: style.builtin_token(call),
                    label: (*call).to_string(),
                    description: (*description).to_string(),
                    category: VariableCategory::Builtin,
                    node_id: None,
                    field_path: None,
                    field_type: None,
                })
                .collect(),
        ));

        // Filters apply after grouping so empty groups fall away.
        let query_lower = self.search.as_ref().map(|q| q.to_lowercase());
        let groups = groups
            .into_iter()
            .map(|(category, mut vars)| {
                if let Some(allowed) = &self.allowed_types {
                    vars.retain(|v| v.field_type.is_none_or(|t| allowed.contains(&t)));
                }
                if let Some(query) = &query_lower {
                    if !query.is_empty() {
                        vars.retain(|v| v.matches(query));
                    }
                }
                (category, vars)
            })
            .filter(|(_, vars)| !vars.is_empty())
            .map(|(category, variables)| VariableGroup {
                category,
                heading: group_heading(category).to_string(),
                variables,
            })
            .collect();

        ContextNamespace { groups }
    }
}

/// Variables for an input schema, as used by registry editors: fields are
/// addressed bare (`@{fieldName}`) or schema-qualified
/// (`@{schemaId.fieldName}`) when the schema carries a meaningful id.
/// Builtins are appended, same as the node-scoped namespace.
pub fn input_schema_variables(schemas: &[SchemaDefinition]) -> Vec<ContextVariable> {
    let mut vars = Vec::new();

    for schema in schemas {
        let qualified = !schema.schema_id.is_empty() && schema.schema_id != "input-schema";
        let single = std::slice::from_ref(schema);
        for (path, field) in leaf_fields(single) {
            let field_path = if qualified {
                format!("{}.{path}", schema.schema_id)
            } else {
                path
            };
            vars.push(ContextVariable {
                value: format!("@{{{field_path}}}"),
                label: field_path.clone(),
                description: field.description.clone().unwrap_or_else(|| {
                    format!("Input field: {} ({})", field.name, field.field_type.as_str())
                }),
                category: VariableCategory::Node,
                node_id: None,
                field_path: Some(field_path),
                field_type: Some(field.field_type),
            });
        }
    }

    for (call, description) in BUILTIN_FUNCTIONS {
        vars.push(ContextVariable {
            value: format!("@{{{call}}}"),
            label: (*call).to_string(),
            description: (*description).to_string(),
            category: VariableCategory::Builtin,
            node_id: None,
            field_path: None,
            field_type: None,
        });
    }

    vars
}
