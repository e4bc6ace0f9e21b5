//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::{EditorError, Severity};
use crate::expression;
use crate::namespace::{NamespaceBuilder, ScopeMode, TokenStyle};
use crate::normalize;
use crate::schema::types::FieldType;

/// Validate a workflow JSON: parse + graph + W-rules.
/// Returns a JSON array of error objects.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    let result = validate_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(json: &str) -> Vec<ErrorDto> {
    let workflow = match crate::parse::parse(json) {
        Ok(w) => w,
        Err(errors) => return errors.into_iter().map(ErrorDto::from).collect(),
    };

    let graph = match crate::parse::WorkflowGraph::build(&workflow) {
        Ok(g) => g,
        Err(errors) => return errors.into_iter().map(ErrorDto::from).collect(),
    };

    let errors = crate::validate::validate_workflow(&workflow, &graph);
    errors.into_iter().map(ErrorDto::from).collect()
}

/// Validate a single node JSON (registry identity check).
#[wasm_bindgen]
pub fn validate_node(node_json: &str) -> JsValue {
    let result = match crate::parse::parse_node(node_json) {
        Ok(node) => crate::validate::validate_node(&node)
            .into_iter()
            .map(ErrorDto::from)
            .collect(),
        Err(errors) => errors.into_iter().map(ErrorDto::from).collect::<Vec<_>>(),
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Resolve a node's category from its type string and config JSON.
/// Returns `"TRIGGER"`, `"ACTION"` or `"LOGIC"`.
#[wasm_bindgen]
pub fn resolve_node_category(node_type: &str, config_json: &str) -> String {
    let config = serde_json::from_str(config_json).unwrap_or_default();
    crate::category::resolve_category(node_type, &config)
        .as_str()
        .to_string()
}

#[derive(Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NamespaceOptions {
    search: Option<String>,
    allowed_types: Option<Vec<FieldType>>,
    variable_names: Vec<String>,
    path_tokens: bool,
    all_other_nodes: bool,
}

/// Build the context namespace for the node being edited.
/// Returns the grouped variable lists, or an `errors` array on bad input.
#[wasm_bindgen]
pub fn build_namespace(workflow_json: &str, current_node_id: &str, options_json: &str) -> JsValue {
    let result = build_namespace_inner(workflow_json, current_node_id, options_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn build_namespace_inner(
    workflow_json: &str,
    current_node_id: &str,
    options_json: &str,
) -> NamespaceResult {
    let workflow = match crate::parse::parse(workflow_json) {
        Ok(w) => w,
        Err(errors) => {
            return NamespaceResult::Errors {
                errors: errors.into_iter().map(ErrorDto::from).collect(),
            };
        }
    };

    let options: NamespaceOptions = serde_json::from_str(options_json).unwrap_or_default();

    let graph = crate::parse::WorkflowGraph::build(&workflow).ok();

    let mut builder = NamespaceBuilder::new(&workflow.nodes, current_node_id)
        .with_variable_names(options.variable_names);
    if let Some(graph) = graph.as_ref() {
        builder = builder.with_graph(graph);
    }
    if let Some(search) = options.search {
        builder = builder.with_search(search);
    }
    if let Some(types) = options.allowed_types {
        builder = builder.with_allowed_types(types);
    }
    if options.path_tokens {
        builder = builder.token_style(TokenStyle::Path);
    }
    if options.all_other_nodes {
        builder = builder.scope(ScopeMode::AllOtherNodes);
    }

    NamespaceResult::Namespace {
        namespace: builder.build(),
    }
}

/// Normalize a node JSON into its canonical persisted shape.
/// Returns `{status: "success", node}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn normalize_node(node_json: &str) -> JsValue {
    let result = normalize_node_inner(node_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn normalize_node_inner(node_json: &str) -> NormalizeResult {
    let mut node = match crate::parse::parse_node(node_json) {
        Ok(n) => n,
        Err(errors) => {
            return NormalizeResult::Errors {
                errors: errors.into_iter().map(ErrorDto::from).collect(),
            };
        }
    };

    match normalize::normalize_node(&mut node) {
        Ok(()) => NormalizeResult::Success { node },
        Err(e) => NormalizeResult::Errors {
            errors: vec![ErrorDto {
                code: "N001".into(),
                phase: "Normalize".into(),
                severity: "error".into(),
                message: e.to_string(),
                node_id: None,
            }],
        },
    }
}

/// Balanced-brace validation for a config field's text.
/// Returns a JSON array with zero or one advisory error.
#[wasm_bindgen]
pub fn validate_expression(text: &str) -> JsValue {
    let result: Vec<ErrorDto> = expression::validate_braces(text)
        .map(|e| {
            let code = match e {
                expression::BraceError::UnclosedExpression => "X001",
                expression::BraceError::ExtraClosingBrace => "X002",
            };
            ErrorDto::from(EditorError::expression(code, e.to_string(), None))
        })
        .into_iter()
        .collect();
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Accept an autocomplete suggestion into free text.
/// Returns `{text, cursor}` or null when the cursor is not composing.
#[wasm_bindgen]
pub fn accept_suggestion(text: &str, cursor: usize, token: &str) -> JsValue {
    match expression::accept_suggestion(text, cursor, token) {
        Some((new_text, new_cursor)) => serde_wasm_bindgen::to_value(&SpliceDto {
            text: new_text,
            cursor: new_cursor,
        })
        .unwrap_or(JsValue::NULL),
        None => JsValue::NULL,
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    phase: String,
    severity: String,
    message: String,
    node_id: Option<String>,
}

impl From<EditorError> for ErrorDto {
    fn from(e: EditorError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            severity: match e.severity {
                Severity::Error => "error".into(),
                Severity::Warning => "warning".into(),
            },
            message: e.message,
            node_id: e.node_id,
        }
    }
}

#[derive(serde::Serialize)]
struct SpliceDto {
    text: String,
    cursor: usize,
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum NamespaceResult {
    #[serde(rename = "success")]
    Namespace { namespace: crate::namespace::ContextNamespace },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum NormalizeResult {
    #[serde(rename = "success")]
    Success { node: crate::parse::types::WorkflowNode },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
