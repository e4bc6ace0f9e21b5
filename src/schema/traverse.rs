//! Depth-first traversal over schema lists.
//!
//! `extract_field_paths` and `get_field_by_path` are the round-trip pair
//! every consumer builds on: any path the former enumerates, the latter
//! resolves to a defined field.

use super::types::{FieldDefinition, SchemaDefinition};

/// Enumerate every field path reachable from the given schemas, depth-first.
///
/// Container fields emit their own path before their children. Paths are
/// not prefixed by `schemaId`; callers decide prefixing.
pub fn extract_field_paths(schemas: &[SchemaDefinition], prefix: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for schema in schemas {
        collect(&schema.fields, prefix, false, &mut paths);
    }
    paths
}

/// Like [`extract_field_paths`] but emits terminal fields only. Used by
/// mapping editors that must not map onto containers.
pub fn leaf_field_paths(schemas: &[SchemaDefinition], prefix: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for schema in schemas {
        collect(&schema.fields, prefix, true, &mut paths);
    }
    paths
}

fn collect(fields: &[FieldDefinition], prefix: &str, leaves_only: bool, out: &mut Vec<String>) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };

        match &field.fields {
            Some(children) if !children.is_empty() => {
                if !leaves_only {
                    out.push(path.clone());
                }
                collect(children, &path, leaves_only, out);
            }
            _ => out.push(path),
        }
    }
}

/// Terminal fields paired with their dotted path, depth-first. The
/// namespace builder consumes this to emit one variable per leaf.
pub fn leaf_fields<'a>(schemas: &'a [SchemaDefinition]) -> Vec<(String, &'a FieldDefinition)> {
    let mut out = Vec::new();
    for schema in schemas {
        collect_leaf_fields(&schema.fields, "", &mut out);
    }
    out
}

fn collect_leaf_fields<'a>(
    fields: &'a [FieldDefinition],
    prefix: &str,
    out: &mut Vec<(String, &'a FieldDefinition)>,
) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match &field.fields {
            Some(children) if !children.is_empty() => {
                collect_leaf_fields(children, &path, out);
            }
            _ => out.push((path, field)),
        }
    }
}

/// Resolve a dotted path against a schema list, one segment at a time.
///
/// Returns `None` if a segment is unmatched, or if a non-container field
/// is asked to descend further.
pub fn get_field_by_path<'a>(
    schemas: &'a [SchemaDefinition],
    path: &str,
) -> Option<&'a FieldDefinition> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current: Vec<&FieldDefinition> = schemas.iter().flat_map(|s| s.fields.iter()).collect();

    for (i, segment) in segments.iter().enumerate() {
        let field = current.into_iter().find(|f| f.name == *segment)?;
        if i == segments.len() - 1 {
            return Some(field);
        }
        current = field.fields.as_ref()?.iter().collect();
    }

    None
}
