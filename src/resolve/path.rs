//! Segment-wise resolution and cycle-safe enumeration over the arena.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::arena::ObjectTypeArena;
use crate::schema::types::{FieldDefinition, FieldType};

/// One resolved step of a dotted path, for path-builder UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSegment {
    pub field_name: String,
    pub field_type: FieldType,
    /// Id of the type whose field list this segment was matched in.
    pub object_type_id: String,
}

/// A field discovered by [`ObjectTypeArena::collect_paths`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedField {
    /// Machine path, e.g. `"customer.address.city"`.
    pub path: String,
    /// Display path using display names where present.
    pub display_path: String,
    pub field_type: FieldType,
    /// Id of the type that owns the terminal field.
    pub object_type_id: String,
}

impl ObjectTypeArena {
    /// Resolve every segment of a path, returning the full chain.
    ///
    /// Each iteration consumes one segment, so the walk terminates for any
    /// arena, cyclic or not. Fails if a segment is unmatched or a scalar
    /// field is asked to descend.
    pub fn resolve_chain(
        &self,
        root_type_id: &str,
        segments: &[&str],
    ) -> Option<Vec<ResolvedSegment>> {
        if segments.is_empty() {
            return None;
        }

        let mut chain = Vec::with_capacity(segments.len());
        let mut current_type_id = root_type_id.to_string();

        for (i, segment) in segments.iter().enumerate() {
            let field = self
                .fields_of(&current_type_id)
                .iter()
                .find(|f| f.name == *segment)?;

            chain.push(ResolvedSegment {
                field_name: field.name.clone(),
                field_type: field.field_type,
                object_type_id: current_type_id.clone(),
            });

            if i == segments.len() - 1 {
                break;
            }

            // More segments remain: descend through the linked type.
            match field.linked_type_id() {
                Some(next) => current_type_id = next.to_string(),
                None => return None,
            }
        }

        Some(chain)
    }

    /// Resolve a dotted path to its terminal field definition only.
    pub fn resolve_terminal(&self, root_type_id: &str, path: &str) -> Option<&FieldDefinition> {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return None;
        }

        let mut current_type_id = root_type_id;
        for (i, segment) in segments.iter().enumerate() {
            let field = self
                .fields_of(current_type_id)
                .iter()
                .find(|f| f.name == *segment)?;

            if i == segments.len() - 1 {
                return Some(field);
            }
            current_type_id = field.linked_type_id()?;
        }

        None
    }

    /// Fields selectable as the next segment after walking `walked` from
    /// the root type. Empty when the walk dead-ends.
    pub fn available_fields(&self, root_type_id: &str, walked: &[&str]) -> &[FieldDefinition] {
        let mut current_type_id = root_type_id;

        for segment in walked {
            let Some(field) = self
                .fields_of(current_type_id)
                .iter()
                .find(|f| f.name == *segment)
            else {
                return &[];
            };
            match field.linked_type_id() {
                Some(next) => current_type_id = next,
                None => return &[],
            }
        }

        self.fields_of(current_type_id)
    }

    /// Enumerate every reachable field path from the root type, descending
    /// through linked types. A visited set of type ids truncates
    /// self-referential and mutually-referential branches instead of
    /// looping; a revisited type contributes no further fields.
    pub fn collect_paths(
        &self,
        root_type_id: &str,
        allowed_types: Option<&[FieldType]>,
    ) -> Vec<CollectedField> {
        let mut collected = Vec::new();
        let mut visited = HashSet::new();
        self.collect_into(root_type_id, &[], &mut visited, &mut collected);

        if let Some(allowed) = allowed_types {
            collected.retain(|f| allowed.contains(&f.field_type));
        }
        collected
    }

    fn collect_into(
        &self,
        type_id: &str,
        prefix: &[&str],
        visited: &mut HashSet<String>,
        out: &mut Vec<CollectedField>,
    ) {
        if !visited.insert(type_id.to_string()) {
            return;
        }

        for field in self.fields_of(type_id) {
            let mut segments: Vec<&str> = prefix.to_vec();
            segments.push(&field.name);
            let path = segments.join(".");

            let display_leaf = field.display_name.as_deref().unwrap_or(&field.name);
            let display_path = if prefix.is_empty() {
                display_leaf.to_string()
            } else {
                format!("{}.{display_leaf}", prefix.join("."))
            };

            out.push(CollectedField {
                path,
                display_path,
                field_type: field.field_type,
                object_type_id: type_id.to_string(),
            });

            if let Some(next) = field.linked_type_id() {
                self.collect_into(next, &segments, visited, out);
            }
        }
    }
}
