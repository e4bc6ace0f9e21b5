//! Recursive field-definition trees and their traversal primitives.
//!
//! Schemas describe the shape of data a node consumes or produces. They are
//! fetched from the registry and treated as read-only here.

pub mod reference;
pub mod traverse;
pub mod types;

pub use reference::FieldRef;
pub use traverse::{extract_field_paths, get_field_by_path, leaf_field_paths, leaf_fields};
pub use types::*;
