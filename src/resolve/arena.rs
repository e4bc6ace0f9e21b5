//! Arena of named object types, keyed by id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::types::FieldDefinition;

/// A registered, named object type. Fields may link to other registered
/// types (or back to this one) through their validation block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// All named object types known to the editor, in one table. Nesting is
/// a reference by id, never an embedded copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectTypeArena {
    types: HashMap<String, ObjectType>,
}

impl ObjectTypeArena {
    pub fn new() -> Self {
        ObjectTypeArena::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, object_type: ObjectType) {
        self.types.insert(id.into(), object_type);
    }

    pub fn get(&self, id: &str) -> Option<&ObjectType> {
        self.types.get(id)
    }

    /// Fields of the given type, or empty when the id is unknown.
    pub fn fields_of(&self, id: &str) -> &[FieldDefinition] {
        self.get(id).map(|t| t.fields.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}

impl FromIterator<(String, ObjectType)> for ObjectTypeArena {
    fn from_iter<I: IntoIterator<Item = (String, ObjectType)>>(iter: I) -> Self {
        ObjectTypeArena {
            types: iter.into_iter().collect(),
        }
    }
}
