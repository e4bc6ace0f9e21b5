//! Field references: `type.path` strings and their parsed form.
//!
//! Two persisted formats coexist. The old format is a bare dotted string
//! (`"user.email"`); the new format carries the object type separately.
//! Both parse into `FieldRef`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRef {
    pub object_type_id: Option<String>,
    pub field_path: String,
}

impl FieldRef {
    /// Parse the old string format. A multi-segment path is read as
    /// `objectType.field.path`; a single segment is a bare field path.
    pub fn parse(value: &str) -> Option<FieldRef> {
        if value.is_empty() {
            return None;
        }
        let parts: Vec<&str> = value.split('.').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            return None;
        }
        if parts.len() > 1 {
            Some(FieldRef {
                object_type_id: Some(parts[0].to_string()),
                field_path: parts[1..].join("."),
            })
        } else {
            Some(FieldRef {
                object_type_id: None,
                field_path: parts[0].to_string(),
            })
        }
    }

    /// Inverse of [`FieldRef::parse`] for qualified refs.
    pub fn format(&self) -> String {
        match &self.object_type_id {
            Some(type_id) => format!("{type_id}.{}", self.field_path),
            None => self.field_path.clone(),
        }
    }

    pub fn is_nested(&self) -> bool {
        self.field_path.contains('.')
    }

    pub fn segments(&self) -> Vec<&str> {
        self.field_path.split('.').filter(|p| !p.is_empty()).collect()
    }

    /// Human-readable rendering for selector UIs:
    /// `"Order Event: Customer → Email"`.
    pub fn display_name(&self) -> String {
        let path = self
            .segments()
            .iter()
            .map(|part| title_case(part))
            .collect::<Vec<_>>()
            .join(" → ");

        match &self.object_type_id {
            Some(type_id) => {
                let type_name = type_id
                    .split('-')
                    .map(title_case)
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{type_name}: {path}")
            }
            None => path,
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_ref_round_trips() {
        let parsed = FieldRef::parse("user.profile.email").unwrap();
        assert_eq!(parsed.object_type_id.as_deref(), Some("user"));
        assert_eq!(parsed.field_path, "profile.email");
        assert!(parsed.is_nested());
        assert_eq!(FieldRef::parse(&parsed.format()).unwrap(), parsed);
    }

    #[test]
    fn bare_path_has_no_type() {
        let parsed = FieldRef::parse("email").unwrap();
        assert_eq!(parsed.object_type_id, None);
        assert_eq!(parsed.field_path, "email");
        assert!(!parsed.is_nested());
    }

    #[test]
    fn empty_string_is_none() {
        assert!(FieldRef::parse("").is_none());
    }

    #[test]
    fn display_name_renders_type_and_arrows() {
        let parsed = FieldRef::parse("order-event.customer.email").unwrap();
        assert_eq!(parsed.display_name(), "Order Event: Customer → Email");
    }
}
