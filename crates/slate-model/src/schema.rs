use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::field::FieldDescriptor;

/// Definition of one entity type: its key, display label, and ordered fields.
///
/// Construction validates every field and rejects duplicate field keys, so a
/// schema obtained from [`EntitySchema::new`] always satisfies the descriptor
/// invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySchema {
    key: String,
    label: String,
    fields: Vec<FieldDescriptor>,
}

impl EntitySchema {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self> {
        let key = key.into();
        let mut seen = BTreeSet::new();
        for field in &fields {
            if field.key.trim().is_empty() {
                return Err(ModelError::EmptyFieldKey { entity: key });
            }
            if !seen.insert(field.key.as_str()) {
                return Err(ModelError::DuplicateFieldKey {
                    entity: key,
                    key: field.key.clone(),
                });
            }
            field.validate()?;
        }
        Ok(Self {
            key,
            label: label.into(),
            fields,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = EntitySchema::new(
            "prop",
            "Prop",
            vec![
                FieldDescriptor::text("name", "Name"),
                FieldDescriptor::text("name", "Prop Name"),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateFieldKey {
                entity: "prop".to_string(),
                key: "name".to_string(),
            }
        );
    }

    #[test]
    fn required_fields_keep_declaration_order() {
        let schema = EntitySchema::new(
            "crewMember",
            "Crew Member",
            vec![
                FieldDescriptor::text("name", "Name").required(),
                FieldDescriptor::text("phone", "Phone"),
                FieldDescriptor::text("role", "Role").required(),
            ],
        )
        .unwrap();
        let required: Vec<&str> = schema.required_fields().map(|f| f.key.as_str()).collect();
        assert_eq!(required, vec!["name", "role"]);
        assert_eq!(schema.field("phone").map(|f| f.label.as_str()), Some("Phone"));
    }
}
