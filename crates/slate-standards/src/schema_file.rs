//! TOML schema files that add or replace entity definitions.
//!
//! ```toml
//! [[entity]]
//! key = "droneShot"
//! label = "Drone Shot"
//!
//! [[entity.field]]
//! key = "pilot"
//! label = "Pilot"
//! kind = "text"
//! required = true
//! aliases = ["operator"]
//!
//! [[entity.field]]
//! key = "altitude"
//! kind = "number"
//! default = 120
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use slate_model::{EntitySchema, FieldDescriptor, FieldKind, FieldValue};

use crate::error::StandardsError;

#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(rename = "entity", default)]
    entities: Vec<EntitySpec>,
}

#[derive(Debug, Deserialize)]
struct EntitySpec {
    key: String,
    label: Option<String>,
    #[serde(rename = "field", default)]
    fields: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
struct FieldSpec {
    key: String,
    label: Option<String>,
    kind: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    enum_values: Vec<String>,
    default: Option<toml::Value>,
    #[serde(default)]
    aliases: Vec<String>,
}

/// Parses schema TOML into validated entity schemas. `origin` is only used in error messages.
pub fn parse_schema_toml(contents: &str, origin: &Path) -> Result<Vec<EntitySchema>, StandardsError> {
    let file: SchemaFile = toml::from_str(contents).map_err(|source| StandardsError::Toml {
        path: origin.to_path_buf(),
        source,
    })?;

    let mut schemas = Vec::with_capacity(file.entities.len());
    let mut seen = HashSet::with_capacity(file.entities.len());
    for entity in file.entities {
        let key = entity.key.trim().to_string();
        if key.is_empty() {
            return Err(StandardsError::invalid(origin, "entity with an empty key"));
        }
        if !seen.insert(key.clone()) {
            return Err(StandardsError::DuplicateEntity { key });
        }
        let mut fields = Vec::with_capacity(entity.fields.len());
        for spec in entity.fields {
            fields.push(field_from_spec(spec, &key, origin)?);
        }
        let label = entity.label.unwrap_or_else(|| key.clone());
        let schema = EntitySchema::new(key.clone(), label, fields)
            .map_err(|source| StandardsError::Model { entity: key, source })?;
        schemas.push(schema);
    }
    Ok(schemas)
}

/// Reads and parses a schema file from disk.
pub fn load_schema_file(path: &Path) -> Result<Vec<EntitySchema>, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    parse_schema_toml(&contents, path)
}

fn field_from_spec(
    spec: FieldSpec,
    entity: &str,
    origin: &Path,
) -> Result<FieldDescriptor, StandardsError> {
    let kind: FieldKind = spec.kind.parse().map_err(|source| StandardsError::Model {
        entity: entity.to_string(),
        source,
    })?;
    let default_value = match spec.default {
        Some(value) => Some(default_from_toml(kind, &value).ok_or_else(|| {
            StandardsError::invalid(
                origin,
                format!(
                    "default for {entity}.{} is not a valid {kind} value",
                    spec.key
                ),
            )
        })?),
        None => None,
    };
    let label = spec.label.unwrap_or_else(|| spec.key.clone());
    Ok(FieldDescriptor {
        key: spec.key,
        label,
        kind,
        required: spec.required,
        enum_values: spec.enum_values,
        default_value,
        aliases: spec.aliases,
    })
}

/// Converts a TOML default into the value shape of `kind`.
///
/// TOML integers are accepted wherever a number is expected.
fn default_from_toml(kind: FieldKind, value: &toml::Value) -> Option<FieldValue> {
    match kind {
        FieldKind::Text | FieldKind::Date | FieldKind::Enum => {
            value.as_str().map(|s| FieldValue::Text(s.to_string()))
        }
        FieldKind::Number => toml_number(value).map(FieldValue::Number),
        FieldKind::Boolean => value.as_bool().map(FieldValue::Boolean),
        FieldKind::TextList => value
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::TextList),
        FieldKind::NumberList => value
            .as_array()?
            .iter()
            .map(toml_number)
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::NumberList),
    }
}

fn toml_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults_by_kind() {
        let schemas = parse_schema_toml(
            r#"
            [[entity]]
            key = "droneShot"
            label = "Drone Shot"

            [[entity.field]]
            key = "altitude"
            kind = "number"
            default = 120

            [[entity.field]]
            key = "waypoints"
            kind = "number-list"
            default = []

            [[entity.field]]
            key = "approved"
            kind = "boolean"
            default = false
            "#,
            Path::new("<inline>"),
        )
        .unwrap();
        let fields = schemas[0].fields();
        assert_eq!(fields[0].default_value, Some(FieldValue::Number(120.0)));
        assert_eq!(fields[0].label, "altitude");
        assert_eq!(fields[1].default_value, Some(FieldValue::NumberList(vec![])));
        assert_eq!(fields[2].default_value, Some(FieldValue::Boolean(false)));
    }

    #[test]
    fn rejects_default_of_wrong_shape() {
        let err = parse_schema_toml(
            r#"
            [[entity]]
            key = "droneShot"

            [[entity.field]]
            key = "altitude"
            kind = "number"
            default = "high"
            "#,
            Path::new("<inline>"),
        )
        .unwrap_err();
        assert!(matches!(err, StandardsError::InvalidSchema { .. }));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = parse_schema_toml(
            r#"
            [[entity]]
            key = "droneShot"

            [[entity.field]]
            key = "altitude"
            kind = "meters"
            "#,
            Path::new("<inline>"),
        )
        .unwrap_err();
        assert!(matches!(err, StandardsError::Model { .. }));
    }
}
