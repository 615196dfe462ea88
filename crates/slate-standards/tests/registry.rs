use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use slate_model::{FieldKind, FieldValue};
use slate_standards::{SchemaRegistry, StandardsError, load_default_registry};

#[test]
fn builtin_registry_loads_every_entity() {
    let registry = load_default_registry().expect("load registry");
    let keys: BTreeSet<&str> = registry.entity_keys().collect();
    for key in [
        "shot",
        "scheduleDay",
        "crewMember",
        "budgetItem",
        "castMember",
        "vfxShot",
        "location",
        "prop",
        "costume",
        "equipment",
    ] {
        assert!(keys.contains(key), "missing entity {key}");
    }
    assert_eq!(registry.len(), 10);
}

#[test]
fn cast_member_fields_are_ordered() {
    let registry = load_default_registry().expect("load registry");
    let fields = registry.fields("castMember").expect("cast fields");
    let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "actorName",
            "characterName",
            "characterDescription",
            "email",
            "phone",
            "agent",
            "scenes",
            "status",
        ]
    );
    let scenes = &fields[6];
    assert_eq!(scenes.kind, FieldKind::NumberList);
    assert!(scenes.aliases.iter().any(|a| a == "scene numbers"));
    let status = &fields[7];
    assert_eq!(status.default_value, Some(FieldValue::Text("Pending".to_string())));
}

#[test]
fn enum_defaults_are_declared_values() {
    let registry = load_default_registry().expect("load registry");
    for schema in registry.iter() {
        for field in schema.fields() {
            if field.kind != FieldKind::Enum {
                continue;
            }
            if let Some(FieldValue::Text(default)) = &field.default_value {
                assert!(
                    field.allows(default),
                    "{}.{} default {default} is not declared",
                    schema.key(),
                    field.key
                );
            }
        }
    }
}

#[test]
fn lookup_is_case_insensitive() {
    let registry = load_default_registry().expect("load registry");
    assert_eq!(registry.get("CASTMEMBER").map(|s| s.key()), Some("castMember"));
    assert!(matches!(
        registry.fields("dailies"),
        Err(StandardsError::UnknownEntity { .. })
    ));
}

#[test]
fn register_rejects_duplicate_entity() {
    let mut registry = load_default_registry().expect("load registry");
    let prop = registry.get("prop").cloned().expect("prop schema");
    assert!(matches!(
        registry.register(prop),
        Err(StandardsError::DuplicateEntity { .. })
    ));
}

#[test]
fn schema_file_adds_and_replaces_entities() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schemas.toml");
    fs::write(
        &path,
        r#"
[[entity]]
key = "prop"
label = "Prop"

[[entity.field]]
key = "name"
label = "Prop Name"
kind = "text"
required = true

[[entity]]
key = "droneShot"
label = "Drone Shot"

[[entity.field]]
key = "pilot"
kind = "text"
aliases = ["operator"]

[[entity.field]]
key = "airspace"
kind = "enum"
enum_values = ["Class G", "Controlled"]
default = "Class G"
"#,
    )
    .expect("write schema file");

    let mut registry = SchemaRegistry::builtin().expect("builtin");
    let loaded = registry.load_toml(&path).expect("load schema file");
    assert_eq!(loaded, 2);
    assert_eq!(registry.len(), 11);
    assert_eq!(registry.fields("prop").expect("prop").len(), 1);

    let drone = registry.fields("droneShot").expect("drone");
    assert_eq!(drone[0].label, "pilot");
    assert_eq!(drone[1].enum_values, vec!["Class G", "Controlled"]);
}

#[test]
fn schema_file_with_duplicate_field_is_rejected() {
    let mut registry = SchemaRegistry::empty();
    let err = registry
        .load_toml_str(
            r#"
[[entity]]
key = "prop"

[[entity.field]]
key = "name"
kind = "text"

[[entity.field]]
key = "name"
kind = "text"
"#,
            Path::new("inline.toml"),
        )
        .unwrap_err();
    assert!(matches!(err, StandardsError::Model { .. }));
    assert!(registry.is_empty());
}

#[test]
fn schema_file_with_duplicate_entity_is_rejected() {
    let mut registry = SchemaRegistry::empty();
    let err = registry
        .load_toml_str(
            r#"
[[entity]]
key = "drone"

[[entity.field]]
key = "model"
kind = "text"

[[entity]]
key = " drone "

[[entity.field]]
key = "pilot"
kind = "text"
"#,
            Path::new("inline.toml"),
        )
        .unwrap_err();
    assert!(matches!(err, StandardsError::DuplicateEntity { ref key } if key == "drone"));
    assert!(registry.is_empty());
}

#[test]
fn missing_schema_file_reports_path() {
    let mut registry = SchemaRegistry::empty();
    let err = registry
        .load_toml(Path::new("/nonexistent/slate/schemas.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/slate/schemas.toml"));
}
