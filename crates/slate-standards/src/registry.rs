#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use slate_model::{EntitySchema, FieldDescriptor};
use tracing::debug;

use crate::builtin::BUILTIN_ENTITIES;
use crate::error::StandardsError;
use crate::schema_file::{load_schema_file, parse_schema_toml};

/// Lookup table of entity definitions keyed by entity key.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entities: BTreeMap<String, EntitySchema>,
}

impl SchemaRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in production entities.
    pub fn builtin() -> Result<Self, StandardsError> {
        let mut registry = Self::empty();
        for entity in BUILTIN_ENTITIES {
            let schema = EntitySchema::new(entity.key, entity.label, (entity.fields)())
                .map_err(|source| StandardsError::Model {
                    entity: entity.key.to_string(),
                    source,
                })?;
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Adds a new entity. Fails if the key is already taken.
    pub fn register(&mut self, schema: EntitySchema) -> Result<(), StandardsError> {
        if self.entities.contains_key(schema.key()) {
            return Err(StandardsError::DuplicateEntity {
                key: schema.key().to_string(),
            });
        }
        self.entities.insert(schema.key().to_string(), schema);
        Ok(())
    }

    /// Adds or replaces an entity, returning the definition it replaced.
    pub fn upsert(&mut self, schema: EntitySchema) -> Option<EntitySchema> {
        self.entities.insert(schema.key().to_string(), schema)
    }

    /// Looks up an entity by key, falling back to a case-insensitive match.
    pub fn get(&self, key: &str) -> Option<&EntitySchema> {
        self.entities.get(key).or_else(|| {
            self.entities
                .values()
                .find(|schema| schema.key().eq_ignore_ascii_case(key))
        })
    }

    /// Field descriptors of an entity in declaration order.
    pub fn fields(&self, key: &str) -> Result<&[FieldDescriptor], StandardsError> {
        self.get(key)
            .map(EntitySchema::fields)
            .ok_or_else(|| StandardsError::UnknownEntity {
                key: key.to_string(),
            })
    }

    pub fn entity_keys(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntitySchema> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Merges the entities of a TOML schema file, replacing same-keyed definitions.
    /// An entity key repeated within the file fails the whole load.
    ///
    /// Returns the number of entities read from the file.
    pub fn load_toml(&mut self, path: &Path) -> Result<usize, StandardsError> {
        let schemas = load_schema_file(path)?;
        Ok(self.merge(schemas, path))
    }

    /// Like [`Self::load_toml`] for schema text already in memory.
    pub fn load_toml_str(&mut self, contents: &str, origin: &Path) -> Result<usize, StandardsError> {
        let schemas = parse_schema_toml(contents, origin)?;
        Ok(self.merge(schemas, origin))
    }

    fn merge(&mut self, schemas: Vec<EntitySchema>, origin: &Path) -> usize {
        let count = schemas.len();
        for schema in schemas {
            let key = schema.key().to_string();
            let field_count = schema.fields().len();
            let replaced = self.upsert(schema).is_some();
            debug!(
                entity = %key,
                field_count,
                replaced,
                origin = %origin.display(),
                "schema loaded"
            );
        }
        count
    }
}

/// Loads the built-in registry.
pub fn load_default_registry() -> Result<SchemaRegistry, StandardsError> {
    SchemaRegistry::builtin()
}
