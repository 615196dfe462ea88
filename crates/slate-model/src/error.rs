use thiserror::Error;

use crate::field::FieldKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("entity {entity} has a field with an empty key")]
    EmptyFieldKey { entity: String },
    #[error("entity {entity} declares field {key} more than once")]
    DuplicateFieldKey { entity: String, key: String },
    #[error("enum field {key} declares no values")]
    MissingEnumValues { key: String },
    #[error("field {key} of kind {kind} cannot declare enum values")]
    UnexpectedEnumValues { key: String, kind: FieldKind },
    #[error("default value of field {key} does not fit kind {kind}")]
    DefaultKindMismatch { key: String, kind: FieldKind },
    #[error("unknown field kind: {0}")]
    UnknownFieldKind(String),
    #[error("invalid match thresholds: {0}")]
    InvalidThresholds(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
