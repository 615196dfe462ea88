//! Error types for mapping operations.

/// Errors from manual mapping changes.
///
/// Unmatched columns, missing required fields, and conflicting assignments
/// are reported through [`slate_model::MappingResult`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// Column index outside the source table.
    #[error("column {index} is out of range (table has {columns} columns)")]
    ColumnOutOfRange { index: usize, columns: usize },
    /// Field key not present in the entity's descriptors.
    #[error("unknown field: {key}")]
    UnknownField { key: String },
}
