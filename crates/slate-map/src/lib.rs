//! Column-to-field mapping for spreadsheet imports.
//!
//! [`MappingEngine::suggest`] proposes a mapping from source headers to an
//! entity's fields, [`apply_override`] applies a manual change, and
//! [`convert_rows`] turns raw rows into typed records.

#![deny(unsafe_code)]

mod convert;
mod engine;
mod error;
mod lookup;
mod normalize;
mod score;
mod session;

pub use convert::{
    ConversionOptions, EnumFallback, coerce_cell, convert_named_cells, convert_rows,
    convert_rows_with, parse_boolean, parse_number, resolve_enum, validate_record,
};
pub use engine::{FieldScore, MappingEngine, apply_override, auto_map};
pub use error::MappingError;
pub use lookup::closest_field;
pub use normalize::{field_variants, normalize, split_compound_words};
pub use score::{MatchKind, Similarity, best_variant, score_pair, similarity};
pub use session::{MappingSession, MappingSummary};
