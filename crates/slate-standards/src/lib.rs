#![deny(unsafe_code)]

pub mod builtin;
pub mod error;
pub mod registry;
pub mod schema_file;

pub use crate::error::StandardsError;
pub use crate::registry::{SchemaRegistry, load_default_registry};
pub use crate::schema_file::{load_schema_file, parse_schema_toml};
