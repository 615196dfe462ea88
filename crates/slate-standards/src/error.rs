#![deny(unsafe_code)]

use std::path::PathBuf;

use slate_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML schema {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid schema in {path}: {message}")]
    InvalidSchema { path: PathBuf, message: String },

    #[error("invalid definition for entity {entity}: {source}")]
    Model {
        entity: String,
        #[source]
        source: ModelError,
    },

    #[error("entity already registered: {key}")]
    DuplicateEntity { key: String },

    #[error("unknown entity: {key}")]
    UnknownEntity { key: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            message: message.into(),
        }
    }
}
