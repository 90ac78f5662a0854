//! Error types for loading and registering config tables.
//!
//! Every failure on the load path is handed back to the caller. Nothing here is
//! logged and swallowed; the [`super::ConfigRegistry`] only adds a warning line
//! on top of returning the error.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The payload could not be turned into rows by the table's decoder.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("protobuf decode failed: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("resource not found or unreadable: {}", path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("duplicate id {id} in table '{table}'")]
    DuplicateId { table: String, id: i32 },

    #[error("load of table '{0}' was interrupted before it finished")]
    Interrupted(String),
}

impl LoadError {
    /// Short, stable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
            LoadError::Decode { .. } => "DECODE_ERROR",
            LoadError::DuplicateId { .. } => "DUPLICATE_ID",
            LoadError::Interrupted(_) => "INTERRUPTED",
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("table '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("table '{0}' is not registered")]
    UnknownTable(String),

    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: String, value: String },

    #[error("cannot read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}
