//! Error types for schema normalization, compilation and prop validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::path::InstancePath;

/// Configuration-time errors raised while turning schemas into prop validators.
///
/// These are meant to abort setup; field validators never produce them.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema must be of type 'object' (got {actual})")]
    InvalidSchemaRoot { actual: &'static str },

    #[error("schema must define an object type (currently: {actual})")]
    UnsupportedSchemaType { actual: String },

    #[error("invalid schema: {message}")]
    Compilation { message: String },
}

impl SchemaError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while loading schema or props documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

/// A validation failure attributed to a single prop.
///
/// Returned by field validators, never raised. The display form embeds the
/// violation path, the engine message, the value found for the prop and the
/// component being checked.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[error("'{path}' {reason}, found {found} instead. Check propTypes of component {component}")]
pub struct PropError {
    /// Top-level prop the violation was attributed to.
    pub field: String,
    /// Location of the violation relative to the props root.
    pub path: InstancePath,
    /// Engine message for the failed rule.
    pub reason: String,
    /// JSON text of the supplied prop value, `undefined` when absent.
    pub found: String,
    /// Component name used for message context only.
    pub component: String,
}
