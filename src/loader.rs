//! Reading schema and props documents from disk.
//!
//! Both kinds of input are plain JSON; key order is kept so declared
//! properties come out in the order they were written.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Read a JSON document (schema fragment or props bag) from `path`.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if nothing exists at `path`,
/// `LoadError::ReadError` if it cannot be read, or `LoadError::InvalidJson`.
pub fn read_document(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::ReadError {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_document(&content)
}

/// Parse a JSON document held in memory.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if `content` isn't valid JSON.
pub fn parse_document(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}
