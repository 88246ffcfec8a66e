//! Schema normalization - merges fragments into one object schema.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SchemaError;
use crate::merge::merge_all;
use crate::types::{describe_type, json_type_name, Fragment};

/// Merge a primary schema and its overrides into one canonical object schema.
///
/// Fragments backed by a [`PropTypes`](crate::PropTypes) contribute the schema
/// they were built from. Later fragments override earlier ones key by key.
/// Override fragments that are not JSON objects are skipped.
///
/// # Errors
///
/// Returns `SchemaError::InvalidSchemaRoot` if `primary` is not a JSON object,
/// or `SchemaError::UnsupportedSchemaType` if the merged `type` is not `"object"`.
pub fn normalize(primary: Fragment<'_>, overrides: &[Fragment<'_>]) -> Result<Value, SchemaError> {
    let root = primary.schema();
    if !root.is_object() {
        return Err(SchemaError::InvalidSchemaRoot {
            actual: json_type_name(root),
        });
    }

    let accepted = overrides.iter().enumerate().filter_map(|(index, fragment)| {
        let schema = fragment.schema();
        if schema.is_object() {
            return Some(schema);
        }
        warn!(
            index,
            kind = json_type_name(schema),
            "ignoring non-object schema fragment"
        );
        None
    });
    let merged = merge_all(std::iter::once(root).chain(accepted));

    match merged.get("type") {
        Some(Value::String(t)) if t == "object" => {
            debug!(fragments = overrides.len() + 1, "normalized schema");
            Ok(merged)
        }
        other => Err(SchemaError::UnsupportedSchemaType {
            actual: describe_type(other),
        }),
    }
}
