//! Core types shared by normalization and the validator factory.

use serde_json::Value;

use crate::prop_types::PropTypes;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a schema's `type` keyword the way it is reported in errors.
pub fn describe_type(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One input to schema normalization.
///
/// A previously built [`PropTypes`] stands in for the schema it was built from,
/// so validator sets can be extended by passing them back as fragments.
#[derive(Debug, Clone, Copy)]
pub enum Fragment<'a> {
    Schema(&'a Value),
    PropTypes(&'a PropTypes),
}

impl<'a> Fragment<'a> {
    /// The schema this fragment contributes to the merge.
    pub fn schema(&self) -> &'a Value {
        match *self {
            Fragment::Schema(schema) => schema,
            Fragment::PropTypes(prop_types) => prop_types.schema(),
        }
    }
}

impl<'a> From<&'a Value> for Fragment<'a> {
    fn from(schema: &'a Value) -> Self {
        Fragment::Schema(schema)
    }
}

impl<'a> From<&'a PropTypes> for Fragment<'a> {
    fn from(prop_types: &'a PropTypes) -> Self {
        Fragment::PropTypes(prop_types)
    }
}
