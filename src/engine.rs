//! Validation engine seam.
//!
//! The factory only needs two things from a JSON Schema implementation: compile
//! a schema once, then check whole instances and list structural violations.
//! [`Compiler`] and [`Checker`] describe that contract; [`JsonSchemaEngine`]
//! provides it on top of the `jsonschema` crate.

use std::sync::Arc;

use jsonschema::{Draft, ValidationError, Validator};
use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;
use crate::path::InstancePath;

/// One structural failure reported by a [`Checker`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    /// Location of the offending value. Root for missing required properties.
    pub path: InstancePath,
    /// Human-readable message fragment.
    pub message: String,
    /// Name of the missing property for `required` failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_property: Option<String>,
}

impl Violation {
    pub fn new(path: InstancePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            missing_property: None,
        }
    }

    pub fn missing(
        path: InstancePath,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            message: message.into(),
            missing_property: Some(property.into()),
        }
    }

    fn from_error(error: &ValidationError<'_>, instance: &Value) -> Self {
        let path = InstancePath::from_pointer(&error.instance_path.to_string(), instance);
        let message = error.to_string();
        match &error.kind {
            jsonschema::error::ValidationErrorKind::Required { property } => {
                let property = match property {
                    Value::String(name) => name.clone(),
                    other => other.to_string(),
                };
                Self::missing(path, property, message)
            }
            _ => Self::new(path, message),
        }
    }
}

/// A compiled schema. Stateless and shareable across threads.
pub trait Checker: Send + Sync {
    /// Check a whole instance. An empty list means the instance is valid.
    fn check(&self, instance: &Value) -> Vec<Violation>;
}

/// Turns schemas into [`Checker`]s.
pub trait Compiler {
    /// # Errors
    ///
    /// Returns `SchemaError::Compilation` when the schema itself is malformed.
    fn compile(&self, schema: &Value) -> Result<Arc<dyn Checker>, SchemaError>;
}

/// Options for [`JsonSchemaEngine`].
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Meta-schema to compile against. `None` detects it from `$schema`.
    pub draft: Option<Draft>,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the JSON Schema draft.
    pub fn draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }
}

/// Parse a draft name as accepted on the command line.
///
/// Returns `None` for unknown values (caller should error).
pub fn parse_draft(s: &str) -> Option<Draft> {
    match s.trim_start_matches("draft").trim_start_matches('-') {
        "4" | "04" => Some(Draft::Draft4),
        "6" | "06" => Some(Draft::Draft6),
        "7" | "07" => Some(Draft::Draft7),
        "2019-09" => Some(Draft::Draft201909),
        "2020-12" => Some(Draft::Draft202012),
        _ => None,
    }
}

/// [`Compiler`] backed by the `jsonschema` crate.
///
/// The draft is fixed when the engine is constructed; compiled checkers never
/// consult shared state afterwards.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaEngine {
    options: EngineOptions,
}

impl JsonSchemaEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }
}

impl Compiler for JsonSchemaEngine {
    fn compile(&self, schema: &Value) -> Result<Arc<dyn Checker>, SchemaError> {
        let validator = match self.options.draft {
            Some(draft) => jsonschema::options().with_draft(draft).build(schema),
            None => jsonschema::validator_for(schema),
        }
        .map_err(|e| SchemaError::Compilation {
            message: e.to_string(),
        })?;

        debug!(draft = ?self.options.draft, "compiled schema");
        Ok(Arc::new(CompiledSchema { validator }))
    }
}

struct CompiledSchema {
    validator: Validator,
}

impl Checker for CompiledSchema {
    fn check(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation::from_error(&e, instance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;
    use serde_json::json;

    fn compile(schema: Value) -> Arc<dyn Checker> {
        JsonSchemaEngine::default().compile(&schema).unwrap()
    }

    #[test]
    fn valid_instance_has_no_violations() {
        let checker = compile(json!({
            "type": "object",
            "properties": { "id": { "type": "string" } }
        }));
        assert!(checker.check(&json!({ "id": "x" })).is_empty());
    }

    #[test]
    fn type_violation_carries_path() {
        let checker = compile(json!({
            "type": "object",
            "properties": { "id": { "type": "string" } }
        }));
        let violations = checker.check(&json!({ "id": 15 }));
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].path.segments(),
            &[PathSegment::Key("id".into())]
        );
        assert!(violations[0].missing_property.is_none());
    }

    #[test]
    fn required_violation_names_property() {
        let checker = compile(json!({
            "type": "object",
            "required": ["a"],
            "properties": { "a": { "type": "string" } }
        }));
        let violations = checker.check(&json!({}));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].path.is_root());
        assert_eq!(violations[0].missing_property.as_deref(), Some("a"));
    }

    #[test]
    fn array_items_get_index_segments() {
        let checker = compile(json!({
            "type": "object",
            "properties": {
                "tags": { "type": "array", "items": { "type": "string" } }
            }
        }));
        let violations = checker.check(&json!({ "tags": ["ok", 3] }));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path.to_string(), ".tags[1]");
    }

    #[test]
    fn malformed_schema_fails_compilation() {
        let result = JsonSchemaEngine::default().compile(&json!({
            "type": "object",
            "properties": { "a": { "type": "nonsense" } }
        }));
        assert!(matches!(result, Err(SchemaError::Compilation { .. })));
    }

    #[test]
    fn pinned_draft_compiles() {
        let engine = JsonSchemaEngine::new(EngineOptions::new().draft(Draft::Draft4));
        let checker = engine
            .compile(&json!({
                "type": "object",
                "properties": { "n": { "type": "number" } }
            }))
            .unwrap();
        assert_eq!(checker.check(&json!({ "n": "x" })).len(), 1);
    }

    #[test]
    fn parse_draft_names() {
        assert!(matches!(parse_draft("4"), Some(Draft::Draft4)));
        assert!(matches!(parse_draft("draft-07"), Some(Draft::Draft7)));
        assert!(matches!(parse_draft("2020-12"), Some(Draft::Draft202012)));
        assert!(parse_draft("5").is_none());
    }
}
