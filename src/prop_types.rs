//! Validator factory - one prop validator per declared schema property.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::attribute::field_error;
use crate::engine::{Checker, Compiler};
use crate::error::{PropError, SchemaError};
use crate::normalize::normalize;
use crate::types::Fragment;

/// Validator for a single prop, sharing its set's compiled schema.
///
/// Each call checks the whole props bag so cross-field rules such as
/// `required` still apply, then keeps only the violation relevant to the
/// requested field.
#[derive(Clone)]
pub struct FieldValidator {
    field: String,
    checker: Arc<dyn Checker>,
}

impl FieldValidator {
    /// The prop this validator was built for.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Validate `field` of `props`, following the host's three-argument
    /// prop-validator contract.
    ///
    /// # Errors
    ///
    /// Returns the first violation attributed to `field`. Violations that
    /// concern other props are ignored.
    pub fn validate(
        &self,
        props: &Value,
        field: &str,
        component: Option<&str>,
    ) -> Result<(), PropError> {
        let violations = self.checker.check(props);
        trace!(field, violations = violations.len(), "checked props");
        field_error(&violations, props, field, component)
    }

    /// Validate the prop this validator was built for.
    pub fn check(&self, props: &Value, component: Option<&str>) -> Result<(), PropError> {
        self.validate(props, &self.field, component)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// The validator set built from one (possibly merged) object schema.
///
/// Keeps the schema it was built from so it can be passed back to [`build`]
/// as a [`Fragment`] and extended.
#[derive(Clone)]
pub struct PropTypes {
    schema: Value,
    checker: Option<Arc<dyn Checker>>,
    validators: IndexMap<String, FieldValidator>,
}

impl PropTypes {
    /// The normalized schema these validators were built from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn get(&self, field: &str) -> Option<&FieldValidator> {
        self.validators.get(field)
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValidator)> {
        self.validators.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validate every declared prop with a single check of `props`.
    ///
    /// Returns one error per prop that has an attributed violation, in
    /// declaration order. Equivalent to calling each field validator in turn.
    pub fn validate(&self, props: &Value, component: Option<&str>) -> Vec<PropError> {
        let Some(checker) = &self.checker else {
            return Vec::new();
        };

        let violations = checker.check(props);
        if violations.is_empty() {
            return Vec::new();
        }

        self.fields()
            .filter_map(|field| field_error(&violations, props, field, component).err())
            .collect()
    }
}

impl fmt::Debug for PropTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropTypes")
            .field("fields", &self.validators.keys().collect::<Vec<_>>())
            .field("schema", &self.schema)
            .finish()
    }
}

/// Build prop validators from a primary schema and override fragments.
///
/// The fragments are normalized into one object schema, which is compiled
/// once when it declares `properties`. Every field validator shares that
/// compiled schema.
///
/// # Errors
///
/// Returns `SchemaError::InvalidSchemaRoot` or `SchemaError::UnsupportedSchemaType`
/// from normalization, or `SchemaError::Compilation` if the engine rejects
/// the merged schema.
pub fn build<C>(
    engine: &C,
    primary: Fragment<'_>,
    overrides: &[Fragment<'_>],
) -> Result<PropTypes, SchemaError>
where
    C: Compiler + ?Sized,
{
    let schema = normalize(primary, overrides)?;

    let Some(properties) = schema.get("properties").filter(|p| !p.is_null()) else {
        debug!("schema declares no properties");
        return Ok(PropTypes {
            schema,
            checker: None,
            validators: IndexMap::new(),
        });
    };

    let checker = engine.compile(&schema)?;
    let validators: IndexMap<String, FieldValidator> = properties
        .as_object()
        .into_iter()
        .flat_map(|props| props.keys())
        .map(|field| {
            let validator = FieldValidator {
                field: field.clone(),
                checker: Arc::clone(&checker),
            };
            (field.clone(), validator)
        })
        .collect();

    debug!(fields = validators.len(), "built prop validators");
    Ok(PropTypes {
        schema,
        checker: Some(checker),
        validators,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{JsonSchemaEngine, Violation};
    use crate::path::InstancePath;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn id_schema() -> Value {
        json!({
            "type": "object",
            "description": "PropTypes for some component",
            "properties": { "id": { "type": "string" } }
        })
    }

    /// Counts compilations and reports every instance as valid.
    #[derive(Default)]
    struct CountingEngine {
        compiled: AtomicUsize,
    }

    struct AlwaysValid;

    impl Checker for AlwaysValid {
        fn check(&self, _instance: &Value) -> Vec<Violation> {
            Vec::new()
        }
    }

    impl Compiler for CountingEngine {
        fn compile(&self, _schema: &Value) -> Result<Arc<dyn Checker>, SchemaError> {
            self.compiled.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(AlwaysValid))
        }
    }

    struct RootOnly;

    impl Checker for RootOnly {
        fn check(&self, _instance: &Value) -> Vec<Violation> {
            vec![Violation::new(InstancePath::root(), "not allowed")]
        }
    }

    struct RootOnlyEngine;

    impl Compiler for RootOnlyEngine {
        fn compile(&self, _schema: &Value) -> Result<Arc<dyn Checker>, SchemaError> {
            Ok(Arc::new(RootOnly))
        }
    }

    #[test]
    fn compiles_once_for_all_fields() {
        let engine = CountingEngine::default();
        let schema = json!({
            "type": "object",
            "properties": { "a": {}, "b": {}, "c": {} }
        });
        let prop_types = build(&engine, Fragment::from(&schema), &[]).unwrap();
        assert_eq!(prop_types.len(), 3);
        assert_eq!(engine.compiled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn null_properties_builds_empty_set() {
        let engine = CountingEngine::default();
        let schema = json!({ "type": "object", "properties": null });
        let prop_types = build(&engine, Fragment::from(&schema), &[]).unwrap();
        assert!(prop_types.is_empty());
        assert_eq!(prop_types.schema(), &schema);
        assert_eq!(engine.compiled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_properties_skips_compilation() {
        let engine = CountingEngine::default();
        let schema = json!({ "type": "object" });
        let prop_types = build(&engine, Fragment::from(&schema), &[]).unwrap();
        assert!(prop_types.is_empty());
        assert_eq!(prop_types.schema(), &schema);
        assert_eq!(engine.compiled.load(Ordering::SeqCst), 0);
        assert!(prop_types.validate(&json!({ "x": 1 }), None).is_empty());
    }

    #[test]
    fn unattributable_violation_is_ignored() {
        let schema = id_schema();
        let prop_types = build(&RootOnlyEngine, Fragment::from(&schema), &[]).unwrap();
        let id = prop_types.get("id").unwrap();
        assert!(id.check(&json!({ "id": "x" }), None).is_ok());
        assert!(prop_types.validate(&json!({}), None).is_empty());
    }

    #[test]
    fn works_with_trait_object_engine() {
        let engine: Box<dyn Compiler> = Box::new(JsonSchemaEngine::default());
        let schema = id_schema();
        let prop_types = build(engine.as_ref(), Fragment::from(&schema), &[]).unwrap();
        assert_eq!(prop_types.fields().collect::<Vec<_>>(), ["id"]);
    }

    #[test]
    fn field_validator_uses_call_time_name() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "string" }, "b": { "type": "string" } }
        });
        let prop_types =
            build(&JsonSchemaEngine::default(), Fragment::from(&schema), &[]).unwrap();
        let a = prop_types.get("a").unwrap();
        let props = json!({ "a": "ok", "b": 2 });
        assert!(a.check(&props, None).is_ok());
        assert_eq!(a.validate(&props, "b", None).unwrap_err().field, "b");
    }

    #[test]
    fn batch_validation_matches_field_validators() {
        let schema = json!({
            "type": "object",
            "required": ["a"],
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "number" },
                "c": { "type": "boolean" }
            }
        });
        let prop_types =
            build(&JsonSchemaEngine::default(), Fragment::from(&schema), &[]).unwrap();
        let props = json!({ "b": "nope", "c": true });

        let batch = prop_types.validate(&props, Some("Widget"));
        let individual: Vec<PropError> = prop_types
            .iter()
            .filter_map(|(field, v)| v.validate(&props, field, Some("Widget")).err())
            .collect();

        assert_eq!(batch, individual);
        assert_eq!(
            batch.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
            ["a", "b"]
        );
    }

    #[test]
    fn debug_lists_fields() {
        let schema = id_schema();
        let prop_types =
            build(&JsonSchemaEngine::default(), Fragment::from(&schema), &[]).unwrap();
        let rendered = format!("{:?}", prop_types);
        assert!(rendered.contains("\"id\""));
        assert!(format!("{:?}", prop_types.get("id").unwrap()).contains("id"));
    }
}
