//! Schema Prop Types
//!
//! Turns a JSON Schema object description into per-field prop validators.
//!
//! Every declared property gets a validator that checks the whole props bag
//! against the schema, then reports only the violation that concerns its own
//! field. Nested failures are attributed to their top-level prop, and missing
//! `required` properties to the prop they name.
//!
//! # Example
//!
//! ```
//! use schema_prop_types::{build, Fragment, JsonSchemaEngine};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["a"],
//!     "properties": {
//!         "a": { "type": "string" },
//!         "b": { "type": "string" }
//!     }
//! });
//!
//! let engine = JsonSchemaEngine::default();
//! let prop_types = build(&engine, Fragment::from(&schema), &[]).unwrap();
//!
//! let props = json!({});
//! assert!(prop_types.get("a").unwrap().validate(&props, "a", Some("Card")).is_err());
//! assert!(prop_types.get("b").unwrap().validate(&props, "b", Some("Card")).is_ok());
//! ```
//!
//! # Extending
//!
//! A built [`PropTypes`] remembers its schema and can be merged again:
//!
//! ```
//! use schema_prop_types::{build, Fragment, JsonSchemaEngine};
//! use serde_json::json;
//!
//! let engine = JsonSchemaEngine::default();
//! let base = json!({ "type": "object", "properties": { "id": { "type": "string" } } });
//! let base_types = build(&engine, Fragment::from(&base), &[]).unwrap();
//!
//! let extra = json!({ "properties": { "name": { "type": "string" } } });
//! let extended = build(&engine, Fragment::from(&base_types), &[Fragment::from(&extra)]).unwrap();
//! assert_eq!(extended.fields().collect::<Vec<_>>(), ["id", "name"]);
//! ```

mod attribute;
mod engine;
mod error;
mod loader;
mod merge;
mod normalize;
mod path;
mod prop_types;
mod types;

pub use attribute::{attribute, field_error, ANONYMOUS_COMPONENT};
pub use engine::{parse_draft, Checker, Compiler, EngineOptions, JsonSchemaEngine, Violation};
pub use error::{LoadError, PropError, SchemaError};
pub use loader::{parse_document, read_document};
pub use merge::{deep_merge, merge_all};
pub use normalize::normalize;
pub use path::{InstancePath, PathSegment};
pub use prop_types::{build, FieldValidator, PropTypes};
pub use types::{describe_type, json_type_name, Fragment};

pub use jsonschema::Draft;
