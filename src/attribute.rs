//! Attribution of whole-object violations to individual props.
//!
//! The checker reports every failure for the props bag at once. A field
//! validator only surfaces the first violation that concerns its own field:
//!
//! | Violation | Attributed to |
//! |-----------|---------------|
//! | path `.a` or anything below it (`.a.b`, `.a[0]`) | `a` |
//! | missing required property `a`, at any path | `a` |
//! | anything else | nobody |

use serde_json::Value;

use crate::engine::Violation;
use crate::error::PropError;

/// Component name used when the caller does not supply one.
pub const ANONYMOUS_COMPONENT: &str = "<<anonymous>>";

impl Violation {
    /// Returns true if this violation concerns the top-level prop `field`.
    pub fn belongs_to(&self, field: &str) -> bool {
        if self.path.starts_with_field(field) {
            return true;
        }
        self.missing_property.as_deref() == Some(field)
    }
}

/// Find the first violation relevant to `field`, in engine order.
pub fn attribute<'a>(violations: &'a [Violation], field: &str) -> Option<&'a Violation> {
    violations.iter().find(|v| v.belongs_to(field))
}

impl PropError {
    /// Build the error reported for `field` from its attributed violation.
    pub fn from_violation(
        violation: &Violation,
        props: &Value,
        field: &str,
        component: Option<&str>,
    ) -> Self {
        let found = props
            .get(field)
            .map(Value::to_string)
            .unwrap_or_else(|| "undefined".to_string());

        Self {
            field: field.to_string(),
            path: violation.path.clone(),
            reason: violation.message.clone(),
            found,
            component: component.unwrap_or(ANONYMOUS_COMPONENT).to_string(),
        }
    }
}

/// Attribute `violations` to `field` and build its error, if any.
pub fn field_error(
    violations: &[Violation],
    props: &Value,
    field: &str,
    component: Option<&str>,
) -> Result<(), PropError> {
    match attribute(violations, field) {
        Some(violation) => Err(PropError::from_violation(
            violation, props, field, component,
        )),
        None => Ok(()),
    }
}
