//! Deep merge of JSON schema fragments.

use serde_json::{Map, Value};

/// Merge `source` into `target`, last writer wins.
///
/// Objects merge member by member, recursively. Any other source value,
/// arrays and `null` included, replaces the target value wholesale.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Fold every value into a fresh empty object, in order.
pub fn merge_all<'a>(values: impl IntoIterator<Item = &'a Value>) -> Value {
    let mut merged = Value::Object(Map::new());
    for value in values {
        deep_merge(&mut merged, value);
    }
    merged
}
