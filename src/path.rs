//! Structured instance paths for locating violations inside a props bag.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};
use serde_json::Value;

/// One step from a value to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

/// Location of a value relative to the props root.
///
/// An empty path addresses the root itself, which is where "missing required
/// property" violations are reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse an RFC 6901 JSON Pointer reported by the validation engine.
    ///
    /// Numeric tokens only become [`PathSegment::Index`] when they address an
    /// element of an array inside `instance`; an object member named `"0"` stays
    /// a key.
    pub fn from_pointer(pointer: &str, instance: &Value) -> Self {
        let mut segments = Vec::new();
        let mut current = Some(instance);

        for token in pointer.split('/').skip(1) {
            // Unescape JSON Pointer encoding (~1 = /, ~0 = ~)
            let key = token.replace("~1", "/").replace("~0", "~");
            match (current, key.parse::<usize>()) {
                (Some(Value::Array(items)), Ok(idx)) => {
                    current = items.get(idx);
                    segments.push(PathSegment::Index(idx));
                }
                (parent, _) => {
                    current = parent.and_then(|v| v.get(&key));
                    segments.push(PathSegment::Key(key));
                }
            }
        }

        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn first(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    /// Returns true if this path is the top-level member `name` or lies below it.
    ///
    /// Comparison is per segment, so `"ab"` never matches a path under `"a"`.
    pub fn starts_with_field(&self, name: &str) -> bool {
        matches!(self.first(), Some(PathSegment::Key(key)) if key == name)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) if is_identifier(key) => write!(f, ".{}", key)?,
                PathSegment::Key(key) => {
                    write!(f, "['{}']", key.replace('\\', "\\\\").replace('\'', "\\'"))?
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for InstancePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
