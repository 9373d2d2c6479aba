//! Immutable metric documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One metric document as returned by Logstash for a single resource.
///
/// The tree is opaque to the transport layer; the diagnostic engine reads
/// it through the path accessors below. Snapshots are never mutated once
/// built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Value);

impl Snapshot {
    /// Wrap a parsed JSON document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the snapshot, returning the document.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up a nested value by key path.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |node, key| node.get(key))
    }

    /// Look up a nested number by key path.
    ///
    /// Integers and floats both come back as `f64`.
    pub fn number(&self, path: &[&str]) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Look up a nested object by key path, treating `{}` as absent.
    pub fn object(&self, path: &[&str]) -> Option<&Map<String, Value>> {
        self.get(path)
            .and_then(Value::as_object)
            .filter(|map| !map.is_empty())
    }
}

impl From<Value> for Snapshot {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
