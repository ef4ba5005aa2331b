//! Extraction results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-field value returned by the extraction engine.
///
/// Only `value` is interpreted; everything else the engine returns
/// (confidence, sources, reasoning) is carried in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    #[serde(default)]
    pub value: Value,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl EnrichmentResult {
    /// Create a result with just a value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra key (e.g., "confidence", "source").
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether the value counts as found.
    ///
    /// Null, `false`, zero and the empty string are treated as not found.
    /// Arrays and objects always count, even when empty.
    pub fn has_value(&self) -> bool {
        match &self.value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// Field name to result, in the order the engine returned them.
pub type Enrichments = IndexMap<String, EnrichmentResult>;
