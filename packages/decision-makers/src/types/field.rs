//! Requested data fields.

use serde::{Deserialize, Serialize};

/// A caller-requested data field.
///
/// Identity is the `name`. Any extra keys supplied by the caller's field
/// schema are preserved in `metadata` and passed through to the extraction
/// engine untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (e.g., "ceo", "founder_name", "industry")
    pub name: String,

    /// Natural-language description of the field
    #[serde(default)]
    pub description: String,

    /// Caller-defined metadata (type hints, formats, etc.)
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Lower-cased name and description, used by the classifier rules.
    pub(crate) fn lowered(&self) -> (String, String) {
        (self.name.to_lowercase(), self.description.to_lowercase())
    }
}

/// Classification of a requested field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldClass {
    /// Executive/role field, answered through people search.
    Executive,

    /// Any other company attribute.
    Other,
}
