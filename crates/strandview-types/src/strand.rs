use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single document in the collection being viewed.
///
/// `path` is the sole stable identity. Every other field is optional,
/// user-authored, and may be absent or mis-shaped; consumers must fall back
/// rather than fail. Serialization uses camelCase because strand lists are
/// produced by external loaders (frontmatter indexes, REST responses) that
/// speak that convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strand {
    /// Unique identifier (never empty).
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weave: Option<String>,

    /// Subcategory label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loom: Option<String>,

    /// ISO-8601 modification timestamp, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// Open metadata bag. Known keys include `tags` (string or array),
    /// `difficulty` (string or `{overall}`), and `publishing.status`.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Strand {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            weave: None,
            loom: None,
            last_modified: None,
            metadata: Map::new(),
        }
    }
}
