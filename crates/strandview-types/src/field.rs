use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Extracted, comparison-ready value for one logical field of a strand.
///
/// A closed set of kinds so comparators never probe runtime types beyond
/// this enum. Extraction is total: malformed or absent data resolves to a
/// fallback kind, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// Position in a fixed enum order (difficulty, status).
    Ordinal(u8),
    Missing,
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Numeric form shared by `Number` and `Ordinal`, for cross-kind
    /// numeric comparison.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Ordinal(o) => Some(f64::from(*o)),
            _ => None,
        }
    }

    /// Textual form used when a comparison falls back to string ordering.
    pub fn text_form(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Ordinal(o) => o.to_string(),
            FieldValue::Missing => String::new(),
        }
    }
}

/// Column descriptor consumed by the table and gallery views.
///
/// Defined statically or supplied by the caller; never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    /// Logical field name fed to the extractor.
    pub field: String,
    pub sortable: bool,
    pub default_visible: bool,
}

impl FieldSpec {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        field: impl Into<String>,
        sortable: bool,
        default_visible: bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field: field.into(),
            sortable,
            default_visible,
        }
    }
}

/// Built-in field set for strand collections.
pub static DEFAULT_FIELD_SPECS: Lazy<Vec<FieldSpec>> = Lazy::new(|| {
    vec![
        FieldSpec::new("title", "Title", "title", true, true),
        FieldSpec::new("weave", "Weave", "weave", true, true),
        FieldSpec::new("loom", "Loom", "loom", true, false),
        FieldSpec::new("difficulty", "Difficulty", "difficulty", true, true),
        FieldSpec::new("status", "Status", "status", true, true),
        FieldSpec::new("lastModified", "Modified", "lastModified", true, true),
        FieldSpec::new("tags", "Tags", "tags", false, false),
    ]
});

/// Ids of the columns shown before the user customizes anything.
pub fn default_visible_columns() -> Vec<String> {
    DEFAULT_FIELD_SPECS
        .iter()
        .filter(|spec| spec.default_visible)
        .map(|spec| spec.id.clone())
        .collect()
}
