use chrono::{DateTime, Utc};
use serde_json::Value;
use strandview_types::{FieldValue, Strand};

/// Extract a comparison-ready value for a logical field.
///
/// Total over any record shape: absent or malformed data resolves to the
/// documented fallback for that field, never an error. Textual values are
/// lowercased here so every comparison downstream sees one casing.
pub fn extract(strand: &Strand, field: &str) -> FieldValue {
    match field {
        "title" => FieldValue::Text(sort_title(strand)),
        "lastModified" | "last_modified" => match last_modified(strand) {
            Some(ts) => FieldValue::Number(ts.timestamp_millis() as f64),
            None => FieldValue::Missing,
        },
        "difficulty" => {
            let ordinal = difficulty_name(strand)
                .and_then(|name| difficulty_ordinal(&name))
                .unwrap_or(DIFFICULTY_DEFAULT_ORDINAL);
            FieldValue::Ordinal(ordinal)
        }
        "status" | "publishing" => {
            let ordinal = status_name(strand)
                .and_then(|name| status_ordinal(&name))
                .unwrap_or(STATUS_DEFAULT_ORDINAL);
            FieldValue::Ordinal(ordinal)
        }
        "weave" => text_or_missing(strand.weave.as_deref()),
        "loom" => text_or_missing(strand.loom.as_deref()),
        _ => metadata_value(strand, field),
    }
}

/// Group key for a strand under a grouping field.
///
/// Unlike [`extract`], this keeps unrecognized values (they become their
/// own discovered groups) and substitutes a per-field fallback label when
/// the value is absent.
pub fn group_label(strand: &Strand, field: &str) -> String {
    match field {
        "status" | "publishing" => status_name(strand)
            .map(|name| name.to_lowercase())
            .unwrap_or_else(|| STATUS_DEFAULT_LABEL.to_string()),
        "difficulty" => difficulty_name(strand)
            .map(|name| name.to_lowercase())
            .unwrap_or_else(|| DIFFICULTY_DEFAULT_LABEL.to_string()),
        "weave" => non_empty_lower(strand.weave.as_deref()).unwrap_or_else(|| "unknown".to_string()),
        "loom" | "subject" | "topic" => {
            let value = match field {
                "loom" => non_empty_lower(strand.loom.as_deref()),
                _ => non_empty_text(metadata_value(strand, field)),
            };
            value.unwrap_or_else(|| "uncategorized".to_string())
        }
        _ => non_empty_text(metadata_value(strand, field)).unwrap_or_else(|| "other".to_string()),
    }
}

/// Uniform default for unknown publishing status, applied to both sorting
/// and grouping.
const STATUS_DEFAULT_LABEL: &str = "draft";
const STATUS_DEFAULT_ORDINAL: u8 = 1;

/// Unrecognized difficulty is assumed to sit in the middle of the range.
const DIFFICULTY_DEFAULT_LABEL: &str = "intermediate";
const DIFFICULTY_DEFAULT_ORDINAL: u8 = 1;

pub(crate) fn difficulty_ordinal(name: &str) -> Option<u8> {
    match name.to_lowercase().as_str() {
        "beginner" => Some(0),
        "intermediate" => Some(1),
        "advanced" => Some(2),
        _ => None,
    }
}

pub(crate) fn status_ordinal(name: &str) -> Option<u8> {
    match name.to_lowercase().as_str() {
        "published" => Some(0),
        "draft" => Some(1),
        "archived" => Some(2),
        _ => None,
    }
}

/// Title used for sorting: the record title when present, otherwise the
/// last path segment. Lowercased.
fn sort_title(strand: &Strand) -> String {
    let title = strand
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| last_path_segment(&strand.path));
    title.to_lowercase()
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or(path)
}

/// Parsed modification timestamp. `None` for absent or unparsable values;
/// callers decide whether that means "missing" (table sort) or epoch zero
/// (timeline recency).
pub(crate) fn last_modified(strand: &Strand) -> Option<DateTime<Utc>> {
    strand
        .last_modified
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Difficulty name from either the scalar or `{overall}` object shape.
fn difficulty_name(strand: &Strand) -> Option<String> {
    match strand.metadata.get("difficulty") {
        Some(Value::String(name)) => Some(name.clone()),
        Some(Value::Object(fields)) => fields
            .get("overall")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn status_name(strand: &Strand) -> Option<String> {
    strand
        .metadata
        .get("publishing")?
        .as_object()?
        .get("status")?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Generic lookup in the metadata bag for fields without bespoke rules.
fn metadata_value(strand: &Strand, field: &str) -> FieldValue {
    match strand.metadata.get(field) {
        Some(Value::String(s)) => FieldValue::Text(s.to_lowercase()),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            FieldValue::Text(joined.to_lowercase())
        }
        Some(Value::Number(n)) => FieldValue::Number(n.as_f64().unwrap_or(0.0)),
        _ => FieldValue::Text(String::new()),
    }
}

fn text_or_missing(value: Option<&str>) -> FieldValue {
    match non_empty_lower(value) {
        Some(text) => FieldValue::Text(text),
        None => FieldValue::Missing,
    }
}

fn non_empty_lower(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn non_empty_text(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) if !s.trim().is_empty() => Some(s),
        FieldValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
