use serde::{Deserialize, Serialize};

use crate::strand::Strand;

/// Active presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Table,
    Board,
    Gallery,
    Timeline,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Table
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Ascending
    }
}

/// Card density for the gallery view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryLayout {
    Comfortable,
    Compact,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        Self::Comfortable
    }
}

/// Board column or timeline bucket.
///
/// Groups are a projection rebuilt on every derivation pass, never stored.
/// `is_collapsed` is looked up from persisted preferences at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub strands: Vec<Strand>,
    pub is_collapsed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ViewMode::Timeline).unwrap(), "\"timeline\"");
    }

    #[test]
    fn flipping_direction_twice_is_identity() {
        assert_eq!(SortDirection::Ascending.flipped().flipped(), SortDirection::Ascending);
    }
}
