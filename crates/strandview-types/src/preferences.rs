use serde::{Deserialize, Serialize};

use crate::field::default_visible_columns;
use crate::view::{GalleryLayout, SortDirection, ViewMode};

/// Well-known key the serialized preferences blob is persisted under.
pub const PREFERENCES_KEY: &str = "codex-strand-view-preferences";

/// Table view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TablePreferences {
    pub columns: Vec<String>,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for TablePreferences {
    fn default() -> Self {
        Self {
            columns: default_visible_columns(),
            sort_by: "lastModified".to_string(),
            sort_direction: SortDirection::Descending,
        }
    }
}

/// Board (kanban) view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardPreferences {
    pub group_by: String,
    pub collapsed_columns: Vec<String>,
}

impl Default for BoardPreferences {
    fn default() -> Self {
        Self {
            group_by: "status".to_string(),
            collapsed_columns: Vec::new(),
        }
    }
}

/// Gallery view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryPreferences {
    pub layout: GalleryLayout,
    pub columns: u32,
}

impl Default for GalleryPreferences {
    fn default() -> Self {
        Self {
            layout: GalleryLayout::Comfortable,
            columns: 3,
        }
    }
}

/// Timeline view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelinePreferences {
    pub collapsed_groups: Vec<String>,
}

/// Complete per-view configuration.
///
/// Every section and field carries a serde default, so a legacy persisted
/// blob with fewer keys still deserializes into a fully populated
/// structure. That per-field defaulting is the back-compat mechanism; there
/// is no explicit version integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewPreferences {
    pub view: ViewMode,
    pub table: TablePreferences,
    pub board: BoardPreferences,
    pub gallery: GalleryPreferences,
    pub timeline: TimelinePreferences,
}

/// Partial preference update.
///
/// Merge is shallow per top-level section: a present section replaces the
/// stored one wholesale. Callers that want to keep prior values inside a
/// section must spread them in before merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewPreferencesUpdate {
    pub view: Option<ViewMode>,
    pub table: Option<TablePreferences>,
    pub board: Option<BoardPreferences>,
    pub gallery: Option<GalleryPreferences>,
    pub timeline: Option<TimelinePreferences>,
}

impl ViewPreferences {
    /// Apply a partial update, section by section.
    pub fn merged(mut self, update: ViewPreferencesUpdate) -> Self {
        if let Some(view) = update.view {
            self.view = view;
        }
        if let Some(table) = update.table {
            self.table = table;
        }
        if let Some(board) = update.board {
            self.board = board;
        }
        if let Some(gallery) = update.gallery {
            self.gallery = gallery;
        }
        if let Some(timeline) = update.timeline {
            self.timeline = timeline;
        }
        self
    }
}
