// Engine module - Pure view derivation (extraction, ordering, partitioning)
// This layer sits between raw strand lists (types) and the rendering layer

pub mod board;
pub mod collate;
pub mod color;
pub mod extract;
pub mod sort;
pub mod timeline;

pub use collate::collate;
pub use color::color_for;
pub use extract::{extract, group_label};
pub use sort::{compare_values, sort};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strandview_types::{
    DEFAULT_FIELD_SPECS, FieldSpec, GalleryLayout, Group, Strand, ViewMode, ViewPreferences,
};

/// Gallery configuration resolved against the field registry: layout,
/// column count, and the specs for the fields a card should paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryState {
    pub layout: GalleryLayout,
    pub columns: u32,
    pub visible_fields: Vec<FieldSpec>,
}

/// Everything a renderer needs, derived from one strand list and one
/// preference snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub view: ViewMode,
    pub sorted: Vec<Strand>,
    pub board: Vec<Group>,
    pub timeline: Vec<Group>,
    pub gallery: GalleryState,
}

// Façade API - Stable public interface for the orchestration layer
// Callers should use these functions instead of the internal modules

/// Derive all view collections from the inputs. Pure aside from reading
/// the clock for timeline bucketing; call again whenever either input
/// changes and discard the previous result.
pub fn derive_view(strands: &[Strand], prefs: &ViewPreferences) -> DerivedView {
    derive_view_at(strands, prefs, Utc::now(), &DEFAULT_FIELD_SPECS)
}

/// [`derive_view`] with an explicit clock and field registry.
pub fn derive_view_at(
    strands: &[Strand],
    prefs: &ViewPreferences,
    now: DateTime<Utc>,
    fields: &[FieldSpec],
) -> DerivedView {
    DerivedView {
        view: prefs.view,
        sorted: sort::sort(strands, &prefs.table.sort_by, prefs.table.sort_direction),
        board: board::partition(strands, &prefs.board.group_by, &prefs.board.collapsed_columns),
        timeline: timeline::partition_at(strands, now, &prefs.timeline.collapsed_groups),
        gallery: gallery_state(prefs, fields),
    }
}

/// Resolve the gallery state from preferences. Visible fields follow the
/// user's table column selection so cards and rows show the same data.
pub fn gallery_state(prefs: &ViewPreferences, fields: &[FieldSpec]) -> GalleryState {
    let visible_fields = prefs
        .table
        .columns
        .iter()
        .filter_map(|id| fields.iter().find(|spec| &spec.id == id).cloned())
        .collect();
    GalleryState {
        layout: prefs.gallery.layout,
        columns: prefs.gallery.columns,
        visible_fields,
    }
}
