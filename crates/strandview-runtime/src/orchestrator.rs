use chrono::Utc;
use strandview_engine::{DerivedView, GalleryState, board, derive_view_at, gallery_state, sort, timeline};
use strandview_types::{
    DEFAULT_FIELD_SPECS, FieldSpec, GalleryLayout, Group, SortDirection, Strand, ViewMode,
    ViewPreferences,
};

use crate::store::PreferencesStore;

/// Facade over the derivation engine plus persisted view preferences.
///
/// Holds the current strand list and a loaded preference snapshot. Every
/// mutation writes through the store synchronously; every derived read
/// recomputes from scratch, so results are always consistent with the
/// latest records and preferences. Data problems never surface here; only
/// contract violations by the caller (an unknown sort field) fail loudly.
pub struct ViewOrchestrator {
    store: PreferencesStore,
    prefs: ViewPreferences,
    strands: Vec<Strand>,
    fields: Vec<FieldSpec>,
}

impl ViewOrchestrator {
    /// Load preferences from the store and take ownership of the record
    /// list. The store stays injected so embedders control persistence.
    pub fn new(store: PreferencesStore, strands: Vec<Strand>) -> Self {
        let prefs = store.load();
        Self {
            store,
            prefs,
            strands,
            fields: DEFAULT_FIELD_SPECS.clone(),
        }
    }

    /// Replace the built-in field registry with a caller-supplied one.
    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    pub fn current_view(&self) -> ViewMode {
        self.prefs.view
    }

    pub fn preferences(&self) -> &ViewPreferences {
        &self.prefs
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Swap in a fresh record list (e.g. after the collaborator reloads
    /// the collection). Derivations pick it up on the next read.
    pub fn set_strands(&mut self, strands: Vec<Strand>) {
        self.strands = strands;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.prefs.view = view;
        self.persist();
    }

    /// Toggle sorting on a column: the active field flips direction, a new
    /// field starts ascending.
    ///
    /// Panics if `field` is not a sortable field id in the registry; that
    /// is a bug in the calling code, not a data problem.
    pub fn toggle_sort(&mut self, field: &str) {
        let spec = self
            .fields
            .iter()
            .find(|spec| spec.id == field)
            .unwrap_or_else(|| panic!("toggle_sort: unknown field id {field:?}"));
        assert!(spec.sortable, "toggle_sort: field {field:?} is not sortable");

        if self.prefs.table.sort_by == field {
            self.prefs.table.sort_direction = self.prefs.table.sort_direction.flipped();
        } else {
            self.prefs.table.sort_by = field.to_string();
            self.prefs.table.sort_direction = SortDirection::Ascending;
        }
        self.persist();
    }

    /// Change the board's grouping dimension. Collapsed-column state is
    /// reset: the old ids belong to the previous dimension's groups.
    pub fn set_group_by(&mut self, field: &str) {
        self.prefs.board.group_by = field.to_string();
        self.prefs.board.collapsed_columns.clear();
        self.persist();
    }

    /// Flip the collapsed flag for a group id in the active view. Board
    /// and timeline keep separate collapsed lists; table and gallery have
    /// nothing to collapse, so the call is ignored there.
    pub fn toggle_group_collapse(&mut self, id: &str) {
        let list = match self.prefs.view {
            ViewMode::Board => &mut self.prefs.board.collapsed_columns,
            ViewMode::Timeline => &mut self.prefs.timeline.collapsed_groups,
            ViewMode::Table | ViewMode::Gallery => return,
        };
        if let Some(position) = list.iter().position(|collapsed| collapsed == id) {
            list.remove(position);
        } else {
            list.push(id.to_string());
        }
        self.persist();
    }

    pub fn set_gallery_layout(&mut self, layout: GalleryLayout) {
        self.prefs.gallery.layout = layout;
        self.persist();
    }

    pub fn set_gallery_columns(&mut self, columns: u32) {
        self.prefs.gallery.columns = columns;
        self.persist();
    }

    /// All derived collections at once.
    pub fn derived(&self) -> DerivedView {
        derive_view_at(&self.strands, &self.prefs, Utc::now(), &self.fields)
    }

    pub fn sorted_strands(&self) -> Vec<Strand> {
        sort(
            &self.strands,
            &self.prefs.table.sort_by,
            self.prefs.table.sort_direction,
        )
    }

    pub fn board_groups(&self) -> Vec<Group> {
        board::partition(
            &self.strands,
            &self.prefs.board.group_by,
            &self.prefs.board.collapsed_columns,
        )
    }

    pub fn timeline_groups(&self) -> Vec<Group> {
        timeline::partition(&self.strands, &self.prefs.timeline.collapsed_groups)
    }

    pub fn gallery_state(&self) -> GalleryState {
        gallery_state(&self.prefs, &self.fields)
    }

    fn persist(&self) {
        self.store.save(&self.prefs);
    }
}
