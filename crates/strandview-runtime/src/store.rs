use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use strandview_types::{PREFERENCES_KEY, ViewPreferences, ViewPreferencesUpdate};

use crate::{Error, Result};

/// Minimal key-value surface the preference store persists through.
///
/// Injected into [`PreferencesStore`] so tests and embedders can supply an
/// in-memory fake instead of the real filesystem.
pub trait PreferenceBackend {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Resolve the preference data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. STRANDVIEW_PATH environment variable (with tilde expansion)
/// 3. System data directory (recommended default)
/// 4. ~/.strandview (fallback for systems without standard data directory)
pub fn resolve_data_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: STRANDVIEW_PATH environment variable
    if let Ok(env_path) = std::env::var("STRANDVIEW_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: System data directory (recommended default)
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("strandview"));
    }

    // Priority 4: Fallback to ~/.strandview (last resort for systems without standard data directory)
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".strandview"));
    }

    Err(Error::Storage(
        "Could not determine data path: no HOME directory or system data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Filesystem backend: one JSON document per key under the data root.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            root: resolve_data_path(None)?,
        })
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl PreferenceBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, value)?;
        Ok(())
    }
}

/// In-memory backend for tests and embedders that persist elsewhere.
/// Clones share the same map, so a store can be rebuilt over it.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("preference map poisoned");
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("preference map poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads, merges, and persists view preferences under the well-known key.
///
/// Reads never fail: a missing key, an unreadable backend, or a corrupt
/// blob all fall back to the hardcoded defaults. Writes are best-effort;
/// failures are logged and swallowed so a full storage quota can never
/// take the views down.
pub struct PreferencesStore {
    backend: Box<dyn PreferenceBackend>,
}

impl PreferencesStore {
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn load(&self) -> ViewPreferences {
        match self.backend.read(PREFERENCES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(prefs) => prefs,
                Err(err) => {
                    tracing::warn!("discarding corrupt view preferences: {err}");
                    ViewPreferences::default()
                }
            },
            Ok(None) => ViewPreferences::default(),
            Err(err) => {
                tracing::warn!("failed to read view preferences: {err}");
                ViewPreferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &ViewPreferences) {
        match serde_json::to_string(prefs) {
            Ok(raw) => {
                if let Err(err) = self.backend.write(PREFERENCES_KEY, &raw) {
                    tracing::warn!("failed to persist view preferences: {err}");
                }
            }
            Err(err) => {
                tracing::warn!("failed to serialize view preferences: {err}");
            }
        }
    }

    /// Shallow per-section merge over the persisted value; the merged
    /// result is saved and returned.
    pub fn merge(&self, update: ViewPreferencesUpdate) -> ViewPreferences {
        let merged = self.load().merged(update);
        self.save(&merged);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strandview_types::{BoardPreferences, ViewMode};
    use tempfile::TempDir;

    #[test]
    fn load_without_persisted_data_returns_defaults() {
        let store = PreferencesStore::new(MemoryBackend::new());
        assert_eq!(store.load(), ViewPreferences::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let backend = MemoryBackend::new();
        let store = PreferencesStore::new(backend.clone());

        let mut prefs = ViewPreferences::default();
        prefs.view = ViewMode::Board;
        prefs.board.collapsed_columns.push("archived".to_string());
        store.save(&prefs);

        assert_eq!(store.load(), prefs);
        // A second store over the same backend sees the same data.
        assert_eq!(PreferencesStore::new(backend).load(), prefs);
    }

    #[test]
    fn corrupt_blob_falls_back_to_defaults() {
        let backend = MemoryBackend::new();
        backend
            .write(PREFERENCES_KEY, "{\"view\":\"board\",\"table\":{")
            .unwrap();
        let store = PreferencesStore::new(backend);
        assert_eq!(store.load(), ViewPreferences::default());
    }

    #[test]
    fn legacy_blob_is_filled_with_defaults() {
        let backend = MemoryBackend::new();
        backend
            .write(PREFERENCES_KEY, "{\"view\":\"gallery\"}")
            .unwrap();
        let store = PreferencesStore::new(backend);
        let prefs = store.load();
        assert_eq!(prefs.view, ViewMode::Gallery);
        assert_eq!(prefs.table, ViewPreferences::default().table);
    }

    #[test]
    fn merge_persists_the_merged_result() {
        let backend = MemoryBackend::new();
        let store = PreferencesStore::new(backend.clone());
        let update = ViewPreferencesUpdate {
            board: Some(BoardPreferences {
                group_by: "difficulty".to_string(),
                collapsed_columns: Vec::new(),
            }),
            ..Default::default()
        };
        let merged = store.merge(update);
        assert_eq!(merged.board.group_by, "difficulty");
        assert_eq!(PreferencesStore::new(backend).load(), merged);
    }

    #[test]
    fn fs_backend_round_trips_under_a_temp_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(FsBackend::at(temp_dir.path()));

        let mut prefs = ViewPreferences::default();
        prefs.gallery.columns = 5;
        store.save(&prefs);

        assert!(temp_dir.path().join(format!("{PREFERENCES_KEY}.json")).exists());
        assert_eq!(store.load(), prefs);
    }

    #[test]
    fn fs_backend_creates_missing_directories_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("state").join("views");
        let store = PreferencesStore::new(FsBackend::at(&nested));
        store.save(&ViewPreferences::default());
        assert_eq!(store.load(), ViewPreferences::default());
    }

    #[test]
    fn fs_backend_truncated_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(FsBackend::at(temp_dir.path()));
        let mut prefs = ViewPreferences::default();
        prefs.view = ViewMode::Timeline;
        store.save(&prefs);

        // Truncate the persisted blob mid-document.
        let path = temp_dir.path().join(format!("{PREFERENCES_KEY}.json"));
        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, &raw[..raw.len() / 2]).unwrap();

        assert_eq!(store.load(), ViewPreferences::default());
    }

    #[test]
    fn explicit_data_path_wins_over_environment() {
        let resolved = resolve_data_path(Some("/tmp/strandview-test")).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/strandview-test"));
    }
}
