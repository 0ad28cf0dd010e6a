pub mod error;
pub mod orchestrator;
pub mod store;

pub use error::{Error, Result};
pub use orchestrator::ViewOrchestrator;
pub use store::{
    FsBackend, MemoryBackend, PreferenceBackend, PreferencesStore, resolve_data_path,
};
