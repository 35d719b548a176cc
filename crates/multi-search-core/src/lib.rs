//! Multi-search core
//!
//! Profiles of search engines, the URL templates that turn one query into a
//! page per engine, and the persistence that keeps them between sessions.

pub mod dashboard;
pub mod document;
pub mod error;
pub mod layout;
pub mod model;
pub mod persistence;
pub mod store;
pub mod template;

#[cfg(not(target_arch = "wasm32"))]
pub mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub mod paths;

pub use dashboard::{frames_for, Dashboard, Frame, TileSizing};
pub use document::{validate_import, ConfigDocument, ImportOutcome, EXPORT_FILE_NAME};
pub use error::{Result, StorageError};
pub use layout::{compute_tile_height, TileLayout};
pub use model::{Engine, EnginePatch, Profile, ProfilePatch};
pub use persistence::{DroppedRecord, KeyValueStore, MemoryStore};
pub use store::{Action, ProfileStore};
pub use template::build_url;

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;
