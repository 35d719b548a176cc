//! Dashboard state container
//!
//! Owns the profile store and a key-value backend. Every mutation that
//! changes the store is persisted synchronously before returning.

use serde_json::Value;
use tracing::{debug, info};

use crate::document::{validate_import, ConfigDocument, ImportOutcome};
use crate::error::Result;
use crate::model::Profile;
use crate::persistence::{load, save, KeyValueStore};
use crate::store::{Action, ProfileStore};
use crate::template::build_url;

/// One embedded frame of the active profile
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub engine_id: String,
    pub name: String,
    pub url: String,
}

/// Effective tile sizing of a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSizing {
    pub min_width: f64,
    pub min_height: f64,
}

impl TileSizing {
    pub fn of(profile: &Profile) -> Self {
        Self {
            min_width: profile.effective_min_width(),
            min_height: profile.effective_min_height(),
        }
    }
}

impl Default for TileSizing {
    fn default() -> Self {
        let fallback = Profile::new("", "", Vec::new());
        Self::of(&fallback)
    }
}

/// Frames for every engine of `profile`
pub fn frames_for(profile: &Profile, submitted_query: &str) -> Vec<Frame> {
    profile
        .engines
        .iter()
        .map(|engine| Frame {
            engine_id: engine.id.clone(),
            name: engine.name.clone(),
            url: build_url(&engine.url_template, submitted_query),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Dashboard<S> {
    store: ProfileStore,
    storage: S,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Start from the built-in profiles and apply whatever storage holds
    pub fn open(storage: S) -> Self {
        let mut store = ProfileStore::default();
        load(&storage, &mut store);
        Self { store, storage }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply a store action, persisting if it changed anything
    pub fn dispatch(&mut self, action: Action) -> bool {
        let changed = self.store.apply(action);
        if changed {
            self.persist();
        } else {
            debug!("Action left the store unchanged");
        }
        changed
    }

    /// Add an engine and return its generated id
    pub fn add_engine(&mut self, profile_id: &str) -> Option<String> {
        let id = self.store.add_engine(profile_id)?;
        self.persist();
        Some(id)
    }

    /// Write the current state; failures are logged and dropped
    pub fn persist(&mut self) {
        save(&mut self.storage, &self.store);
    }

    pub fn export_document(&self) -> ConfigDocument {
        ConfigDocument::from_store(&self.store)
    }

    pub fn export_json(&self) -> Result<String> {
        let json = self.export_document().to_json_pretty()?;
        info!("Exported {} profiles", self.store.profiles().len());
        Ok(json)
    }

    /// Validate and adopt a configuration document. A rejected document
    /// leaves the state untouched.
    pub fn import_value(&mut self, value: &Value) -> ImportOutcome {
        let outcome = validate_import(value);
        for record in outcome.dropped() {
            debug!("Dropped imported {}", record);
        }

        match &outcome {
            ImportOutcome::Accepted {
                profiles,
                selected_profile_id,
                ..
            } => {
                self.store
                    .replace_all(profiles.clone(), selected_profile_id.clone());
                self.persist();
                info!("Imported {} profiles", profiles.len());
            }
            ImportOutcome::Rejected { reason, .. } => {
                debug!("Import rejected: {}", reason);
            }
        }
        outcome
    }

    /// Frames of the selected profile for the submitted query
    pub fn frames(&self, submitted_query: &str) -> Vec<Frame> {
        self.store
            .selected_profile()
            .map(|profile| frames_for(profile, submitted_query))
            .unwrap_or_default()
    }

    pub fn sizing(&self) -> TileSizing {
        self.store
            .selected_profile()
            .map(TileSizing::of)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::model::ProfilePatch;
    use crate::persistence::{MemoryStore, PROFILES_KEY, SELECTED_KEY};
    use serde_json::json;

    /// Reads nothing, refuses every write
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StorageError::unavailable("quota exceeded"))
        }
    }

    #[test]
    fn test_cats_on_ddg_lite() {
        let dashboard = Dashboard::open(MemoryStore::new());
        let frames = dashboard.frames("cats");

        assert_eq!(dashboard.store().selected_profile().unwrap().name, "Profile 1");
        assert_eq!(frames[0].name, "DuckDuckGo Lite");
        assert_eq!(frames[0].url, "https://lite.duckduckgo.com/lite?q=cats");
        assert_eq!(frames.len(), 4);
    }

    #[test]
    fn test_empty_query_frames() {
        let dashboard = Dashboard::open(MemoryStore::new());
        let frames = dashboard.frames("");
        assert_eq!(frames[1].url, "https://www.google.com/search?q=");
    }

    #[test]
    fn test_dispatch_persists() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        assert!(dashboard.dispatch(Action::SelectProfile {
            profile_id: "p2".to_string()
        }));

        let storage = dashboard.storage();
        assert_eq!(storage.get(SELECTED_KEY).unwrap().as_deref(), Some("p2"));
        assert!(storage.get(PROFILES_KEY).unwrap().is_some());

        let reopened = Dashboard::open(storage.clone());
        assert_eq!(reopened.store(), dashboard.store());
    }

    #[test]
    fn test_add_engine_persists() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        let id = dashboard.add_engine("p2").unwrap();

        let reopened = Dashboard::open(dashboard.storage().clone());
        assert!(reopened.store().profile("p2").unwrap().engine(&id).is_some());
    }

    #[test]
    fn test_write_failures_keep_memory_state() {
        let mut dashboard = Dashboard::open(FullStore);
        assert!(dashboard.dispatch(Action::RenameProfile {
            profile_id: "p1".to_string(),
            name: "Still here".to_string(),
        }));
        assert_eq!(dashboard.store().profile("p1").unwrap().name, "Still here");
    }

    #[test]
    fn test_rejected_import_leaves_state() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        dashboard.dispatch(Action::SelectProfile {
            profile_id: "p3".to_string(),
        });
        let before = dashboard.store().clone();

        let outcome = dashboard.import_value(&json!({"profiles": [], "selectedProfileId": "p1"}));
        assert!(!outcome.is_accepted());
        assert_eq!(dashboard.store(), &before);
    }

    #[test]
    fn test_import_then_export_round_trip() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        dashboard.dispatch(Action::UpdateProfile {
            profile_id: "p2".to_string(),
            patch: ProfilePatch::min_height(720.0),
        });
        dashboard.dispatch(Action::SelectProfile {
            profile_id: "p2".to_string(),
        });
        let exported = dashboard.export_json().unwrap();

        let mut other = Dashboard::open(MemoryStore::new());
        let value: Value = serde_json::from_str(&exported).unwrap();
        assert!(other.import_value(&value).is_accepted());

        assert_eq!(other.store(), dashboard.store());
        assert_eq!(other.sizing().min_height, 720.0);
    }

    #[test]
    fn test_sizing_defaults() {
        let dashboard = Dashboard::open(MemoryStore::new());
        assert_eq!(
            dashboard.sizing(),
            TileSizing {
                min_width: 500.0,
                min_height: 500.0
            }
        );
    }
}
