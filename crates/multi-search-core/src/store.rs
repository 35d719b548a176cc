//! Profile/Engine Store
//!
//! The authoritative in-memory collection of profiles. Every mutation either
//! fully applies or is a no-op, and reports whether anything changed so the
//! caller knows when to persist and re-render.

use chrono::Utc;
use tracing::debug;

use crate::model::{default_profiles, Engine, EnginePatch, Profile, ProfilePatch};

/// Name given to a freshly added engine
pub const NEW_ENGINE_NAME: &str = "New Engine";
/// Template given to a freshly added engine
pub const NEW_ENGINE_TEMPLATE: &str = "https://example.com/search?q={q}";

/// A store mutation expressed as a value
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddEngine {
        profile_id: String,
    },
    UpdateEngine {
        profile_id: String,
        engine_id: String,
        patch: EnginePatch,
    },
    RemoveEngine {
        profile_id: String,
        engine_id: String,
    },
    RenameProfile {
        profile_id: String,
        name: String,
    },
    UpdateProfile {
        profile_id: String,
        patch: ProfilePatch,
    },
    SelectProfile {
        profile_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
    selected_profile_id: String,
}

impl ProfileStore {
    pub fn new(profiles: Vec<Profile>, selected_profile_id: impl Into<String>) -> Self {
        Self {
            profiles,
            selected_profile_id: selected_profile_id.into(),
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// The recorded selection, which may not name an existing profile
    pub fn selected_profile_id(&self) -> &str {
        &self.selected_profile_id
    }

    pub fn profile(&self, profile_id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == profile_id)
    }

    /// The selected profile, falling back to the first one
    pub fn selected_profile(&self) -> Option<&Profile> {
        self.profile(&self.selected_profile_id)
            .or_else(|| self.profiles.first())
    }

    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::AddEngine { profile_id } => self.add_engine(&profile_id).is_some(),
            Action::UpdateEngine {
                profile_id,
                engine_id,
                patch,
            } => self.update_engine(&profile_id, &engine_id, &patch),
            Action::RemoveEngine {
                profile_id,
                engine_id,
            } => self.remove_engine(&profile_id, &engine_id),
            Action::RenameProfile { profile_id, name } => self.rename_profile(&profile_id, name),
            Action::UpdateProfile { profile_id, patch } => {
                self.update_profile(&profile_id, &patch)
            }
            Action::SelectProfile { profile_id } => self.set_selected_profile(profile_id),
        }
    }

    /// Append a new engine to a profile, returning its generated id
    pub fn add_engine(&mut self, profile_id: &str) -> Option<String> {
        let Some(profile) = self.profile_mut(profile_id) else {
            debug!(profile_id, "add_engine: no such profile");
            return None;
        };

        let id = unique_engine_id(&profile.engines, Utc::now().timestamp_millis());
        profile
            .engines
            .push(Engine::new(id.clone(), NEW_ENGINE_NAME, NEW_ENGINE_TEMPLATE));
        Some(id)
    }

    pub fn update_engine(&mut self, profile_id: &str, engine_id: &str, patch: &EnginePatch) -> bool {
        let engine = self
            .profile_mut(profile_id)
            .and_then(|p| p.engines.iter_mut().find(|e| e.id == engine_id));

        match engine {
            Some(engine) => engine.apply(patch),
            None => {
                debug!(profile_id, engine_id, "update_engine: no such engine");
                false
            }
        }
    }

    pub fn remove_engine(&mut self, profile_id: &str, engine_id: &str) -> bool {
        let Some(profile) = self.profile_mut(profile_id) else {
            return false;
        };

        let before = profile.engines.len();
        profile.engines.retain(|e| e.id != engine_id);
        profile.engines.len() != before
    }

    pub fn rename_profile(&mut self, profile_id: &str, name: impl Into<String>) -> bool {
        let patch = ProfilePatch {
            name: Some(name.into()),
            ..ProfilePatch::default()
        };
        self.update_profile(profile_id, &patch)
    }

    pub fn update_profile(&mut self, profile_id: &str, patch: &ProfilePatch) -> bool {
        match self.profile_mut(profile_id) {
            Some(profile) => profile.apply(patch),
            None => {
                debug!(profile_id, "update_profile: no such profile");
                false
            }
        }
    }

    /// Move the selection pointer. Existence is resolved on read.
    pub fn set_selected_profile(&mut self, profile_id: impl Into<String>) -> bool {
        let profile_id = profile_id.into();
        if profile_id == self.selected_profile_id {
            return false;
        }
        self.selected_profile_id = profile_id;
        true
    }

    /// Swap the whole collection. An empty collection is refused.
    pub fn replace_all(&mut self, profiles: Vec<Profile>, selected_profile_id: impl Into<String>) -> bool {
        if profiles.is_empty() {
            return false;
        }
        self.profiles = profiles;
        self.selected_profile_id = selected_profile_id.into();
        true
    }

    fn profile_mut(&mut self, profile_id: &str) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id == profile_id)
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(default_profiles(), "p1")
    }
}

/// Timestamp-derived engine id, suffixed when it collides with an existing one
fn unique_engine_id(engines: &[Engine], millis: i64) -> String {
    let base = format!("eng-{}", millis);
    let taken = |id: &str| engines.iter().any(|e| e.id == id);

    if !taken(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
