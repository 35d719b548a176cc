//! Persistence Adapter
//!
//! Loads and saves the profile collection and the selected profile id through
//! a string key-value store, and validates untrusted profile data (storage
//! contents and imported documents) record by record.
//!
//! Nothing here fails the caller: unreadable data falls back to what is
//! already in memory and failed writes are logged and dropped.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{clamp_tile_size, Engine, Profile};
use crate::store::ProfileStore;

/// Key holding the JSON-serialized profile collection
pub const PROFILES_KEY: &str = "multi-search.profiles";
/// Key holding the plain selected profile id
pub const SELECTED_KEY: &str = "multi-search.selectedProfile";

/// A string key-value backend (browser `localStorage`, a JSON file, memory)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

/// A record rejected during validation
#[derive(Debug, Clone, PartialEq)]
pub enum DroppedRecord {
    Profile {
        index: usize,
        id: Option<String>,
        reason: &'static str,
    },
    Engine {
        profile_id: String,
        index: usize,
        id: Option<String>,
        reason: &'static str,
    },
}

impl fmt::Display for DroppedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DroppedRecord::Profile { index, id, reason } => {
                write!(f, "profile #{}", index)?;
                if let Some(id) = id {
                    write!(f, " ({})", id)?;
                }
                write!(f, ": {}", reason)
            }
            DroppedRecord::Engine {
                profile_id,
                index,
                id,
                reason,
            } => {
                write!(f, "profile {} engine #{}", profile_id, index)?;
                if let Some(id) = id {
                    write!(f, " ({})", id)?;
                }
                write!(f, ": {}", reason)
            }
        }
    }
}

/// Profiles that passed validation plus a report of what was dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sanitized {
    pub profiles: Vec<Profile>,
    pub dropped: Vec<DroppedRecord>,
}

/// Validate a JSON array of profiles, keeping the well-formed ones
///
/// A profile needs string `id` and `name` and an array `engines`; an engine
/// needs string `id`, `name` and `urlTemplate`. Numeric sizing fields are
/// kept (clamped), anything else is ignored. Duplicate ids keep the first.
pub fn sanitize_profiles(entries: &[Value]) -> Sanitized {
    let mut out = Sanitized::default();
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        match sanitize_profile(entry, &mut out.dropped) {
            Ok(profile) if seen.insert(profile.id.clone()) => out.profiles.push(profile),
            Ok(profile) => out.dropped.push(DroppedRecord::Profile {
                index,
                id: Some(profile.id),
                reason: "duplicate profile id",
            }),
            Err(reason) => out.dropped.push(DroppedRecord::Profile {
                index,
                id: string_field(entry, "id"),
                reason,
            }),
        }
    }

    out
}

/// Parse a stored profile collection. `None` unless it is a JSON array.
pub fn parse_profiles(raw: &str) -> Option<Sanitized> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            debug!("Stored profiles are not valid JSON: {}", e);
            return None;
        }
    };
    value.as_array().map(|entries| sanitize_profiles(entries))
}

fn sanitize_profile(
    value: &Value,
    dropped: &mut Vec<DroppedRecord>,
) -> std::result::Result<Profile, &'static str> {
    if !value.is_object() {
        return Err("not an object");
    }
    let id = string_field(value, "id").ok_or("missing string id")?;
    let name = string_field(value, "name").ok_or("missing string name")?;
    let entries = value
        .get("engines")
        .and_then(Value::as_array)
        .ok_or("engines is not an array")?;

    let mut engines: Vec<Engine> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match sanitize_engine(entry) {
            Ok(engine) if engines.iter().any(|e| e.id == engine.id) => {
                dropped.push(DroppedRecord::Engine {
                    profile_id: id.clone(),
                    index,
                    id: Some(engine.id),
                    reason: "duplicate engine id",
                })
            }
            Ok(engine) => engines.push(engine),
            Err(reason) => dropped.push(DroppedRecord::Engine {
                profile_id: id.clone(),
                index,
                id: string_field(entry, "id"),
                reason,
            }),
        }
    }

    Ok(Profile {
        id,
        name,
        engines,
        min_width: number_field(value, "minWidth"),
        min_height: number_field(value, "minHeight"),
    })
}

fn sanitize_engine(value: &Value) -> std::result::Result<Engine, &'static str> {
    if !value.is_object() {
        return Err("not an object");
    }
    let id = string_field(value, "id").ok_or("missing string id")?;
    let name = string_field(value, "name").ok_or("missing string name")?;
    let url_template = string_field(value, "urlTemplate").ok_or("missing string urlTemplate")?;
    Ok(Engine {
        id,
        name,
        url_template,
    })
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64).map(clamp_tile_size)
}

// ── Load / save ─────────────────────────────────────────────────────────────

/// Apply persisted state on top of `store`
///
/// The stored collection replaces the current one only when it parses and
/// keeps at least one profile. A non-empty stored selection is always taken.
pub fn load<S: KeyValueStore + ?Sized>(storage: &S, store: &mut ProfileStore) {
    match storage.get(PROFILES_KEY) {
        Ok(Some(raw)) => match parse_profiles(&raw) {
            Some(sanitized) if !sanitized.profiles.is_empty() => {
                for record in &sanitized.dropped {
                    debug!("Dropped stored {}", record);
                }
                info!("Loaded {} profiles from storage", sanitized.profiles.len());
                let selected = store.selected_profile_id().to_string();
                store.replace_all(sanitized.profiles, selected);
            }
            _ => debug!("No usable stored profiles, keeping defaults"),
        },
        Ok(None) => debug!("No stored profiles"),
        Err(e) => warn!("Failed to read stored profiles: {}", e),
    }

    match storage.get(SELECTED_KEY) {
        Ok(Some(selected)) if !selected.is_empty() => {
            store.set_selected_profile(selected);
        }
        Ok(_) => {}
        Err(e) => warn!("Failed to read stored selection: {}", e),
    }
}

/// Write the collection and the selection
pub fn try_save<S: KeyValueStore + ?Sized>(storage: &mut S, store: &ProfileStore) -> Result<()> {
    let profiles = serde_json::to_string(store.profiles())?;
    storage.set(PROFILES_KEY, &profiles)?;
    storage.set(SELECTED_KEY, store.selected_profile_id())?;
    Ok(())
}

/// [`try_save`], logging instead of failing
pub fn save<S: KeyValueStore + ?Sized>(storage: &mut S, store: &ProfileStore) {
    if let Err(e) = try_save(storage, store) {
        warn!("Failed to persist profiles: {}", e);
    }
}
