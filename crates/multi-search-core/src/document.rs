//! Configuration document
//!
//! The export/import unit: `{ profiles, selectedProfileId, version }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::model::Profile;
use crate::persistence::{sanitize_profiles, DroppedRecord};
use crate::store::ProfileStore;

/// Version written into exported documents. Not checked on import.
pub const CONFIG_VERSION: u32 = 1;
/// Suggested file name for exports
pub const EXPORT_FILE_NAME: &str = "multi-search-config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    pub profiles: Vec<Profile>,
    pub selected_profile_id: String,
    pub version: u32,
}

impl ConfigDocument {
    pub fn from_store(store: &ProfileStore) -> Self {
        Self {
            profiles: store.profiles().to_vec(),
            selected_profile_id: store.selected_profile_id().to_string(),
            version: CONFIG_VERSION,
        }
    }

    /// Pretty-printed JSON (2-space indent)
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of validating an uploaded document
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Accepted {
        profiles: Vec<Profile>,
        selected_profile_id: String,
        dropped: Vec<DroppedRecord>,
    },
    Rejected {
        reason: &'static str,
        dropped: Vec<DroppedRecord>,
    },
}

impl ImportOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ImportOutcome::Accepted { .. })
    }

    pub fn dropped(&self) -> &[DroppedRecord] {
        match self {
            ImportOutcome::Accepted { dropped, .. } | ImportOutcome::Rejected { dropped, .. } => {
                dropped
            }
        }
    }
}

/// Validate an arbitrary JSON value as a configuration document
///
/// Only `profiles` (required array) and `selectedProfileId` (optional) are
/// read. A selection naming none of the kept profiles falls back to the first.
pub fn validate_import(value: &Value) -> ImportOutcome {
    let Some(obj) = value.as_object() else {
        return ImportOutcome::Rejected {
            reason: "document is not an object",
            dropped: Vec::new(),
        };
    };
    let Some(entries) = obj.get("profiles").and_then(Value::as_array) else {
        return ImportOutcome::Rejected {
            reason: "profiles is not an array",
            dropped: Vec::new(),
        };
    };

    let sanitized = sanitize_profiles(entries);
    let Some(first) = sanitized.profiles.first() else {
        return ImportOutcome::Rejected {
            reason: "no valid profiles",
            dropped: sanitized.dropped,
        };
    };

    let selected_profile_id = obj
        .get("selectedProfileId")
        .and_then(Value::as_str)
        .filter(|id| sanitized.profiles.iter().any(|p| p.id == *id))
        .unwrap_or(first.id.as_str())
        .to_string();

    ImportOutcome::Accepted {
        profiles: sanitized.profiles,
        selected_profile_id,
        dropped: sanitized.dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_shape() {
        let store = ProfileStore::default();
        let json = ConfigDocument::from_store(&store).to_json_pretty().unwrap();

        assert!(json.starts_with("{\n  \"profiles\": ["));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["selectedProfileId"], "p1");
        assert_eq!(value["profiles"][0]["engines"][0]["urlTemplate"], "https://lite.duckduckgo.com/lite?q={q}");
    }

    #[test]
    fn test_reject_non_object() {
        let outcome = validate_import(&json!([1, 2]));
        assert!(!outcome.is_accepted());
        assert!(!validate_import(&json!({"profiles": {}})).is_accepted());
        assert!(!validate_import(&Value::Null).is_accepted());
    }

    #[test]
    fn test_reject_empty_profiles() {
        let outcome = validate_import(&json!({"profiles": [], "selectedProfileId": "x"}));
        assert_eq!(
            outcome,
            ImportOutcome::Rejected {
                reason: "no valid profiles",
                dropped: vec![],
            }
        );
    }

    #[test]
    fn test_unknown_selection_picks_first() {
        let doc = json!({
            "profiles": [
                {"id": "a", "name": "A", "engines": []},
                {"id": "b", "name": "B", "engines": []}
            ],
            "selectedProfileId": "zzz",
            "version": 99
        });
        match validate_import(&doc) {
            ImportOutcome::Accepted {
                selected_profile_id, ..
            } => assert_eq!(selected_profile_id, "a"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_known_selection_adopted() {
        let doc = json!({
            "profiles": [
                {"id": "a", "name": "A", "engines": []},
                {"id": "b", "name": "B", "engines": []}
            ],
            "selectedProfileId": "b"
        });
        match validate_import(&doc) {
            ImportOutcome::Accepted {
                selected_profile_id, ..
            } => assert_eq!(selected_profile_id, "b"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = ProfileStore::default();
        store.update_profile(
            "p3",
            &crate::model::ProfilePatch {
                min_width: Some(320.0),
                min_height: Some(640.0),
                ..Default::default()
            },
        );
        store.set_selected_profile("p3");

        let json = ConfigDocument::from_store(&store).to_json_pretty().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        match validate_import(&value) {
            ImportOutcome::Accepted {
                profiles,
                selected_profile_id,
                dropped,
            } => {
                assert!(dropped.is_empty());
                assert_eq!(profiles, store.profiles());
                assert_eq!(selected_profile_id, "p3");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
