//! Profile and Engine types
//!
//! A profile is a named, ordered set of search engines plus the tile sizing
//! used when its frames are laid out.

use serde::{Deserialize, Serialize};

/// Smallest allowed tile width/height in pixels
pub const MIN_TILE_SIZE: f64 = 100.0;
/// Tile width/height used when a profile does not set one
pub const DEFAULT_TILE_SIZE: f64 = 500.0;

/// Clamp a sizing value to [`MIN_TILE_SIZE`]. NaN collapses to the minimum.
pub fn clamp_tile_size(value: f64) -> f64 {
    value.max(MIN_TILE_SIZE)
}

/// A named search provider with a URL template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engine {
    pub id: String,
    pub name: String,
    /// Use `{q}` as placeholder
    pub url_template: String,
}

impl Engine {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Merge `patch` into this engine. Returns true if anything changed.
    pub fn apply(&mut self, patch: &EnginePatch) -> bool {
        let mut changed = false;
        if let Some(name) = &patch.name {
            if *name != self.name {
                self.name = name.clone();
                changed = true;
            }
        }
        if let Some(url_template) = &patch.url_template {
            if *url_template != self.url_template {
                self.url_template = url_template.clone();
                changed = true;
            }
        }
        changed
    }
}

/// Partial update for an [`Engine`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnginePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
}

impl EnginePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn url_template(url_template: impl Into<String>) -> Self {
        Self {
            url_template: Some(url_template.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url_template.is_none()
    }
}

/// A named, ordered set of engines plus optional tile sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub engines: Vec<Engine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, engines: Vec<Engine>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            engines,
            min_width: None,
            min_height: None,
        }
    }

    /// Tile width used for layout
    pub fn effective_min_width(&self) -> f64 {
        clamp_tile_size(self.min_width.unwrap_or(DEFAULT_TILE_SIZE))
    }

    /// Tile height used for layout
    pub fn effective_min_height(&self) -> f64 {
        clamp_tile_size(self.min_height.unwrap_or(DEFAULT_TILE_SIZE))
    }

    pub fn engine(&self, engine_id: &str) -> Option<&Engine> {
        self.engines.iter().find(|e| e.id == engine_id)
    }

    /// Merge `patch` into this profile, clamping sizing values.
    /// Returns true if anything changed.
    pub fn apply(&mut self, patch: &ProfilePatch) -> bool {
        let mut changed = false;
        if let Some(name) = &patch.name {
            if *name != self.name {
                self.name = name.clone();
                changed = true;
            }
        }
        if let Some(width) = patch.min_width.map(clamp_tile_size) {
            if self.min_width != Some(width) {
                self.min_width = Some(width);
                changed = true;
            }
        }
        if let Some(height) = patch.min_height.map(clamp_tile_size) {
            if self.min_height != Some(height) {
                self.min_height = Some(height);
                changed = true;
            }
        }
        changed
    }
}

/// Partial update for a [`Profile`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
}

impl ProfilePatch {
    pub fn min_width(width: f64) -> Self {
        Self {
            min_width: Some(width),
            ..Self::default()
        }
    }

    pub fn min_height(height: f64) -> Self {
        Self {
            min_height: Some(height),
            ..Self::default()
        }
    }
}

/// Built-in engines
pub fn default_engines() -> Vec<Engine> {
    vec![
        Engine::new("ddg-lite", "DuckDuckGo Lite", "https://lite.duckduckgo.com/lite?q={q}"),
        Engine::new("google", "Google", "https://www.google.com/search?q={q}"),
        Engine::new("bing", "Bing", "https://www.bing.com/search?q={q}"),
        Engine::new("brave", "Brave", "https://search.brave.com/search?q={q}"),
    ]
}

/// Built-in profile set, used until storage provides a usable one
pub fn default_profiles() -> Vec<Profile> {
    let engines = default_engines();
    let pick = |ids: &[&str]| -> Vec<Engine> {
        ids.iter()
            .filter_map(|id| engines.iter().find(|e| e.id == *id).cloned())
            .collect()
    };

    vec![
        Profile::new("p1", "Profile 1", engines.clone()),
        Profile::new("p2", "Profile 2", pick(&["ddg-lite", "brave"])),
        Profile::new("p3", "Profile 3", pick(&["google", "bing"])),
    ]
}
