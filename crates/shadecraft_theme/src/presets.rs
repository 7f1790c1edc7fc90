//! Named, user-saved theme presets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;

/// A named snapshot of a full configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreset {
    pub name: String,
    pub config: ThemeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of saving a preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SavePresetOutcome {
    /// `true` when an existing preset with the same name was overwritten
    pub is_update: bool,
}

/// Saved presets, unique by name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetLibrary {
    presets: Vec<ThemePreset>,
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from a list, keeping the last preset for duplicate names.
    pub fn from_presets(presets: impl IntoIterator<Item = ThemePreset>) -> Self {
        let mut library = Self::new();
        for preset in presets {
            library.upsert(preset);
        }
        library
    }

    /// Save `config` under `name`, overwriting in place if the name exists.
    pub fn save(
        &mut self,
        name: &str,
        config: &ThemeConfig,
        at: DateTime<Utc>,
    ) -> SavePresetOutcome {
        self.upsert(ThemePreset {
            name: name.to_string(),
            config: config.clone(),
            updated_at: Some(at),
        })
    }

    fn upsert(&mut self, preset: ThemePreset) -> SavePresetOutcome {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => {
                *existing = preset;
                SavePresetOutcome { is_update: true }
            }
            None => {
                self.presets.push(preset);
                SavePresetOutcome { is_update: false }
            }
        }
    }

    /// Remove the preset called `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.name != name);
        self.presets.len() != before
    }

    pub fn get(&self, name: &str) -> Option<&ThemePreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemePreset> {
        self.presets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
