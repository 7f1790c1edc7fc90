//! Theme store
//!
//! [`ThemeStore`] owns the live configuration, its undo history and the saved
//! presets. Every mutating action follows the same pattern: change the live
//! config, then record a snapshot of the result. `undo`/`redo` only move the
//! history cursor and restore the snapshot found there.
//!
//! The store is single-owner. Hosts that mutate it from several threads use
//! [`SharedThemeStore`], which guards config and history as one unit.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::config::{ThemeConfig, RADIUS_MAX, RADIUS_MIN};
use crate::error::StorageError;
use crate::history::History;
use crate::persist::{PersistedState, StateStorage, STORAGE_KEY};
use crate::presets::{PresetLibrary, SavePresetOutcome, ThemePreset};
use crate::tokens::*;

/// Default number of retained history snapshots
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Store construction options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum retained history snapshots, at least 1
    pub max_history: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// Live configuration, undo history and saved presets.
#[derive(Clone, Debug)]
pub struct ThemeStore {
    config: ThemeConfig,
    history: History<ThemeConfig>,
    presets: PresetLibrary,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore {
    /// Store holding the default configuration
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    pub fn with_options(options: StoreOptions) -> Self {
        Self::from_state(PersistedState::default(), options)
    }

    /// Restore a store from persisted state. History starts over with a single
    /// snapshot of the restored config.
    pub fn from_state(state: PersistedState, options: StoreOptions) -> Self {
        let PersistedState {
            config,
            saved_presets,
        } = state;
        Self {
            history: History::new(config.clone(), options.max_history),
            config,
            presets: saved_presets,
        }
    }

    /// Load persisted state from `storage`.
    ///
    /// Missing state yields a default store; invalid stored data is replaced
    /// as described on [`PersistedState::from_json_lossy`]. Only storage
    /// access failures are returned.
    pub fn hydrate(
        storage: &dyn StateStorage,
        options: StoreOptions,
    ) -> Result<Self, StorageError> {
        let state = match storage.load(STORAGE_KEY)? {
            Some(text) => PersistedState::from_json_lossy(&text),
            None => {
                debug!("no persisted theme state, starting from defaults");
                PersistedState::default()
            }
        };
        Ok(Self::from_state(state, options))
    }

    /// Snapshot of the persisted subset
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            config: self.config.clone(),
            saved_presets: self.presets.clone(),
        }
    }

    /// Write the config and saved presets to `storage`.
    pub fn persist(&self, storage: &dyn StateStorage) -> Result<(), StorageError> {
        let text = self.persisted_state().to_json()?;
        storage.save(STORAGE_KEY, &text)?;
        debug!(presets = self.presets.len(), "persisted theme state");
        Ok(())
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn saved_presets(&self) -> &PresetLibrary {
        &self.presets
    }

    // ========== Field mutations ==========

    pub fn set_semantic_color(
        &mut self,
        mode: ColorMode,
        role: SemanticRole,
        palette: ChromaticPalette,
    ) {
        self.apply("semantic color", |config| {
            config.colors_for_mut(mode).set(role, palette)
        });
    }

    pub fn set_color_shade(&mut self, mode: ColorMode, role: SemanticRole, shade: Shade) {
        self.apply("color shade", |config| {
            config.shades_for_mut(mode).set(role, shade)
        });
    }

    pub fn set_neutral(&mut self, mode: ColorMode, palette: NeutralPalette) {
        self.apply("neutral", |config| *config.neutral_for_mut(mode) = palette);
    }

    /// Set the corner radius in rem, clamped to the accepted range.
    pub fn set_radius(&mut self, mode: ColorMode, value: f64) {
        let radius = if value.is_nan() {
            warn!("ignoring NaN radius, using {RADIUS_MIN}");
            RADIUS_MIN
        } else {
            let clamped = value.clamp(RADIUS_MIN, RADIUS_MAX);
            if clamped != value {
                warn!("radius {value} clamped to {clamped}");
            }
            clamped
        };
        self.apply("radius", |config| *config.radius_for_mut(mode) = radius);
    }

    /// Set the font family. Blank names are ignored.
    pub fn set_font(&mut self, mode: ColorMode, name: impl Into<String>) {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            warn!("ignoring empty font name");
            return;
        }
        let name = name.to_string();
        self.apply("font", |config| *config.font_for_mut(mode) = name);
    }

    pub fn set_text_override(&mut self, mode: ColorMode, slot: TextSlot, shade: Shade) {
        self.apply("text override", |config| {
            config.overrides_for_mut(mode).text.set(slot, shade)
        });
    }

    pub fn set_bg_override(&mut self, mode: ColorMode, slot: BgSlot, shade: Shade) {
        self.apply("bg override", |config| {
            config.overrides_for_mut(mode).bg.set(slot, shade)
        });
    }

    pub fn set_border_override(&mut self, mode: ColorMode, slot: BorderSlot, shade: Shade) {
        self.apply("border override", |config| {
            config.overrides_for_mut(mode).border.set(slot, shade)
        });
    }

    // ========== Wholesale replacement ==========

    /// Replace the config with the defaults. Undoable.
    pub fn reset_to_defaults(&mut self) {
        self.apply("reset", |config| *config = ThemeConfig::default());
    }

    /// Replace the config with an already-validated one. Undoable.
    ///
    /// Single entry point for import, generated themes and presets.
    pub fn load_config(&mut self, config: &ThemeConfig) {
        self.apply("load config", |current| *current = config.clone());
    }

    // ========== Presets ==========

    /// Save the live config under `name`.
    ///
    /// `name` must already be trimmed and non-empty; the store does not check.
    /// Saving does not record history.
    pub fn save_preset(&mut self, name: &str) -> SavePresetOutcome {
        let outcome = self.presets.save(name, &self.config, Utc::now());
        debug!(name, is_update = outcome.is_update, "saved preset");
        outcome
    }

    /// Remove a saved preset. Unknown names are ignored.
    pub fn delete_preset(&mut self, name: &str) {
        if self.presets.remove(name) {
            debug!(name, "deleted preset");
        }
    }

    pub fn load_preset(&mut self, preset: &ThemePreset) {
        self.load_config(&preset.config);
    }

    /// Load the saved preset called `name`. Returns `false` if there is none.
    pub fn load_preset_named(&mut self, name: &str) -> bool {
        match self.presets.get(name) {
            Some(preset) => {
                let config = preset.config.clone();
                self.load_config(&config);
                true
            }
            None => false,
        }
    }

    // ========== History ==========

    /// Step back one snapshot. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.config = snapshot.clone();
                debug!(index = self.history.index(), "undo");
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.config = snapshot.clone();
                debug!(index = self.history.index(), "redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    fn apply(&mut self, action: &'static str, mutate: impl FnOnce(&mut ThemeConfig)) {
        mutate(&mut self.config);
        self.history.push(self.config.clone());
        debug!(
            action,
            index = self.history.index(),
            len = self.history.len(),
            "theme updated"
        );
    }
}

/// Thread-safe handle to a [`ThemeStore`].
///
/// Cloning shares the same store.
#[derive(Clone, Debug, Default)]
pub struct SharedThemeStore {
    inner: Arc<Mutex<ThemeStore>>,
}

impl SharedThemeStore {
    pub fn new(store: ThemeStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, ThemeStore> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut ThemeStore) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Clone of the live config
    pub fn snapshot(&self) -> ThemeConfig {
        self.inner.lock().config().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn mutations_target_the_requested_mode() {
        let mut store = ThemeStore::new();
        store.set_semantic_color(ColorMode::Dark, SemanticRole::Primary, ChromaticPalette::Rose);
        store.set_neutral(ColorMode::Dark, NeutralPalette::Zinc);
        store.set_font(ColorMode::Light, "Inter");

        let config = store.config();
        assert_eq!(config.colors.primary, ChromaticPalette::Green);
        assert_eq!(config.dark_colors.primary, ChromaticPalette::Rose);
        assert_eq!(config.neutral, NeutralPalette::Slate);
        assert_eq!(config.dark_neutral, NeutralPalette::Zinc);
        assert_eq!(config.font, "Inter");
        assert_eq!(config.dark_font, "Public Sans");
        assert_eq!(store.history_len(), 4);
        assert_eq!(store.history_index(), 3);
    }

    #[test]
    fn override_setters_touch_one_slot() {
        let mut store = ThemeStore::new();
        store.set_text_override(ColorMode::Light, TextSlot::Muted, Shade::S300);
        store.set_bg_override(ColorMode::Dark, BgSlot::Elevated, Shade::S950);
        store.set_border_override(ColorMode::Light, BorderSlot::Inverted, Shade::Black);

        let config = store.config();
        let mut expected_light = default_overrides(ColorMode::Light);
        expected_light.text.muted = Shade::S300;
        expected_light.border.inverted = Shade::Black;
        assert_eq!(config.light_overrides, expected_light);
        assert_eq!(config.dark_overrides.bg.elevated, Shade::S950);
    }

    #[test]
    fn set_radius_clamps() {
        let mut store = ThemeStore::new();
        store.set_radius(ColorMode::Light, 5.0);
        store.set_radius(ColorMode::Dark, -1.0);
        assert_eq!(store.config().radius, RADIUS_MAX);
        assert_eq!(store.config().dark_radius, RADIUS_MIN);

        store.set_radius(ColorMode::Light, f64::NAN);
        assert_eq!(store.config().radius, RADIUS_MIN);
    }

    #[test]
    fn blank_font_is_ignored_and_edits_survive_restart() {
        let storage = MemoryStorage::new();
        let mut store = ThemeStore::new();
        store.set_neutral(ColorMode::Light, NeutralPalette::Stone);
        store.set_font(ColorMode::Light, "");
        store.set_font(ColorMode::Dark, "   ");
        assert_eq!(store.history_len(), 2);
        assert!(crate::schema::check(store.config()).is_ok());

        store.set_font(ColorMode::Light, "  Inter ");
        assert_eq!(store.config().font, "Inter");

        store.persist(&storage).unwrap();
        let restored = ThemeStore::hydrate(&storage, StoreOptions::default()).unwrap();
        assert_eq!(restored.config().neutral, NeutralPalette::Stone);
        assert_eq!(restored.config().font, "Inter");
    }

    #[test]
    fn undo_redo_restore_snapshots_without_recording() {
        let mut store = ThemeStore::new();
        store.set_color_shade(ColorMode::Light, SemanticRole::Info, Shade::S700);
        let edited = store.config().clone();

        assert!(store.undo());
        assert_eq!(store.config(), &ThemeConfig::default());
        assert!(!store.undo());

        assert!(store.redo());
        assert_eq!(store.config(), &edited);
        assert!(!store.redo());
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn reset_is_undoable() {
        let mut store = ThemeStore::new();
        store.set_neutral(ColorMode::Light, NeutralPalette::Stone);
        store.reset_to_defaults();
        assert_eq!(store.config(), &ThemeConfig::default());

        store.undo();
        assert_eq!(store.config().neutral, NeutralPalette::Stone);
    }

    #[test]
    fn saving_presets_does_not_record_history() {
        let mut store = ThemeStore::new();
        assert!(!store.save_preset("Mine").is_update);
        assert!(store.save_preset("Mine").is_update);
        assert_eq!(store.history_len(), 1);
        assert_eq!(store.saved_presets().len(), 1);

        store.delete_preset("Other");
        store.delete_preset("Mine");
        assert!(store.saved_presets().is_empty());
    }

    #[test]
    fn load_preset_named_replaces_config() {
        let mut store = ThemeStore::new();
        store.set_neutral(ColorMode::Light, NeutralPalette::Neutral);
        store.save_preset("Neutral");
        store.reset_to_defaults();

        assert!(store.load_preset_named("Neutral"));
        assert_eq!(store.config().neutral, NeutralPalette::Neutral);
        assert!(!store.load_preset_named("Missing"));
        assert_eq!(store.history_len(), 4);
    }

    #[test]
    fn history_respects_configured_bound() {
        let mut store = ThemeStore::with_options(StoreOptions { max_history: 3 });
        for font in ["A", "B", "C", "D", "E"] {
            store.set_font(ColorMode::Light, font);
        }
        assert_eq!(store.history_len(), 3);
        assert_eq!(store.history_index(), 2);

        while store.undo() {}
        assert_eq!(store.config().font, "C");
    }

    #[test]
    fn persist_then_hydrate_restarts_history() {
        let storage = MemoryStorage::new();
        let mut store = ThemeStore::new();
        store.set_neutral(ColorMode::Light, NeutralPalette::Gray);
        store.save_preset("Gray");
        store.persist(&storage).unwrap();

        let restored = ThemeStore::hydrate(&storage, StoreOptions::default()).unwrap();
        assert_eq!(restored.config(), store.config());
        assert_eq!(restored.saved_presets(), store.saved_presets());
        assert_eq!(restored.history_len(), 1);
        assert!(!restored.can_undo());
    }

    #[test]
    fn hydrate_without_state_uses_defaults() {
        let store = ThemeStore::hydrate(&MemoryStorage::new(), StoreOptions::default()).unwrap();
        assert_eq!(store.config(), &ThemeConfig::default());
        assert!(store.saved_presets().is_empty());
    }

    #[test]
    fn shared_store_serializes_access() {
        let shared = SharedThemeStore::new(ThemeStore::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for _ in 0..5 {
                        shared.with(|store| store.set_radius(ColorMode::Light, 1.0));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = shared.lock();
        assert_eq!(store.history_len(), 21);
        assert_eq!(store.history_index(), 20);
        drop(store);
        assert_eq!(shared.snapshot().radius, 1.0);
    }
}
