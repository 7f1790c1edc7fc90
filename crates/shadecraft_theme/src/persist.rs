//! Persisted store state
//!
//! Only the live configuration and the saved presets survive a reload. The
//! state is stored as one JSON document under [`STORAGE_KEY`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::ThemeConfig;
use crate::error::StorageError;
use crate::presets::{PresetLibrary, ThemePreset};
use crate::schema;

/// Fixed key the store state is saved under.
pub const STORAGE_KEY: &str = "shadecraft-theme";

/// The persisted subset of the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub config: ThemeConfig,
    pub saved_presets: PresetLibrary,
}

impl PersistedState {
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore state from stored JSON, never failing.
    ///
    /// An unreadable document or an invalid config yields the default config;
    /// presets whose config fails validation are dropped. Each rejection is
    /// logged.
    pub fn from_json_lossy(text: &str) -> Self {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                warn!("discarding unreadable persisted state: {err}");
                return Self::default();
            }
        };

        let config = match value.get("config").map(schema::validate) {
            Some(Ok(config)) => config,
            Some(Err(issues)) => {
                warn!(
                    "persisted config is invalid, using defaults: {}",
                    schema::join_issues(&issues)
                );
                ThemeConfig::default()
            }
            None => ThemeConfig::default(),
        };

        let presets = value
            .get("savedPresets")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(restore_preset).collect::<Vec<_>>())
            .unwrap_or_default();

        Self {
            config,
            saved_presets: PresetLibrary::from_presets(presets),
        }
    }
}

fn restore_preset(value: &Value) -> Option<ThemePreset> {
    let name = value.get("name").and_then(Value::as_str)?;
    if name.trim().is_empty() {
        warn!("dropping persisted preset with an empty name");
        return None;
    }
    let config = match value.get("config").map(schema::validate) {
        Some(Ok(config)) => config,
        Some(Err(issues)) => {
            warn!(
                "dropping persisted preset `{name}`: {}",
                schema::join_issues(&issues)
            );
            return None;
        }
        None => {
            warn!("dropping persisted preset `{name}`: missing config");
            return None;
        }
    };
    let updated_at = value
        .get("updatedAt")
        .and_then(|v| serde_json::from_value(v.clone()).ok());

    Some(ThemePreset {
        name: name.to_string(),
        config,
        updated_at,
    })
}

/// Key/value text storage the store persists into.
pub trait StateStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, contents: &str) -> Result<(), StorageError>;
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, contents).map_err(|source| StorageError::Io { path, source })
    }
}
