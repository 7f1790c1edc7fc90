//! Shadecraft configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shadecraft_theme::{RateLimitConfig, StoreOptions, DEFAULT_MAX_HISTORY};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file looked up in the workspace directory
pub const CONFIG_FILE: &str = "shadecraft.toml";

/// Top-level configuration (shadecraft.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ShadecraftConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Limits for generated-theme requests
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// Undo history settings
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Maximum retained snapshots
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_HISTORY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// Where persisted state lives
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// State directory (relative to the workspace)
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    ".shadecraft".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

impl ShadecraftConfig {
    /// Load configuration from a directory (looks for shadecraft.toml).
    ///
    /// A missing file yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            debug!("no {} in {}, using defaults", CONFIG_FILE, path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ShadecraftConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            max_history: self.history.max_entries.max(1),
        }
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        self.rate_limit
    }

    /// State directory resolved against the workspace root
    pub fn storage_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.storage.dir)
    }
}
