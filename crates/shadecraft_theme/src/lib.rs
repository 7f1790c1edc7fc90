//! Shadecraft Theme Engine
//!
//! Headless core of a theme editor for a component library's design tokens.
//!
//! # Overview
//!
//! The engine provides:
//! - **Design tokens**: Palettes, shades, semantic roles and override slots
//! - **Validation**: Field-level checking of untrusted configuration JSON
//! - **Export**: CSS custom properties, an app-config snippet and canonical JSON
//! - **Generated themes**: Normalization of partial AI-generated themes
//! - **Store**: Live configuration with bounded undo/redo history and presets
//! - **Rate limiting**: Per-key fixed-window request counting
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shadecraft_theme::{ColorMode, SemanticRole, ChromaticPalette, ThemeStore};
//! use shadecraft_theme::export::default_theme_css;
//!
//! let mut store = ThemeStore::new();
//! store.set_semantic_color(ColorMode::Light, SemanticRole::Primary, ChromaticPalette::Violet);
//! store.undo();
//!
//! let css = default_theme_css(store.config()).to_stylesheet();
//! ```
//!
//! # Export
//!
//! Exports only emit what differs from the default token tables. The default
//! configuration exports a root block with just the font and radius, and an
//! empty dark block.
//!
//! # Persistence
//!
//! Only the live configuration and saved presets are persisted, through any
//! [`StateStorage`]. History is session-only:
//!
//! ```rust,ignore
//! let storage = FileStorage::new(".shadecraft");
//! let mut store = ThemeStore::hydrate(&storage, StoreOptions::default())?;
//! store.save_preset("Ocean");
//! store.persist(&storage)?;
//! ```

pub mod ai;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod persist;
pub mod presets;
pub mod rate_limit;
pub mod schema;
pub mod session;
pub mod store;
pub mod tokens;

// Re-export commonly used types
pub use ai::{apply_ai_response, build_theme_config, parse_ai_response, AiThemeResponse, AiThemeResult};
pub use config::{field_for_mode, field_for_mode_mut, ThemeConfig};
pub use error::{AiError, ImportError, StorageError};
pub use export::{ExportArtifact, ExportFormat, ThemeCss};
pub use history::History;
pub use persist::{FileStorage, MemoryStorage, PersistedState, StateStorage, STORAGE_KEY};
pub use presets::{PresetLibrary, SavePresetOutcome, ThemePreset};
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use schema::{import_json, validate, ValidationIssue};
pub use session::UiSessionState;
pub use store::{SharedThemeStore, StoreOptions, ThemeStore, DEFAULT_MAX_HISTORY};
pub use tokens::*;
