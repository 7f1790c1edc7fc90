//! Command implementations
//!
//! Every command runs against a [`Workspace`]: a directory holding an optional
//! `shadecraft.toml` and the persisted theme state.

use anyhow::{bail, Context, Result};
use shadecraft_theme::{
    apply_ai_response, import_json, parse_ai_response, BgSlot, BorderSlot, ChromaticPalette,
    ColorMode, ExportArtifact, ExportFormat, FileStorage, NeutralPalette, RateLimiter,
    SavePresetOutcome, SemanticRole, Shade, TextSlot, ThemeConfig, ThemeStore, Token,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{ShadecraftConfig, CONFIG_FILE};

/// A directory with its configuration and state storage.
pub struct Workspace {
    root: PathBuf,
    config: ShadecraftConfig,
}

impl Workspace {
    pub fn open(root: &Path) -> Result<Self> {
        let config = ShadecraftConfig::load_from_dir(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn config(&self) -> &ShadecraftConfig {
        &self.config
    }

    fn storage(&self) -> FileStorage {
        FileStorage::new(self.config.storage_dir(&self.root))
    }

    pub fn load_store(&self) -> Result<ThemeStore> {
        ThemeStore::hydrate(&self.storage(), self.config.store_options())
            .context("Failed to load theme state")
    }

    pub fn save_store(&self, store: &ThemeStore) -> Result<()> {
        store
            .persist(&self.storage())
            .context("Failed to save theme state")
    }

    /// Load the store, run `f`, then persist the result.
    fn update<R>(&self, f: impl FnOnce(&mut ThemeStore) -> Result<R>) -> Result<R> {
        let mut store = self.load_store()?;
        let out = f(&mut store)?;
        self.save_store(&store)?;
        Ok(out)
    }
}

/// Write a default shadecraft.toml into `root`.
pub fn init(root: &Path, force: bool) -> Result<PathBuf> {
    let path = root.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create {}", root.display()))?;
    fs::write(&path, ShadecraftConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("created {}", path.display());
    Ok(path)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Validate a theme JSON file without touching any state.
pub fn validate_file(path: &Path) -> Result<ThemeConfig> {
    let text = read_file(path)?;
    import_json(&text).with_context(|| format!("{} is not a valid theme", path.display()))
}

/// Replace the live config with a validated theme file.
pub fn import(ws: &Workspace, path: &Path) -> Result<()> {
    let config = validate_file(path)?;
    ws.update(|store| {
        store.load_config(&config);
        Ok(())
    })
}

/// Render the live config. Writes to `output` when given.
pub fn export(
    ws: &Workspace,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<ExportArtifact> {
    let store = ws.load_store()?;
    let artifact = format
        .render(store.config())
        .context("Failed to render export")?;

    if let Some(path) = output {
        fs::write(path, &artifact.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(
            mime = artifact.mime_type,
            "wrote {} ({})",
            path.display(),
            artifact.file_name
        );
    }
    Ok(artifact)
}

/// Apply generated theme files in order, subject to the rate limit.
///
/// Returns the explanation of every applied theme. A rate-limited file stops
/// the run; themes applied before it are kept.
pub fn apply_ai(
    ws: &Workspace,
    files: &[PathBuf],
    client: &str,
    limiter: &RateLimiter,
    now_ms: impl Fn() -> u64,
) -> Result<Vec<String>> {
    ws.update(|store| {
        let mut explanations = Vec::with_capacity(files.len());
        for path in files {
            if !limiter.check(client, now_ms()) {
                warn!(client, "rate limit reached, skipping remaining themes");
                break;
            }
            let text = read_file(path)?;
            let response = parse_ai_response(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            let explanation = apply_ai_response(store, response)
                .with_context(|| format!("Failed to apply {}", path.display()))?;
            debug!("applied {}", path.display());
            explanations.push(explanation);
        }
        Ok(explanations)
    })
}

pub fn reset(ws: &Workspace) -> Result<()> {
    ws.update(|store| {
        store.reset_to_defaults();
        Ok(())
    })
}

/// A field addressed as `<name>` or `<group>.<key>` on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Color(SemanticRole),
    Shade(SemanticRole),
    Neutral,
    Radius,
    Font,
    Text(TextSlot),
    Bg(BgSlot),
    Border(BorderSlot),
}

fn parse_token<T: Token>(id: &str) -> Result<T> {
    match T::from_id(id) {
        Some(token) => Ok(token),
        None => {
            let expected = T::all().iter().map(|t| t.id()).collect::<Vec<_>>();
            bail!(
                "unknown {} '{}', expected one of: {}",
                T::KIND,
                id,
                expected.join(", ")
            )
        }
    }
}

impl Field {
    pub fn parse(name: &str) -> Result<Self> {
        let field = match name.split_once('.') {
            None => match name {
                "neutral" => Self::Neutral,
                "radius" => Self::Radius,
                "font" => Self::Font,
                _ => bail!("unknown field '{name}'"),
            },
            Some(("color", key)) => Self::Color(parse_token(key)?),
            Some(("shade", key)) => Self::Shade(parse_token(key)?),
            Some(("text", key)) => Self::Text(parse_token(key)?),
            Some(("bg", key)) => Self::Bg(parse_token(key)?),
            Some(("border", key)) => Self::Border(parse_token(key)?),
            Some((group, _)) => bail!("unknown field group '{group}'"),
        };
        Ok(field)
    }
}

/// Set one field of the live config for `mode`.
pub fn set(ws: &Workspace, mode: ColorMode, field: Field, value: &str) -> Result<()> {
    ws.update(|store| {
        match field {
            Field::Color(role) => {
                store.set_semantic_color(mode, role, parse_token::<ChromaticPalette>(value)?)
            }
            Field::Shade(role) => store.set_color_shade(mode, role, parse_token::<Shade>(value)?),
            Field::Neutral => store.set_neutral(mode, parse_token::<NeutralPalette>(value)?),
            Field::Radius => {
                let radius: f64 = value
                    .parse()
                    .with_context(|| format!("invalid radius '{value}'"))?;
                store.set_radius(mode, radius)
            }
            Field::Font => {
                let font = value.trim();
                if font.is_empty() {
                    bail!("font name cannot be empty");
                }
                store.set_font(mode, font)
            }
            Field::Text(slot) => store.set_text_override(mode, slot, parse_token(value)?),
            Field::Bg(slot) => store.set_bg_override(mode, slot, parse_token(value)?),
            Field::Border(slot) => store.set_border_override(mode, slot, parse_token(value)?),
        }
        Ok(())
    })
}

/// Trim a preset name, rejecting empty ones.
pub fn preset_name(raw: &str) -> Result<&str> {
    let name = raw.trim();
    if name.is_empty() {
        bail!("preset name cannot be empty");
    }
    Ok(name)
}

pub fn preset_list(ws: &Workspace) -> Result<Vec<String>> {
    let store = ws.load_store()?;
    Ok(store
        .saved_presets()
        .iter()
        .map(|preset| match preset.updated_at {
            Some(at) => format!("{}\t{}", preset.name, at.format("%Y-%m-%d %H:%M")),
            None => preset.name.clone(),
        })
        .collect())
}

pub fn preset_save(ws: &Workspace, name: &str) -> Result<SavePresetOutcome> {
    let name = preset_name(name)?;
    ws.update(|store| Ok(store.save_preset(name)))
}

pub fn preset_load(ws: &Workspace, name: &str) -> Result<()> {
    let name = preset_name(name)?;
    ws.update(|store| {
        if !store.load_preset_named(name) {
            bail!("no preset named '{name}'");
        }
        Ok(())
    })
}

pub fn preset_delete(ws: &Workspace, name: &str) -> Result<()> {
    let name = preset_name(name)?;
    ws.update(|store| {
        store.delete_preset(name);
        Ok(())
    })
}
