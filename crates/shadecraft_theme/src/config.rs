//! The theme configuration data model
//!
//! [`ThemeConfig`] is the single entity every other part of the engine reads or
//! produces. Most fields come in light/dark pairs; [`field_for_mode`] and the
//! `*_for` accessors resolve the branch for a given [`ColorMode`].

use crate::tokens::*;
use serde::{Deserialize, Serialize};

/// Inclusive lower bound of the corner radius, in rem.
pub const RADIUS_MIN: f64 = 0.0;

/// Inclusive upper bound of the corner radius, in rem.
pub const RADIUS_MAX: f64 = 2.0;

/// Radius of the default theme, in rem.
pub const DEFAULT_RADIUS: f64 = 0.25;

/// Font family of the default theme.
pub const DEFAULT_FONT: &str = "Public Sans";

/// A complete theme configuration.
///
/// Values of this type are always complete: every field is present and every
/// override category has all of its slots. Untrusted input goes through
/// [`crate::schema::validate`] before it becomes a `ThemeConfig`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub colors: SemanticColors,
    pub color_shades: ColorShades,
    pub dark_colors: SemanticColors,
    pub dark_color_shades: ColorShades,
    pub neutral: NeutralPalette,
    pub dark_neutral: NeutralPalette,
    /// Corner radius in rem, within [`RADIUS_MIN`]..=[`RADIUS_MAX`]
    pub radius: f64,
    pub dark_radius: f64,
    pub font: String,
    pub dark_font: String,
    pub light_overrides: TokenOverrides,
    pub dark_overrides: TokenOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let colors = SemanticColors::default();
        Self {
            colors,
            color_shades: default_color_shades(ColorMode::Light),
            dark_colors: colors,
            dark_color_shades: default_color_shades(ColorMode::Dark),
            neutral: NeutralPalette::Slate,
            dark_neutral: NeutralPalette::Slate,
            radius: DEFAULT_RADIUS,
            dark_radius: DEFAULT_RADIUS,
            font: DEFAULT_FONT.to_string(),
            dark_font: DEFAULT_FONT.to_string(),
            light_overrides: default_overrides(ColorMode::Light),
            dark_overrides: default_overrides(ColorMode::Dark),
        }
    }
}

/// Read the light or dark counterpart of a field.
///
/// ```rust,ignore
/// let font = field_for_mode(&config, ColorMode::Dark, |c| &c.font, |c| &c.dark_font);
/// ```
pub fn field_for_mode<T: ?Sized>(
    config: &ThemeConfig,
    mode: ColorMode,
    light: fn(&ThemeConfig) -> &T,
    dark: fn(&ThemeConfig) -> &T,
) -> &T {
    match mode {
        ColorMode::Light => light(config),
        ColorMode::Dark => dark(config),
    }
}

/// Write access to the light or dark counterpart of a field.
pub fn field_for_mode_mut<T: ?Sized>(
    config: &mut ThemeConfig,
    mode: ColorMode,
    light: fn(&mut ThemeConfig) -> &mut T,
    dark: fn(&mut ThemeConfig) -> &mut T,
) -> &mut T {
    match mode {
        ColorMode::Light => light(config),
        ColorMode::Dark => dark(config),
    }
}

impl ThemeConfig {
    // ========== Mode-aware accessors ==========

    pub fn colors_for(&self, mode: ColorMode) -> &SemanticColors {
        field_for_mode(self, mode, |c| &c.colors, |c| &c.dark_colors)
    }

    pub fn colors_for_mut(&mut self, mode: ColorMode) -> &mut SemanticColors {
        field_for_mode_mut(self, mode, |c| &mut c.colors, |c| &mut c.dark_colors)
    }

    pub fn shades_for(&self, mode: ColorMode) -> &ColorShades {
        field_for_mode(self, mode, |c| &c.color_shades, |c| &c.dark_color_shades)
    }

    pub fn shades_for_mut(&mut self, mode: ColorMode) -> &mut ColorShades {
        field_for_mode_mut(
            self,
            mode,
            |c| &mut c.color_shades,
            |c| &mut c.dark_color_shades,
        )
    }

    pub fn neutral_for(&self, mode: ColorMode) -> NeutralPalette {
        *field_for_mode(self, mode, |c| &c.neutral, |c| &c.dark_neutral)
    }

    pub fn neutral_for_mut(&mut self, mode: ColorMode) -> &mut NeutralPalette {
        field_for_mode_mut(self, mode, |c| &mut c.neutral, |c| &mut c.dark_neutral)
    }

    pub fn radius_for(&self, mode: ColorMode) -> f64 {
        *field_for_mode(self, mode, |c| &c.radius, |c| &c.dark_radius)
    }

    pub fn radius_for_mut(&mut self, mode: ColorMode) -> &mut f64 {
        field_for_mode_mut(self, mode, |c| &mut c.radius, |c| &mut c.dark_radius)
    }

    pub fn font_for(&self, mode: ColorMode) -> &str {
        field_for_mode(self, mode, |c| c.font.as_str(), |c| c.dark_font.as_str())
    }

    pub fn font_for_mut(&mut self, mode: ColorMode) -> &mut String {
        field_for_mode_mut(self, mode, |c| &mut c.font, |c| &mut c.dark_font)
    }

    pub fn overrides_for(&self, mode: ColorMode) -> &TokenOverrides {
        field_for_mode(self, mode, |c| &c.light_overrides, |c| &c.dark_overrides)
    }

    pub fn overrides_for_mut(&mut self, mode: ColorMode) -> &mut TokenOverrides {
        field_for_mode_mut(
            self,
            mode,
            |c| &mut c.light_overrides,
            |c| &mut c.dark_overrides,
        )
    }

    // ========== Queries used by the exporters ==========

    /// Whether any role uses a shade other than its mode default
    pub fn has_custom_shades(&self) -> bool {
        self.color_shades != default_color_shades(ColorMode::Light)
            || self.dark_color_shades != default_color_shades(ColorMode::Dark)
    }

    /// Whether dark mode uses different palettes than light mode
    pub fn has_dark_divergence(&self) -> bool {
        self.dark_colors != self.colors || self.dark_neutral != self.neutral
    }
}
