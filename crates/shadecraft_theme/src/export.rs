//! CSS, app-config and JSON export
//!
//! All generators are pure and emit only deltas from the default tables, so
//! exporting the default theme produces the smallest possible output (an empty
//! dark block in particular).


use crate::config::ThemeConfig;
use crate::tokens::*;

/// CSS value for a neutral shade: `white`/`black` literally, otherwise a
/// reference to the neutral palette variable.
pub fn neutral_reference(shade: Shade) -> String {
    if shade.is_numeric() {
        format!("var(--ui-color-neutral-{})", shade.id())
    } else {
        shade.id().to_string()
    }
}

fn role_reference(role: SemanticRole, shade: Shade) -> String {
    if shade.is_numeric() {
        format!("var(--ui-color-{}-{})", role.id(), shade.id())
    } else {
        shade.id().to_string()
    }
}

fn palette_reference(palette: &str, shade: Shade) -> String {
    if shade.is_numeric() {
        format!("var(--color-{}-{})", palette, shade.id())
    } else {
        shade.id().to_string()
    }
}

/// `variable: value` lines for every slot of `overrides` that differs from
/// `defaults`, in slot order.
pub fn override_lines<C: OverrideCategory>(overrides: &C, defaults: &C) -> Vec<String> {
    C::Slot::all()
        .iter()
        .filter(|slot| overrides.get(**slot) != defaults.get(**slot))
        .map(|slot| {
            format!(
                "{}: {}",
                C::css_variable(*slot),
                neutral_reference(overrides.get(*slot))
            )
        })
        .collect()
}

/// Delta lines for all three categories: text, then bg, then border.
pub fn token_override_lines(overrides: &TokenOverrides, defaults: &TokenOverrides) -> Vec<String> {
    let mut lines = override_lines(&overrides.text, &defaults.text);
    lines.extend(override_lines(&overrides.bg, &defaults.bg));
    lines.extend(override_lines(&overrides.border, &defaults.border));
    lines
}

/// Delta lines for semantic colors in one mode.
///
/// A role whose palette differs from `base` references that palette directly;
/// otherwise a role whose shade differs from the mode default references the
/// role's own scale.
fn color_lines(
    colors: &SemanticColors,
    shades: &ColorShades,
    base: &SemanticColors,
    default_shades: &ColorShades,
) -> Vec<String> {
    let mut lines = Vec::new();
    for (role, palette) in colors.iter() {
        let shade = shades.get(role);
        if palette != base.get(role) {
            lines.push(format!(
                "--ui-{}: {}",
                role.id(),
                palette_reference(palette.id(), shade)
            ));
        } else if shade != default_shades.get(role) {
            lines.push(format!("--ui-{}: {}", role.id(), role_reference(role, shade)));
        }
    }
    lines
}

fn font_line(font: &str) -> String {
    format!("--font-sans: '{}', sans-serif", css_string_body(font))
}

/// Escape `value` for a single-quoted CSS string.
fn css_string_body(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\A "),
            '\r' => out.push_str("\\D "),
            _ => out.push(c),
        }
    }
    out
}

fn radius_line(radius: f64) -> String {
    format!("--ui-radius: {radius}rem")
}

fn css_block(selector: &str, lines: &[String]) -> String {
    let mut out = String::with_capacity(32 + lines.len() * 48);
    out.push_str(selector);
    out.push_str(" {\n");
    for line in lines {
        out.push_str("  ");
        out.push_str(line);
        out.push_str(";\n");
    }
    out.push('}');
    out
}

/// Generated theme stylesheet, split by mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeCss {
    /// `:root` block; always present (font and radius at minimum)
    pub root_block: String,
    /// `.dark` block; empty when dark mode has no deltas
    pub dark_block: String,
}

impl ThemeCss {
    /// Both blocks joined into one stylesheet
    pub fn to_stylesheet(&self) -> String {
        let mut css = self.root_block.clone();
        if !self.dark_block.is_empty() {
            css.push_str("\n\n");
            css.push_str(&self.dark_block);
        }
        css.push('\n');
        css
    }
}

/// Generate the theme CSS, diffing overrides against the given defaults.
pub fn theme_css(
    config: &ThemeConfig,
    light_defaults: &TokenOverrides,
    dark_defaults: &TokenOverrides,
) -> ThemeCss {
    let mut root = vec![font_line(&config.font), radius_line(config.radius)];
    root.extend(color_lines(
        &config.colors,
        &config.color_shades,
        &config.colors,
        &default_color_shades(ColorMode::Light),
    ));
    root.extend(token_override_lines(&config.light_overrides, light_defaults));

    let mut dark = Vec::new();
    if config.dark_font != config.font {
        dark.push(font_line(&config.dark_font));
    }
    if config.dark_radius != config.radius {
        dark.push(radius_line(config.dark_radius));
    }
    if config.dark_neutral != config.neutral {
        for shade in Shade::numeric() {
            dark.push(format!(
                "--ui-color-neutral-{}: {}",
                shade.id(),
                palette_reference(config.dark_neutral.id(), *shade)
            ));
        }
    }
    dark.extend(color_lines(
        &config.dark_colors,
        &config.dark_color_shades,
        &config.colors,
        &default_color_shades(ColorMode::Dark),
    ));
    dark.extend(token_override_lines(&config.dark_overrides, dark_defaults));

    ThemeCss {
        root_block: css_block(":root", &root),
        dark_block: if dark.is_empty() {
            String::new()
        } else {
            css_block(".dark", &dark)
        },
    }
}

/// [`theme_css`] against the editor's default override tables.
pub fn default_theme_css(config: &ThemeConfig) -> ThemeCss {
    theme_css(
        config,
        &default_overrides(ColorMode::Light),
        &default_overrides(ColorMode::Dark),
    )
}

/// Application config snippet assigning palettes to the semantic roles.
///
/// Shade customizations and dark-mode palettes cannot be expressed here; when
/// present they are mentioned in leading comments that point at the CSS.
pub fn app_config_export(config: &ThemeConfig) -> String {
    let mut out = String::new();
    if config.has_custom_shades() {
        out.push_str("// Note: custom color shades are applied through CSS variables.\n");
        out.push_str("// Include the exported theme CSS alongside this file.\n");
    }
    if config.has_dark_divergence() {
        out.push_str("// Note: dark mode uses different palettes than light mode.\n");
        out.push_str("// Those are applied by the `.dark` block of the exported theme CSS.\n");
    }
    if !out.is_empty() {
        out.push('\n');
    }

    out.push_str("export default defineAppConfig({\n");
    out.push_str("  ui: {\n");
    out.push_str("    colors: {\n");
    for (role, palette) in config.colors.iter() {
        out.push_str(&format!("      {}: '{}',\n", role.id(), palette.id()));
    }
    out.push_str(&format!("      neutral: '{}'\n", config.neutral.id()));
    out.push_str("    }\n");
    out.push_str("  }\n");
    out.push_str("})\n");
    out
}

/// Canonical JSON form of a configuration.
///
/// Parsing the output and running it through [`crate::schema::validate`]
/// yields a configuration equal to `config`.
pub fn json_export(config: &ThemeConfig) -> serde_json::Result<String> {
    serde_json::to_string_pretty(config)
}

/// Export targets offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Css,
    AppConfig,
    Json,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Css => "main.css",
            Self::AppConfig => "app.config.ts",
            Self::Json => "theme.json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Css => "text/css",
            Self::AppConfig => "text/typescript",
            Self::Json => "application/json",
        }
    }

    /// Render `config` in this format.
    pub fn render(self, config: &ThemeConfig) -> serde_json::Result<ExportArtifact> {
        let contents = match self {
            Self::Css => default_theme_css(config).to_stylesheet(),
            Self::AppConfig => app_config_export(config),
            Self::Json => json_export(config)?,
        };
        Ok(ExportArtifact {
            file_name: self.file_name(),
            mime_type: self.mime_type(),
            contents,
        })
    }
}

/// A rendered export, ready to hand to a file-save collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_overrides_emit_nothing() {
        for mode in ColorMode::all() {
            let defaults = default_overrides(*mode);
            assert!(token_override_lines(&defaults, &defaults).is_empty());
        }
    }

    #[test]
    fn single_slot_change_emits_one_line() {
        let defaults = default_overrides(ColorMode::Light);
        let mut text = defaults.text;
        text.set(TextSlot::Muted, Shade::S600);

        assert_eq!(
            override_lines(&text, &defaults.text),
            vec!["--ui-text-muted: var(--ui-color-neutral-600)"]
        );
    }

    #[test]
    fn default_slot_uses_bare_prefix_and_literals() {
        let defaults = default_overrides(ColorMode::Light);
        let mut bg = defaults.bg;
        bg.set(BgSlot::Default, Shade::Black);

        assert_eq!(override_lines(&bg, &defaults.bg), vec!["--ui-bg: black"]);
    }

    #[test]
    fn default_config_css() {
        let css = default_theme_css(&ThemeConfig::default());
        assert_eq!(
            css.root_block,
            ":root {\n  --font-sans: 'Public Sans', sans-serif;\n  --ui-radius: 0.25rem;\n}"
        );
        assert_eq!(css.dark_block, "");
        assert_eq!(css.to_stylesheet(), format!("{}\n", css.root_block));
    }

    #[test]
    fn dark_deltas_land_in_dark_block() {
        let mut config = ThemeConfig::default();
        config.dark_overrides.border.set(BorderSlot::Muted, Shade::S600);
        config.dark_colors.primary = ChromaticPalette::Indigo;
        config.dark_color_shades.error = Shade::S300;
        config.dark_radius = 0.5;

        let css = default_theme_css(&config);
        assert!(!css.root_block.contains("--ui-border-muted"));
        assert_eq!(
            css.dark_block,
            ".dark {\n  --ui-radius: 0.5rem;\n  --ui-primary: var(--color-indigo-400);\n  \
             --ui-error: var(--ui-color-error-300);\n  \
             --ui-border-muted: var(--ui-color-neutral-600);\n}"
        );
    }

    #[test]
    fn light_shade_change_lands_in_root_block() {
        let mut config = ThemeConfig::default();
        config.color_shades.primary = Shade::S700;
        let css = default_theme_css(&config);
        assert!(css
            .root_block
            .contains("--ui-primary: var(--ui-color-primary-700);"));
        assert_eq!(css.dark_block, "");
    }

    #[test]
    fn dark_neutral_remaps_every_numeric_shade() {
        let mut config = ThemeConfig::default();
        config.dark_neutral = NeutralPalette::Zinc;
        let css = default_theme_css(&config);
        assert_eq!(css.dark_block.matches("--ui-color-neutral-").count(), 11);
        assert!(css
            .dark_block
            .contains("--ui-color-neutral-950: var(--color-zinc-950);"));
    }

    #[test]
    fn font_quotes_are_escaped() {
        assert_eq!(font_line("Bob's Sans"), "--font-sans: 'Bob\\'s Sans', sans-serif");
    }

    #[test]
    fn font_backslashes_and_newlines_are_escaped() {
        assert_eq!(font_line("Foo\\"), r"--font-sans: 'Foo\\', sans-serif");
        assert_eq!(font_line("A\\'B"), r"--font-sans: 'A\\\'B', sans-serif");
        assert_eq!(font_line("Two\nLines"), r"--font-sans: 'Two\A Lines', sans-serif");

        let mut config = ThemeConfig::default();
        config.font = "Foo\\".into();
        assert!(crate::schema::check(&config).is_ok());
        let css = default_theme_css(&config);
        assert!(css.root_block.contains(r"'Foo\\', sans-serif;"));
    }

    #[test]
    fn app_config_for_default_has_no_notes() {
        let out = app_config_export(&ThemeConfig::default());
        assert_eq!(
            out,
            "export default defineAppConfig({\n  ui: {\n    colors: {\n      \
             primary: 'green',\n      secondary: 'blue',\n      success: 'green',\n      \
             info: 'blue',\n      warning: 'yellow',\n      error: 'red',\n      \
             neutral: 'slate'\n    }\n  }\n})\n"
        );
    }

    #[test]
    fn app_config_notes_are_comments_only() {
        let mut config = ThemeConfig::default();
        config.color_shades.info = Shade::S600;
        config.dark_neutral = NeutralPalette::Stone;

        let out = app_config_export(&config);
        let (notes, snippet) = out.split_once("\n\n").unwrap();
        assert!(notes.lines().all(|line| line.starts_with("// ")));
        assert_eq!(notes.lines().count(), 4);
        assert_eq!(snippet, app_config_export(&ThemeConfig::default()));
    }

    #[test]
    fn json_export_round_trips_through_validation() {
        let mut config = ThemeConfig::default();
        config.radius = 1.125;
        config.font = "Inter".into();
        config.light_overrides.text.set(TextSlot::Toned, Shade::S950);

        let json = json_export(&config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(crate::schema::validate(&value).unwrap(), config);
    }

    #[test]
    fn export_formats_carry_file_metadata() {
        let config = ThemeConfig::default();
        let artifact = ExportFormat::Json.render(&config).unwrap();
        assert_eq!(artifact.file_name, "theme.json");
        assert_eq!(artifact.mime_type, "application/json");
        assert!(artifact.contents.starts_with('{'));

        let css = ExportFormat::Css.render(&config).unwrap();
        assert!(css.contents.starts_with(":root {"));
    }
}
