//! Normalization of generated themes
//!
//! A generated theme always carries the light-mode fields and an explanation.
//! Every dark-mode and override field may be missing or `null`; each one falls
//! back independently:
//!
//! | field            | fallback                                  |
//! |------------------|-------------------------------------------|
//! | `darkColors`     | the light `colors`                        |
//! | `darkNeutral`    | `neutral`                                 |
//! | `darkRadius`     | `radius`                                  |
//! | `darkFont`       | `font`                                    |
//! | `lightOverrides` | [`ai_fallback_overrides`] (light)         |
//! | `darkOverrides`  | [`ai_fallback_overrides`] (dark)          |
//!
//! Shades are never generated; both shade maps are always the defaults.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ThemeConfig;
use crate::error::AiError;
use crate::schema;
use crate::store::ThemeStore;
use crate::tokens::*;

/// Generated theme as received from the provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiThemeResponse {
    pub colors: SemanticColors,
    pub neutral: NeutralPalette,
    pub radius: f64,
    pub font: String,
    #[serde(default)]
    pub dark_colors: Option<SemanticColors>,
    #[serde(default)]
    pub dark_neutral: Option<NeutralPalette>,
    #[serde(default)]
    pub dark_radius: Option<f64>,
    #[serde(default)]
    pub dark_font: Option<String>,
    #[serde(default)]
    pub light_overrides: Option<TokenOverrides>,
    #[serde(default)]
    pub dark_overrides: Option<TokenOverrides>,
    pub explanation: String,
}

/// A complete configuration built from a generated theme.
#[derive(Clone, Debug, PartialEq)]
pub struct AiThemeResult {
    pub theme_config: ThemeConfig,
    pub explanation: String,
}

/// Merge a generated theme with the fallbacks into a complete configuration.
///
/// Only reshapes data. The result is not validated here; see
/// [`apply_ai_response`] for the validating path into a store.
pub fn build_theme_config(raw: AiThemeResponse) -> AiThemeResult {
    let AiThemeResponse {
        colors,
        neutral,
        radius,
        font,
        dark_colors,
        dark_neutral,
        dark_radius,
        dark_font,
        light_overrides,
        dark_overrides,
        explanation,
    } = raw;

    let theme_config = ThemeConfig {
        colors,
        color_shades: default_color_shades(ColorMode::Light),
        dark_colors: dark_colors.unwrap_or(colors),
        dark_color_shades: default_color_shades(ColorMode::Dark),
        neutral,
        dark_neutral: dark_neutral.unwrap_or(neutral),
        radius,
        dark_radius: dark_radius.unwrap_or(radius),
        dark_font: dark_font.unwrap_or_else(|| font.clone()),
        font,
        light_overrides: light_overrides
            .unwrap_or_else(|| ai_fallback_overrides(ColorMode::Light)),
        dark_overrides: dark_overrides.unwrap_or_else(|| ai_fallback_overrides(ColorMode::Dark)),
    };

    AiThemeResult {
        theme_config,
        explanation,
    }
}

/// Parse the provider's JSON payload.
///
/// Palette, shade and slot values outside their closed sets are rejected here;
/// `null` and missing optional fields both mean "absent".
pub fn parse_ai_response(text: &str) -> Result<AiThemeResponse, AiError> {
    Ok(serde_json::from_str(text)?)
}

/// Normalize a generated theme, validate the result and load it into `store`.
///
/// Returns the explanation on success. The store is untouched on failure.
pub fn apply_ai_response(store: &mut ThemeStore, raw: AiThemeResponse) -> Result<String, AiError> {
    let AiThemeResult {
        theme_config,
        explanation,
    } = build_theme_config(raw);

    schema::check(&theme_config).map_err(AiError::Invalid)?;

    debug!("applying generated theme");
    store.load_config(&theme_config);
    Ok(explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn colors() -> SemanticColors {
        SemanticColors {
            primary: ChromaticPalette::Violet,
            secondary: ChromaticPalette::Pink,
            success: ChromaticPalette::Emerald,
            info: ChromaticPalette::Sky,
            warning: ChromaticPalette::Amber,
            error: ChromaticPalette::Rose,
        }
    }

    fn bare_response() -> AiThemeResponse {
        AiThemeResponse {
            colors: colors(),
            neutral: NeutralPalette::Slate,
            radius: 0.25,
            font: "Inter".into(),
            dark_colors: None,
            dark_neutral: None,
            dark_radius: None,
            dark_font: None,
            light_overrides: None,
            dark_overrides: None,
            explanation: "x".into(),
        }
    }

    #[test]
    fn missing_fields_fall_back_independently() {
        let result = build_theme_config(bare_response());
        let config = &result.theme_config;

        assert_eq!(config.dark_colors, config.colors);
        assert_eq!(config.dark_neutral, NeutralPalette::Slate);
        assert_eq!(config.dark_radius, 0.25);
        assert_eq!(config.dark_font, "Inter");
        assert_eq!(config.light_overrides, ai_fallback_overrides(ColorMode::Light));
        assert_eq!(config.dark_overrides, ai_fallback_overrides(ColorMode::Dark));
        assert_eq!(config.color_shades, default_color_shades(ColorMode::Light));
        assert_eq!(config.dark_color_shades, default_color_shades(ColorMode::Dark));
        assert_eq!(result.explanation, "x");
        assert!(schema::check(config).is_ok());
    }

    #[test]
    fn supplied_fields_are_kept() {
        let mut raw = bare_response();
        let mut dark_overrides = ai_fallback_overrides(ColorMode::Dark);
        dark_overrides.bg.set(BgSlot::Default, Shade::Black);
        raw.dark_neutral = Some(NeutralPalette::Zinc);
        raw.dark_font = Some("JetBrains Mono".into());
        raw.dark_overrides = Some(dark_overrides);

        let config = build_theme_config(raw).theme_config;
        assert_eq!(config.dark_neutral, NeutralPalette::Zinc);
        assert_eq!(config.dark_font, "JetBrains Mono");
        assert_eq!(config.dark_overrides.bg.default, Shade::Black);
        assert_eq!(config.dark_radius, 0.25);
        assert_eq!(config.light_overrides, ai_fallback_overrides(ColorMode::Light));
    }

    #[test]
    fn parse_treats_null_as_absent() {
        let text = json!({
            "colors": {
                "primary": "violet",
                "secondary": "pink",
                "success": "emerald",
                "info": "sky",
                "warning": "amber",
                "error": "rose"
            },
            "neutral": "slate",
            "radius": 0.25,
            "font": "Inter",
            "darkColors": null,
            "darkNeutral": null,
            "darkRadius": null,
            "darkFont": null,
            "lightOverrides": null,
            "darkOverrides": null,
            "explanation": "x"
        })
        .to_string();

        let parsed = parse_ai_response(&text).unwrap();
        assert_eq!(parsed, bare_response());

        let config = build_theme_config(parsed).theme_config;
        assert_eq!(config.dark_overrides, ai_fallback_overrides(ColorMode::Dark));
    }

    #[test]
    fn parse_rejects_unknown_palette() {
        let text = r#"{"colors":{"primary":"mauve"},"neutral":"slate","radius":0.25,"font":"Inter","explanation":"x"}"#;
        assert!(matches!(parse_ai_response(text), Err(AiError::Parse(_))));
    }

    #[test]
    fn apply_rejects_out_of_bounds_radius_without_touching_store() {
        let mut store = ThemeStore::new();
        let mut raw = bare_response();
        raw.dark_radius = Some(4.0);

        let err = apply_ai_response(&mut store, raw).unwrap_err();
        match err {
            AiError::Invalid(issues) => assert_eq!(issues[0].path, "darkRadius"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.config(), &ThemeConfig::default());
        assert_eq!(store.history_len(), 1);
    }

    #[test]
    fn apply_loads_config_and_returns_explanation() {
        let mut store = ThemeStore::new();
        let explanation = apply_ai_response(&mut store, bare_response()).unwrap();
        assert_eq!(explanation, "x");
        assert_eq!(store.config().colors, colors());
        assert!(store.can_undo());
    }
}
