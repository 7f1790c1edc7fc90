//! Export round-trip and history-bound properties over arbitrary configs.

use proptest::prelude::*;
use proptest::sample::select;
use shadecraft_theme::export::{json_export, override_lines, theme_css};
use shadecraft_theme::{
    default_overrides, validate, BgOverrides, BorderOverrides, ChromaticPalette, ColorMode,
    NeutralPalette, OverrideCategory, RoleMap, Shade, TextOverrides, TextSlot, ThemeConfig,
    ThemeStore, TokenOverrides, DEFAULT_MAX_HISTORY,
};

fn arb_shade() -> impl Strategy<Value = Shade> {
    select(Shade::all())
}

fn arb_role_map<T: Copy + std::fmt::Debug + 'static>(
    values: &'static [T],
) -> impl Strategy<Value = RoleMap<T>> {
    prop::array::uniform6(select(values)).prop_map(
        |[primary, secondary, success, info, warning, error]| RoleMap {
            primary,
            secondary,
            success,
            info,
            warning,
            error,
        },
    )
}

fn arb_overrides() -> impl Strategy<Value = TokenOverrides> {
    (
        prop::array::uniform6(arb_shade()),
        prop::array::uniform5(arb_shade()),
        prop::array::uniform4(arb_shade()),
    )
        .prop_map(|(t, b, r)| TokenOverrides {
            text: TextOverrides {
                dimmed: t[0],
                muted: t[1],
                toned: t[2],
                default: t[3],
                highlighted: t[4],
                inverted: t[5],
            },
            bg: BgOverrides {
                default: b[0],
                muted: b[1],
                elevated: b[2],
                accented: b[3],
                inverted: b[4],
            },
            border: BorderOverrides {
                default: r[0],
                muted: r[1],
                accented: r[2],
                inverted: r[3],
            },
        })
}

// Quarter-rem steps keep the radius exactly representable.
fn arb_radius() -> impl Strategy<Value = f64> {
    (0u32..=8).prop_map(|quarters| f64::from(quarters) * 0.25)
}

fn arb_font() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z' ]{0,15}"
}

fn arb_config() -> impl Strategy<Value = ThemeConfig> {
    (
        (
            arb_role_map(ChromaticPalette::all()),
            arb_role_map(ChromaticPalette::all()),
            arb_role_map(Shade::all()),
            arb_role_map(Shade::all()),
        ),
        (
            select(NeutralPalette::all()),
            select(NeutralPalette::all()),
            arb_radius(),
            arb_radius(),
            arb_font(),
            arb_font(),
        ),
        (arb_overrides(), arb_overrides()),
    )
        .prop_map(
            |(
                (colors, dark_colors, color_shades, dark_color_shades),
                (neutral, dark_neutral, radius, dark_radius, font, dark_font),
                (light_overrides, dark_overrides),
            )| ThemeConfig {
                colors,
                color_shades,
                dark_colors,
                dark_color_shades,
                neutral,
                dark_neutral,
                radius,
                dark_radius,
                font,
                dark_font,
                light_overrides,
                dark_overrides,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn json_export_round_trips(config in arb_config()) {
        let text = json_export(&config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(validate(&value).unwrap(), config);
    }

    #[test]
    fn default_overrides_emit_nothing(mode in select(ColorMode::all())) {
        let defaults = default_overrides(mode);
        prop_assert!(override_lines(&defaults.text, &defaults.text).is_empty());
        prop_assert!(override_lines(&defaults.bg, &defaults.bg).is_empty());
        prop_assert!(override_lines(&defaults.border, &defaults.border).is_empty());
    }

    #[test]
    fn single_slot_change_emits_one_line(
        slot_index in 0usize..6,
        shade in arb_shade(),
    ) {
        let defaults = default_overrides(ColorMode::Light).text;
        let slot = TextSlot::all()[slot_index];
        prop_assume!(defaults.get(slot) != shade);

        let mut changed = defaults;
        changed.set(slot, shade);
        let lines = override_lines(&changed, &defaults);
        prop_assert_eq!(lines.len(), 1);
        prop_assert!(lines[0].starts_with(&TextOverrides::css_variable(slot)));
    }

    #[test]
    fn history_never_exceeds_bound(fonts in prop::collection::vec(arb_font(), 1..120)) {
        let mut store = ThemeStore::new();
        for font in &fonts {
            store.set_font(ColorMode::Light, font.as_str());
        }
        prop_assert!(store.history_len() <= DEFAULT_MAX_HISTORY);
        prop_assert_eq!(store.history_index(), store.history_len() - 1);

        let mut undos = 0;
        while store.undo() {
            undos += 1;
        }
        prop_assert_eq!(undos, store.history_len() - 1);
    }

    #[test]
    fn css_export_never_panics(config in arb_config()) {
        let defaults_light = default_overrides(ColorMode::Light);
        let defaults_dark = default_overrides(ColorMode::Dark);
        let css = theme_css(&config, &defaults_light, &defaults_dark);
        let root_ok = css.root_block.starts_with(":root {");
        let dark_ok = css.dark_block.is_empty() || css.dark_block.starts_with(".dark {");
        prop_assert!(root_ok, "root block must open with the :root selector");
        prop_assert!(dark_ok, "dark block must be empty or open with the .dark selector");
    }
}
