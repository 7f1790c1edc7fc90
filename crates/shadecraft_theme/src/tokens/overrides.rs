//! Text, background and border token overrides
//!
//! Each category has a closed set of slots. An override record assigns a
//! neutral shade to every slot of every category; records are always complete.

use super::{ColorMode, Shade, Token};
use serde::{Deserialize, Serialize};

token_enum! {
    pub enum TextSlot ("text slot") {
        Dimmed => "dimmed",
        Muted => "muted",
        Toned => "toned",
        Default => "default",
        Highlighted => "highlighted",
        Inverted => "inverted",
    }
}

token_enum! {
    pub enum BgSlot ("bg slot") {
        Default => "default",
        Muted => "muted",
        Elevated => "elevated",
        Accented => "accented",
        Inverted => "inverted",
    }
}

token_enum! {
    pub enum BorderSlot ("border slot") {
        Default => "default",
        Muted => "muted",
        Accented => "accented",
        Inverted => "inverted",
    }
}

/// A category of override slots (text, bg or border).
///
/// Lets the validator and the CSS generator walk any category the same way.
pub trait OverrideCategory: Clone + PartialEq + std::fmt::Debug {
    type Slot: Token;

    /// Key of the category inside a [`TokenOverrides`] record.
    const NAME: &'static str;

    /// CSS custom-property prefix. The `default` slot uses the prefix alone.
    const CSS_PREFIX: &'static str;

    fn get(&self, slot: Self::Slot) -> Shade;

    fn set(&mut self, slot: Self::Slot, shade: Shade);

    /// Build a record slot by slot, failing if any slot has no shade.
    fn try_from_fn(f: impl FnMut(Self::Slot) -> Option<Shade>) -> Option<Self>;

    /// CSS variable name for a slot
    fn css_variable(slot: Self::Slot) -> String {
        match slot.id() {
            "default" => Self::CSS_PREFIX.to_string(),
            id => format!("{}-{}", Self::CSS_PREFIX, id),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextOverrides {
    pub dimmed: Shade,
    pub muted: Shade,
    pub toned: Shade,
    pub default: Shade,
    pub highlighted: Shade,
    pub inverted: Shade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BgOverrides {
    pub default: Shade,
    pub muted: Shade,
    pub elevated: Shade,
    pub accented: Shade,
    pub inverted: Shade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderOverrides {
    pub default: Shade,
    pub muted: Shade,
    pub accented: Shade,
    pub inverted: Shade,
}

impl OverrideCategory for TextOverrides {
    type Slot = TextSlot;
    const NAME: &'static str = "text";
    const CSS_PREFIX: &'static str = "--ui-text";

    fn get(&self, slot: TextSlot) -> Shade {
        match slot {
            TextSlot::Dimmed => self.dimmed,
            TextSlot::Muted => self.muted,
            TextSlot::Toned => self.toned,
            TextSlot::Default => self.default,
            TextSlot::Highlighted => self.highlighted,
            TextSlot::Inverted => self.inverted,
        }
    }

    fn set(&mut self, slot: TextSlot, shade: Shade) {
        match slot {
            TextSlot::Dimmed => self.dimmed = shade,
            TextSlot::Muted => self.muted = shade,
            TextSlot::Toned => self.toned = shade,
            TextSlot::Default => self.default = shade,
            TextSlot::Highlighted => self.highlighted = shade,
            TextSlot::Inverted => self.inverted = shade,
        }
    }

    fn try_from_fn(mut f: impl FnMut(TextSlot) -> Option<Shade>) -> Option<Self> {
        Some(Self {
            dimmed: f(TextSlot::Dimmed)?,
            muted: f(TextSlot::Muted)?,
            toned: f(TextSlot::Toned)?,
            default: f(TextSlot::Default)?,
            highlighted: f(TextSlot::Highlighted)?,
            inverted: f(TextSlot::Inverted)?,
        })
    }
}

impl OverrideCategory for BgOverrides {
    type Slot = BgSlot;
    const NAME: &'static str = "bg";
    const CSS_PREFIX: &'static str = "--ui-bg";

    fn get(&self, slot: BgSlot) -> Shade {
        match slot {
            BgSlot::Default => self.default,
            BgSlot::Muted => self.muted,
            BgSlot::Elevated => self.elevated,
            BgSlot::Accented => self.accented,
            BgSlot::Inverted => self.inverted,
        }
    }

    fn set(&mut self, slot: BgSlot, shade: Shade) {
        match slot {
            BgSlot::Default => self.default = shade,
            BgSlot::Muted => self.muted = shade,
            BgSlot::Elevated => self.elevated = shade,
            BgSlot::Accented => self.accented = shade,
            BgSlot::Inverted => self.inverted = shade,
        }
    }

    fn try_from_fn(mut f: impl FnMut(BgSlot) -> Option<Shade>) -> Option<Self> {
        Some(Self {
            default: f(BgSlot::Default)?,
            muted: f(BgSlot::Muted)?,
            elevated: f(BgSlot::Elevated)?,
            accented: f(BgSlot::Accented)?,
            inverted: f(BgSlot::Inverted)?,
        })
    }
}

impl OverrideCategory for BorderOverrides {
    type Slot = BorderSlot;
    const NAME: &'static str = "border";
    const CSS_PREFIX: &'static str = "--ui-border";

    fn get(&self, slot: BorderSlot) -> Shade {
        match slot {
            BorderSlot::Default => self.default,
            BorderSlot::Muted => self.muted,
            BorderSlot::Accented => self.accented,
            BorderSlot::Inverted => self.inverted,
        }
    }

    fn set(&mut self, slot: BorderSlot, shade: Shade) {
        match slot {
            BorderSlot::Default => self.default = shade,
            BorderSlot::Muted => self.muted = shade,
            BorderSlot::Accented => self.accented = shade,
            BorderSlot::Inverted => self.inverted = shade,
        }
    }

    fn try_from_fn(mut f: impl FnMut(BorderSlot) -> Option<Shade>) -> Option<Self> {
        Some(Self {
            default: f(BorderSlot::Default)?,
            muted: f(BorderSlot::Muted)?,
            accented: f(BorderSlot::Accented)?,
            inverted: f(BorderSlot::Inverted)?,
        })
    }
}

/// Complete set of overrides for one mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenOverrides {
    pub text: TextOverrides,
    pub bg: BgOverrides,
    pub border: BorderOverrides,
}

/// Default overrides the editor starts from (and diffs against on export).
pub fn default_overrides(mode: ColorMode) -> TokenOverrides {
    use Shade::*;
    match mode {
        ColorMode::Light => TokenOverrides {
            text: TextOverrides {
                dimmed: S400,
                muted: S500,
                toned: S600,
                default: S700,
                highlighted: S900,
                inverted: White,
            },
            bg: BgOverrides {
                default: White,
                muted: S50,
                elevated: S100,
                accented: S200,
                inverted: S900,
            },
            border: BorderOverrides {
                default: S200,
                muted: S200,
                accented: S300,
                inverted: S900,
            },
        },
        ColorMode::Dark => TokenOverrides {
            text: TextOverrides {
                dimmed: S500,
                muted: S400,
                toned: S300,
                default: S200,
                highlighted: White,
                inverted: S900,
            },
            bg: BgOverrides {
                default: S900,
                muted: S800,
                elevated: S800,
                accented: S700,
                inverted: White,
            },
            border: BorderOverrides {
                default: S800,
                muted: S700,
                accented: S700,
                inverted: White,
            },
        },
    }
}

/// Overrides filled in when a generated theme leaves them out.
///
/// Higher-contrast body text and a deeper dark background than
/// [`default_overrides`].
pub fn ai_fallback_overrides(mode: ColorMode) -> TokenOverrides {
    use Shade::*;
    match mode {
        ColorMode::Light => TokenOverrides {
            text: TextOverrides {
                dimmed: S400,
                muted: S500,
                toned: S600,
                default: S800,
                highlighted: S950,
                inverted: White,
            },
            bg: BgOverrides {
                default: White,
                muted: S50,
                elevated: S100,
                accented: S200,
                inverted: S900,
            },
            border: BorderOverrides {
                default: S200,
                muted: S100,
                accented: S300,
                inverted: S900,
            },
        },
        ColorMode::Dark => TokenOverrides {
            text: TextOverrides {
                dimmed: S500,
                muted: S400,
                toned: S300,
                default: S100,
                highlighted: White,
                inverted: S900,
            },
            bg: BgOverrides {
                default: S950,
                muted: S900,
                elevated: S800,
                accented: S700,
                inverted: White,
            },
            border: BorderOverrides {
                default: S800,
                muted: S900,
                accented: S700,
                inverted: White,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_variable_names() {
        assert_eq!(TextOverrides::css_variable(TextSlot::Default), "--ui-text");
        assert_eq!(
            TextOverrides::css_variable(TextSlot::Dimmed),
            "--ui-text-dimmed"
        );
        assert_eq!(BgOverrides::css_variable(BgSlot::Elevated), "--ui-bg-elevated");
        assert_eq!(BorderOverrides::css_variable(BorderSlot::Default), "--ui-border");
    }

    #[test]
    fn slot_counts() {
        assert_eq!(TextSlot::all().len(), 6);
        assert_eq!(BgSlot::all().len(), 5);
        assert_eq!(BorderSlot::all().len(), 4);
    }

    #[test]
    fn try_from_fn_matches_get() {
        let light = default_overrides(ColorMode::Light);
        let rebuilt = TextOverrides::try_from_fn(|slot| Some(light.text.get(slot)));
        assert_eq!(rebuilt, Some(light.text));

        let partial = BorderOverrides::try_from_fn(|slot| match slot {
            BorderSlot::Muted => None,
            _ => Some(Shade::S200),
        });
        assert_eq!(partial, None);
    }

    #[test]
    fn set_touches_only_one_slot() {
        let mut bg = default_overrides(ColorMode::Dark).bg;
        bg.set(BgSlot::Muted, Shade::S950);
        assert_eq!(bg.muted, Shade::S950);
        assert_eq!(bg.default, Shade::S900);
        assert_eq!(bg.elevated, Shade::S800);
    }

    #[test]
    fn ai_fallback_differs_from_editor_defaults() {
        for mode in ColorMode::all() {
            assert_ne!(ai_fallback_overrides(*mode), default_overrides(*mode));
        }
    }
}
