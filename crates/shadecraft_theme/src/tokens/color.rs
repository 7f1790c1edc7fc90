//! Palette, shade and semantic role tokens

use serde::{Deserialize, Serialize};

token_enum! {
    /// Hue families a semantic role can be assigned to.
    pub enum ChromaticPalette ("chromatic palette") {
        Red => "red",
        Orange => "orange",
        Amber => "amber",
        Yellow => "yellow",
        Lime => "lime",
        Green => "green",
        Emerald => "emerald",
        Teal => "teal",
        Cyan => "cyan",
        Sky => "sky",
        Blue => "blue",
        Indigo => "indigo",
        Violet => "violet",
        Purple => "purple",
        Fuchsia => "fuchsia",
        Pink => "pink",
        Rose => "rose",
    }
}

token_enum! {
    /// Grayscale families used for text, background and border tokens.
    pub enum NeutralPalette ("neutral palette") {
        Slate => "slate",
        Gray => "gray",
        Zinc => "zinc",
        Neutral => "neutral",
        Stone => "stone",
    }
}

token_enum! {
    /// Lightness within a palette, lightest first.
    pub enum Shade ("shade") {
        S50 => "50",
        S100 => "100",
        S200 => "200",
        S300 => "300",
        S400 => "400",
        S500 => "500",
        S600 => "600",
        S700 => "700",
        S800 => "800",
        S900 => "900",
        S950 => "950",
        White => "white",
        Black => "black",
    }
}

token_enum! {
    /// The six fixed purposes a palette is assigned to.
    pub enum SemanticRole ("semantic role") {
        Primary => "primary",
        Secondary => "secondary",
        Success => "success",
        Info => "info",
        Warning => "warning",
        Error => "error",
    }
}

token_enum! {
    /// Light or dark variant of a configuration.
    pub enum ColorMode ("color mode") {
        Light => "light",
        Dark => "dark",
    }
}

impl ColorMode {
    /// The opposite mode
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::Light
    }
}

impl Shade {
    /// The numeric part of the scale, without the `white`/`black` literals.
    pub fn numeric() -> &'static [Shade] {
        &Self::all()[..11]
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::White | Self::Black)
    }
}

impl ChromaticPalette {
    /// Hex value of the palette's 500 shade, for swatches.
    pub fn hex(self) -> u32 {
        match self {
            Self::Red => 0xEF4444,
            Self::Orange => 0xF97316,
            Self::Amber => 0xF59E0B,
            Self::Yellow => 0xEAB308,
            Self::Lime => 0x84CC16,
            Self::Green => 0x22C55E,
            Self::Emerald => 0x10B981,
            Self::Teal => 0x14B8A6,
            Self::Cyan => 0x06B6D4,
            Self::Sky => 0x0EA5E9,
            Self::Blue => 0x3B82F6,
            Self::Indigo => 0x6366F1,
            Self::Violet => 0x8B5CF6,
            Self::Purple => 0xA855F7,
            Self::Fuchsia => 0xD946EF,
            Self::Pink => 0xEC4899,
            Self::Rose => 0xF43F5E,
        }
    }

    /// `#rrggbb` form of [`hex`](Self::hex)
    pub fn hex_string(self) -> String {
        format!("#{:06x}", self.hex())
    }
}

impl NeutralPalette {
    /// Hex value of the palette's 500 shade, for swatches.
    pub fn hex(self) -> u32 {
        match self {
            Self::Slate => 0x64748B,
            Self::Gray => 0x6B7280,
            Self::Zinc => 0x71717A,
            Self::Neutral => 0x737373,
            Self::Stone => 0x78716C,
        }
    }

    pub fn hex_string(self) -> String {
        format!("#{:06x}", self.hex())
    }
}

/// One value per semantic role.
///
/// Used both for palette assignments ([`SemanticColors`]) and for shade
/// assignments ([`ColorShades`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMap<T> {
    pub primary: T,
    pub secondary: T,
    pub success: T,
    pub info: T,
    pub warning: T,
    pub error: T,
}

/// Palette assignment per semantic role
pub type SemanticColors = RoleMap<ChromaticPalette>;

/// Shade assignment per semantic role
pub type ColorShades = RoleMap<Shade>;

impl<T: Copy> RoleMap<T> {
    /// Same value for every role
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value)
    }

    pub fn from_fn(mut f: impl FnMut(SemanticRole) -> T) -> Self {
        Self {
            primary: f(SemanticRole::Primary),
            secondary: f(SemanticRole::Secondary),
            success: f(SemanticRole::Success),
            info: f(SemanticRole::Info),
            warning: f(SemanticRole::Warning),
            error: f(SemanticRole::Error),
        }
    }

    pub fn get(&self, role: SemanticRole) -> T {
        match role {
            SemanticRole::Primary => self.primary,
            SemanticRole::Secondary => self.secondary,
            SemanticRole::Success => self.success,
            SemanticRole::Info => self.info,
            SemanticRole::Warning => self.warning,
            SemanticRole::Error => self.error,
        }
    }

    pub fn set(&mut self, role: SemanticRole, value: T) {
        let slot = match role {
            SemanticRole::Primary => &mut self.primary,
            SemanticRole::Secondary => &mut self.secondary,
            SemanticRole::Success => &mut self.success,
            SemanticRole::Info => &mut self.info,
            SemanticRole::Warning => &mut self.warning,
            SemanticRole::Error => &mut self.error,
        };
        *slot = value;
    }

    /// `(role, value)` pairs in role order
    pub fn iter(&self) -> impl Iterator<Item = (SemanticRole, T)> + '_ {
        SemanticRole::all().iter().map(move |&role| (role, self.get(role)))
    }
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            primary: ChromaticPalette::Green,
            secondary: ChromaticPalette::Blue,
            success: ChromaticPalette::Green,
            info: ChromaticPalette::Blue,
            warning: ChromaticPalette::Yellow,
            error: ChromaticPalette::Red,
        }
    }
}

/// Default shade of every role in a mode: 500 in light mode, 400 in dark mode.
pub fn default_color_shades(mode: ColorMode) -> ColorShades {
    match mode {
        ColorMode::Light => ColorShades::splat(Shade::S500),
        ColorMode::Dark => ColorShades::splat(Shade::S400),
    }
}
