//! Design tokens and their default tables
//!
//! Tokens are the closed vocabularies a theme configuration is built from:
//! - Chromatic and neutral palettes
//! - Shades (the lightness scale within a palette)
//! - Semantic color roles
//! - Override slots for text, background and border tokens
//!
//! Every vocabulary is a closed enum with a stable string id. The ids are what
//! appear in exported JSON and CSS.

/// Closed set of named values with a stable string id.
///
/// Implemented by every token enum so the validator and the exporters can
/// treat them uniformly.
pub trait Token: Copy + Eq + std::fmt::Debug + 'static {
    /// Human-readable name of the vocabulary, used in validation messages.
    const KIND: &'static str;

    fn id(self) -> &'static str;

    fn all() -> &'static [Self];

    fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|token| token.id() == id)
    }
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $id:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $($(#[$vmeta])* #[serde(rename = $id)] $variant),+
        }

        impl $name {
            /// Stable id used in JSON and CSS.
            pub fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id),+
                }
            }

            /// Every value, in declaration order.
            pub fn all() -> &'static [$name] {
                const ALL: &[$name] = &[$($name::$variant),+];
                ALL
            }

            /// Look up a value by its id.
            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::tokens::Token for $name {
            const KIND: &'static str = $kind;

            fn id(self) -> &'static str {
                $name::id(self)
            }

            fn all() -> &'static [Self] {
                $name::all()
            }

            fn from_id(id: &str) -> Option<Self> {
                $name::from_id(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

mod color;
mod overrides;

pub use color::*;
pub use overrides::*;
