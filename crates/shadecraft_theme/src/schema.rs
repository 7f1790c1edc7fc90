//! Configuration schema and validator
//!
//! [`validate`] checks an arbitrary JSON value against the shape of
//! [`ThemeConfig`] and either returns the typed configuration or every
//! violation it found, each tagged with a dot-joined field path. It never
//! panics and never stops at the first problem, so callers can render
//! field-level feedback.
//!
//! Required fields: `colors`, `neutral`, `radius`, `font`. The dark
//! counterparts mirror their light field when absent; shade maps and override
//! records fall back to the default tables when absent. Objects that are
//! present must be complete.

use std::fmt::{self, Display, Formatter};

use serde_json::{Map, Value};

use crate::config::{ThemeConfig, RADIUS_MAX, RADIUS_MIN};
use crate::error::ImportError;
use crate::tokens::*;

/// One schema violation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dot-joined path of the offending field, empty for the root value
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Join issues as `path: message` pairs for single-line display.
pub fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate an untrusted JSON value as a theme configuration.
pub fn validate(raw: &Value) -> Result<ThemeConfig, Vec<ValidationIssue>> {
    let mut v = Validator::default();

    let Some(root) = v.object("", raw) else {
        return Err(v.issues);
    };

    let colors = v.required(root, "colors", Validator::role_map::<ChromaticPalette>);
    let neutral = v.required(root, "neutral", Validator::token::<NeutralPalette>);
    let radius = v.required(root, "radius", Validator::radius);
    let font = v.required(root, "font", Validator::font);

    let dark_colors = v.optional(root, "darkColors", Validator::role_map::<ChromaticPalette>);
    let dark_neutral = v.optional(root, "darkNeutral", Validator::token::<NeutralPalette>);
    let dark_radius = v.optional(root, "darkRadius", Validator::radius);
    let dark_font = v.optional(root, "darkFont", Validator::font);

    let color_shades = v.optional(root, "colorShades", Validator::role_map::<Shade>);
    let dark_color_shades = v.optional(root, "darkColorShades", Validator::role_map::<Shade>);
    let light_overrides = v.optional(root, "lightOverrides", Validator::overrides);
    let dark_overrides = v.optional(root, "darkOverrides", Validator::overrides);

    let (
        Some(colors),
        Some(neutral),
        Some(radius),
        Some(font),
        Some(dark_colors),
        Some(dark_neutral),
        Some(dark_radius),
        Some(dark_font),
        Some(color_shades),
        Some(dark_color_shades),
        Some(light_overrides),
        Some(dark_overrides),
    ) = (
        colors,
        neutral,
        radius,
        font,
        dark_colors,
        dark_neutral,
        dark_radius,
        dark_font,
        color_shades,
        dark_color_shades,
        light_overrides,
        dark_overrides,
    )
    else {
        return Err(v.issues);
    };

    if !v.issues.is_empty() {
        return Err(v.issues);
    }

    Ok(ThemeConfig {
        colors,
        color_shades: color_shades.unwrap_or_else(|| default_color_shades(ColorMode::Light)),
        dark_colors: dark_colors.unwrap_or(colors),
        dark_color_shades: dark_color_shades
            .unwrap_or_else(|| default_color_shades(ColorMode::Dark)),
        neutral,
        dark_neutral: dark_neutral.unwrap_or(neutral),
        radius,
        dark_radius: dark_radius.unwrap_or(radius),
        dark_font: dark_font.unwrap_or_else(|| font.clone()),
        font,
        light_overrides: light_overrides.unwrap_or_else(|| default_overrides(ColorMode::Light)),
        dark_overrides: dark_overrides.unwrap_or_else(|| default_overrides(ColorMode::Dark)),
    })
}

/// Validate an already-typed configuration.
///
/// Typed values can still break the numeric and string constraints, e.g. a
/// generated radius of `3.0`. Runs the same checks as [`validate`].
pub fn check(config: &ThemeConfig) -> Result<(), Vec<ValidationIssue>> {
    match serde_json::to_value(config) {
        Ok(value) => validate(&value).map(|_| ()),
        // Non-finite floats serialize as null, so this only guards odd f64 input.
        Err(err) => Err(vec![ValidationIssue::new("", err.to_string())]),
    }
}

/// Parse and validate imported JSON text.
pub fn import_json(text: &str) -> Result<ThemeConfig, ImportError> {
    let raw: Value = serde_json::from_str(text)?;
    validate(&raw).map_err(ImportError::Invalid)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Accumulates issues while walking the input.
#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

type FieldCheck<T> = fn(&mut Validator, &str, &Value) -> Option<T>;

impl Validator {
    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    fn object<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.push(
                    path,
                    format!("Expected object, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn required<T>(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        check: FieldCheck<T>,
    ) -> Option<T> {
        match object.get(key) {
            Some(value) => check(self, key, value),
            None => {
                self.push(key, "Required");
                None
            }
        }
    }

    /// `Some(None)` when absent, `None` when present but invalid.
    fn optional<T>(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        check: FieldCheck<T>,
    ) -> Option<Option<T>> {
        match object.get(key) {
            Some(value) => check(self, key, value).map(Some),
            None => Some(None),
        }
    }

    fn child<T>(
        &mut self,
        object: &Map<String, Value>,
        parent: &str,
        key: &str,
        check: impl FnOnce(&mut Self, &str, &Value) -> Option<T>,
    ) -> Option<T> {
        let path = join_path(parent, key);
        match object.get(key) {
            Some(value) => check(self, &path, value),
            None => {
                self.push(&path, "Required");
                None
            }
        }
    }

    fn token<T: Token>(&mut self, path: &str, value: &Value) -> Option<T> {
        if let Some(id) = value.as_str() {
            if let Some(token) = T::from_id(id) {
                return Some(token);
            }
        }
        // Numeric shades are also accepted in their bare integer form.
        if let Some(n) = value.as_u64() {
            if let Some(token) = T::from_id(&n.to_string()) {
                return Some(token);
            }
        }

        let expected = T::all()
            .iter()
            .map(|t| format!("'{}'", t.id()))
            .collect::<Vec<_>>()
            .join(" | ");
        let received = match value {
            Value::String(s) => format!("'{s}'"),
            Value::Number(n) => n.to_string(),
            other => type_name(other).to_string(),
        };
        self.push(
            path,
            format!(
                "Invalid {} value. Expected {expected}, received {received}",
                T::KIND
            ),
        );
        None
    }

    fn role_map<T: Token>(&mut self, path: &str, value: &Value) -> Option<RoleMap<T>> {
        let object = self.object(path, value)?;
        let field =
            |v: &mut Self, role: SemanticRole| v.child(object, path, role.id(), Self::token::<T>);

        let primary = field(self, SemanticRole::Primary);
        let secondary = field(self, SemanticRole::Secondary);
        let success = field(self, SemanticRole::Success);
        let info = field(self, SemanticRole::Info);
        let warning = field(self, SemanticRole::Warning);
        let error = field(self, SemanticRole::Error);

        Some(RoleMap {
            primary: primary?,
            secondary: secondary?,
            success: success?,
            info: info?,
            warning: warning?,
            error: error?,
        })
    }

    fn radius(&mut self, path: &str, value: &Value) -> Option<f64> {
        let Some(radius) = value.as_f64() else {
            self.push(
                path,
                format!("Expected number, received {}", type_name(value)),
            );
            return None;
        };
        if radius < RADIUS_MIN {
            self.push(
                path,
                format!("Number must be greater than or equal to {RADIUS_MIN}"),
            );
            return None;
        }
        if radius > RADIUS_MAX {
            self.push(
                path,
                format!("Number must be less than or equal to {RADIUS_MAX}"),
            );
            return None;
        }
        Some(radius)
    }

    fn font(&mut self, path: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) if s.is_empty() => {
                self.push(path, "String must contain at least 1 character(s)");
                None
            }
            Value::String(s) => Some(s.clone()),
            other => {
                self.push(
                    path,
                    format!("Expected string, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn category<C: OverrideCategory>(&mut self, path: &str, value: &Value) -> Option<C> {
        let object = self.object(path, value)?;
        // Check every slot first so all missing keys are reported.
        let shades: Vec<(C::Slot, Option<Shade>)> = C::Slot::all()
            .iter()
            .map(|slot| {
                let shade = self.child(object, path, slot.id(), Self::token::<Shade>);
                (*slot, shade)
            })
            .collect();

        C::try_from_fn(|slot| {
            shades
                .iter()
                .find(|(s, _)| *s == slot)
                .and_then(|(_, shade)| *shade)
        })
    }

    fn overrides(&mut self, path: &str, value: &Value) -> Option<TokenOverrides> {
        let object = self.object(path, value)?;
        let text = self.child(object, path, TextOverrides::NAME, Self::category::<TextOverrides>);
        let bg = self.child(object, path, BgOverrides::NAME, Self::category::<BgOverrides>);
        let border = self.child(
            object,
            path,
            BorderOverrides::NAME,
            Self::category::<BorderOverrides>,
        );
        Some(TokenOverrides {
            text: text?,
            bg: bg?,
            border: border?,
        })
    }
}
