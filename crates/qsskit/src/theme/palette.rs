//! The validated eight-role color palette.
//!
//! A [`Theme`] maps the fixed [`ColorRole`] keys to `#RRGGBB` strings. It is
//! built once and never mutated; every constructor runs the same validation:
//!
//! 1. `activeColor` is filled in with [`DEFAULT_ACTIVE_COLOR`] when absent
//! 2. every required role must be present (all missing roles are reported)
//! 3. every value, including any extra keys, must be a 6-digit hex color
//!
//! ```rust
//! use qsskit::{ColorRole, Theme};
//!
//! let theme = Theme::from_json_str(r##"{
//!     "primaryColor": "#00bcd4",
//!     "primaryLightColor": "#62efff",
//!     "secondaryColor": "#f5f5f5",
//!     "secondaryLightColor": "#ffffff",
//!     "secondaryDarkColor": "#e6e6e6",
//!     "primaryTextColor": "#3c3c3c",
//!     "secondaryTextColor": "#555555"
//! }"##).unwrap();
//!
//! assert_eq!(theme.color(ColorRole::Active), "#707070");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ThemeError;
use crate::error::{Error, Result};

/// Value used for `activeColor` when a palette omits it.
pub const DEFAULT_ACTIVE_COLOR: &str = "#707070";

/// The color roles every palette defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorRole {
    Primary,
    PrimaryLight,
    Secondary,
    SecondaryLight,
    SecondaryDark,
    PrimaryText,
    SecondaryText,
    Active,
}

impl ColorRole {
    /// All roles in declaration order.
    pub const ALL: [ColorRole; 8] = [
        ColorRole::Primary,
        ColorRole::PrimaryLight,
        ColorRole::Secondary,
        ColorRole::SecondaryLight,
        ColorRole::SecondaryDark,
        ColorRole::PrimaryText,
        ColorRole::SecondaryText,
        ColorRole::Active,
    ];

    /// The JSON key used for this role.
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Primary => "primaryColor",
            ColorRole::PrimaryLight => "primaryLightColor",
            ColorRole::Secondary => "secondaryColor",
            ColorRole::SecondaryLight => "secondaryLightColor",
            ColorRole::SecondaryDark => "secondaryDarkColor",
            ColorRole::PrimaryText => "primaryTextColor",
            ColorRole::SecondaryText => "secondaryTextColor",
            ColorRole::Active => "activeColor",
        }
    }

    /// Looks up a role by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.key() == key)
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returns true for `#RRGGBB` strings (hex digits in either case).
pub fn is_valid_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// A validated color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Theme {
    colors: BTreeMap<String, String>,
}

impl Theme {
    /// Builds a theme from `(key, color)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MissingKeys`] naming every absent role, or
    /// [`ThemeError::InvalidColor`] for the first value that is not `#RRGGBB`.
    pub fn new<I, K, V>(colors: I) -> std::result::Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut colors: BTreeMap<String, String> = colors
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        colors
            .entry(ColorRole::Active.key().to_string())
            .or_insert_with(|| DEFAULT_ACTIVE_COLOR.to_string());

        Self::validate(&colors)?;
        Ok(Self { colors })
    }

    /// Builds a theme from a JSON value, which must be an object of strings.
    pub fn from_value(value: &serde_json::Value) -> std::result::Result<Self, ThemeError> {
        let object = value.as_object().ok_or(ThemeError::NotAnObject)?;

        let mut pairs = Vec::with_capacity(object.len());
        for (key, value) in object {
            let color = value
                .as_str()
                .ok_or_else(|| ThemeError::NonStringValue { key: key.clone() })?;
            pairs.push((key.clone(), color.to_string()));
        }

        Self::new(pairs)
    }

    /// Parses and validates palette JSON text.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ThemeError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Reads and validates a palette JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_json_str(&content)?)
    }

    fn validate(colors: &BTreeMap<String, String>) -> std::result::Result<(), ThemeError> {
        let missing: Vec<String> = ColorRole::ALL
            .iter()
            .map(|role| role.key())
            .filter(|key| !colors.contains_key(*key))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ThemeError::MissingKeys(missing));
        }

        for (key, value) in colors {
            if !is_valid_hex_color(value) {
                return Err(ThemeError::InvalidColor {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// All colors keyed by role name.
    pub fn colors(&self) -> &BTreeMap<String, String> {
        &self.colors
    }

    /// The color assigned to a role.
    pub fn color(&self, role: ColorRole) -> &str {
        // Presence of every role is checked at construction.
        self.colors
            .get(role.key())
            .map(String::as_str)
            .unwrap_or(DEFAULT_ACTIVE_COLOR)
    }

    /// Looks up a color by its JSON key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Serializes the palette as indented JSON.
    pub fn to_json_pretty(&self) -> String {
        // A map of strings always serializes.
        serde_json::to_string_pretty(&self.colors).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Theme::from_value(&value).map_err(serde::de::Error::custom)
    }
}
