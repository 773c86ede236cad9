//! Palette validation errors.

/// Error returned when a palette or extra-attribute mapping is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// The palette is not a JSON object.
    #[error("colors must be a mapping of role names to hex strings")]
    NotAnObject,

    /// A palette entry is not a string.
    #[error("{key} must be a string color value")]
    NonStringValue { key: String },

    /// One or more required color roles are absent.
    #[error("missing key(s): {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// A palette entry is not a `#RRGGBB` color.
    #[error("{key} has an invalid color value: {value}")]
    InvalidColor { key: String, value: String },

    /// The palette JSON could not be parsed.
    #[error("failed to parse theme JSON: {0}")]
    Parse(String),

    /// An extra attribute has the wrong shape.
    #[error("invalid extra attribute: {0}")]
    InvalidExtra(String),
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        ThemeError::Parse(err.to_string())
    }
}
