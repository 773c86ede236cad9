//! Style knobs layered over the palette.
//!
//! [`ExtraAttributes`] holds the caller's raw overrides and the values the
//! template actually sees: the built-in defaults with the overrides merged on
//! top. A nested `QMenu` mapping is flattened into `qmenu_*` keys and the
//! `QMenu` key itself becomes the string `"true"`. `density_scale` is always
//! a float.

use serde_json::{Map, Value};

use super::error::ThemeError;

const QMENU_KEY: &str = "QMenu";
const DENSITY_SCALE_KEY: &str = "density_scale";

fn default_attributes() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("icon".into(), Value::Null);
    defaults.insert(
        "font_family".into(),
        Value::from("Source Sans Pro, Arial, sans-serif"),
    );
    defaults.insert("danger".into(), Value::from("#dc3545"));
    defaults.insert("warning".into(), Value::from("#ffc107"));
    defaults.insert("success".into(), Value::from("#17a2b8"));
    defaults.insert(DENSITY_SCALE_KEY.into(), Value::from(0.0));
    defaults.insert("button_shape".into(), Value::from("default"));
    defaults
}

/// Immutable extra attributes for stylesheet rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraAttributes {
    extra: Map<String, Value>,
    values: Map<String, Value>,
}

impl Default for ExtraAttributes {
    fn default() -> Self {
        Self {
            extra: Map::new(),
            values: default_attributes(),
        }
    }
}

impl ExtraAttributes {
    /// Validates raw overrides and resolves the final values.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidExtra`] when `QMenu` is present but not a
    /// mapping, or when `density_scale` cannot be read as a number.
    pub fn new(extra: Map<String, Value>) -> Result<Self, ThemeError> {
        let processed = Self::process(&extra)?;
        let mut values = default_attributes();
        values.extend(processed);
        Ok(Self { extra, values })
    }

    /// Builds attributes from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ThemeError> {
        match value {
            Value::Object(map) => Self::new(map),
            Value::Null => Ok(Self::default()),
            other => Err(ThemeError::InvalidExtra(format!(
                "extra must be a mapping, got {}",
                other
            ))),
        }
    }

    fn process(extra: &Map<String, Value>) -> Result<Map<String, Value>, ThemeError> {
        let mut processed = extra.clone();

        if let Some(qmenu) = extra.get(QMENU_KEY) {
            let entries = qmenu.as_object().ok_or_else(|| {
                ThemeError::InvalidExtra(format!(
                    "'{}' must be a mapping if provided",
                    QMENU_KEY
                ))
            })?;
            for (key, value) in entries {
                processed.insert(format!("qmenu_{}", key), value.clone());
            }
            processed.insert(QMENU_KEY.into(), Value::from("true"));
        }

        match extra.get(DENSITY_SCALE_KEY) {
            None | Some(Value::Null) => {
                processed.remove(DENSITY_SCALE_KEY);
            }
            Some(raw) => {
                let scale = coerce_float(raw).ok_or_else(|| {
                    ThemeError::InvalidExtra(format!(
                        "'{}' must be a number, got {}",
                        DENSITY_SCALE_KEY, raw
                    ))
                })?;
                processed.insert(DENSITY_SCALE_KEY.into(), Value::from(scale));
            }
        }

        Ok(processed)
    }

    /// Returns a new instance with `overrides` merged over the current raw values.
    pub fn with_updated_values(&self, overrides: Map<String, Value>) -> Result<Self, ThemeError> {
        if overrides.is_empty() {
            return Ok(self.clone());
        }
        let mut extra = self.extra.clone();
        extra.extend(overrides);
        Self::new(extra)
    }

    /// The resolved values seen by templates.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The raw overrides this instance was built from.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Reads one resolved value.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The resolved density scale.
    pub fn density_scale(&self) -> f64 {
        self.values
            .get(DENSITY_SCALE_KEY)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
