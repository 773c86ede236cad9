//! Template helpers for colors and sizes.
//!
//! ## Filters
//!
//! - `opacity(alpha=0.5)` - `#RRGGBB` to `rgba(r, g, b, alpha)`
//! - `density(density_scale, border=0, scale=1, density_interval=4, min=4)` -
//!   density-aware sizing; arguments may be positional or keyword
//!
//! ### Example
//!
//! ```jinja
//! QPushButton:hover { background-color: {{ primaryColor|opacity(0.2) }}; }
//! QPushButton { height: {{ 36|density(density_scale, border=2) }}px; }
//! ```

use std::fmt;

use minijinja::value::{Kwargs, Rest, ValueKind};
use minijinja::{Environment, ErrorKind, Value};

use crate::error::{Error, Result};

/// Converts `#RRGGBB` to an `rgba(r, g, b, alpha)` string.
///
/// ```rust
/// use qsskit::template::filters::opacity;
///
/// assert_eq!(opacity("#000000", 0.5).unwrap(), "rgba(0, 0, 0, 0.5)");
/// assert!(opacity("bad", 0.5).is_err());
/// ```
pub fn opacity(hex_color: &str, alpha: f64) -> Result<String> {
    if hex_color.len() != 7 || !hex_color.starts_with('#') {
        return Err(Error::InvalidArgument(format!(
            "invalid hex color '{}', expected '#RRGGBB'",
            hex_color
        )));
    }
    if !(0.0..=1.0).contains(&alpha) {
        return Err(Error::InvalidArgument(format!(
            "opacity must be between 0.0 and 1.0, got {}",
            alpha
        )));
    }

    let channel = |i: usize| {
        hex_color
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| {
                Error::InvalidArgument(format!("invalid hex color '{}'", hex_color))
            })
    };
    let (r, g, b) = (channel(1)?, channel(3)?, channel(5)?);
    Ok(format!("rgba({}, {}, {}, {})", r, g, b, alpha))
}

/// Parameters of [`density`] beyond the value and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityOptions {
    pub border: f64,
    pub scale: f64,
    pub density_interval: f64,
    pub min: f64,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self {
            border: 0.0,
            scale: 1.0,
            density_interval: 4.0,
            min: 4.0,
        }
    }
}

/// Result of [`density`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityValue {
    Number(f64),
    /// The literal `unset`, passed through.
    Unset,
}

impl fmt::Display for DensityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DensityValue::Number(n) => write!(f, "{}", n),
            DensityValue::Unset => f.write_str("unset"),
        }
    }
}

/// Density adjustment for a numeric size.
pub fn density_number(value: f64, density_scale: f64, options: &DensityOptions) -> f64 {
    let adjusted =
        (value + options.density_interval * density_scale - options.border * 2.0) * options.scale;
    adjusted.max(options.min)
}

/// Density adjustment for a size written as text.
///
/// `@N` yields `N * scale` and ignores density; `unset` passes through;
/// anything else is parsed as a number after stripping a trailing `px`.
///
/// ```rust
/// use qsskit::template::filters::{density, DensityOptions, DensityValue};
///
/// let opts = DensityOptions::default();
/// assert_eq!(density("16px", -2.0, &opts).unwrap(), DensityValue::Number(8.0));
/// assert_eq!(density("unset", 0.0, &opts).unwrap(), DensityValue::Unset);
/// ```
pub fn density(value: &str, density_scale: f64, options: &DensityOptions) -> Result<DensityValue> {
    if let Some(fixed) = value.strip_prefix('@') {
        let n: f64 = fixed.trim().parse().map_err(|_| invalid_size(value))?;
        return Ok(DensityValue::Number(n * options.scale));
    }
    if value == "unset" {
        return Ok(DensityValue::Unset);
    }
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    let n: f64 = number.trim().parse().map_err(|_| invalid_size(value))?;
    Ok(DensityValue::Number(density_number(n, density_scale, options)))
}

fn invalid_size(value: &str) -> Error {
    Error::InvalidArgument(format!(
        "invalid size '{}', expected a number, '@N' or 'unset'",
        value
    ))
}

/// Arguments of the `density` filter after the value, in positional order.
const DENSITY_POSITIONAL: [&str; 5] = [
    "density_scale",
    "border",
    "scale",
    "density_interval",
    "min",
];

fn filter_error(err: Error) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string())
}

/// Registers `opacity` and `density` on a MiniJinja environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter(
        "opacity",
        |color: String, alpha: Option<f64>| -> std::result::Result<String, minijinja::Error> {
            opacity(&color, alpha.unwrap_or(0.5)).map_err(filter_error)
        },
    );

    env.add_filter(
        "density",
        |value: Value,
         args: Rest<Option<f64>>,
         kwargs: Kwargs|
         -> std::result::Result<Value, minijinja::Error> {
            if args.len() > DENSITY_POSITIONAL.len() {
                return Err(minijinja::Error::from(ErrorKind::TooManyArguments));
            }
            let positional = |i: usize| args.get(i).copied().flatten();
            let option = |i: usize, default: f64| -> std::result::Result<f64, minijinja::Error> {
                Ok(kwargs
                    .get::<Option<f64>>(DENSITY_POSITIONAL[i])?
                    .or_else(|| positional(i))
                    .unwrap_or(default))
            };

            let defaults = DensityOptions::default();
            let density_scale = option(0, 0.0)?;
            let options = DensityOptions {
                border: option(1, defaults.border)?,
                scale: option(2, defaults.scale)?,
                density_interval: option(3, defaults.density_interval)?,
                min: option(4, defaults.min)?,
            };
            kwargs.assert_all_used()?;

            let result = match value.kind() {
                ValueKind::Number => {
                    let n = f64::try_from(value.clone())?;
                    DensityValue::Number(density_number(n, density_scale, &options))
                }
                ValueKind::String => {
                    let text = value.as_str().unwrap_or_default();
                    density(text, density_scale, &options).map_err(filter_error)?
                }
                _ => {
                    return Err(minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("density expects a number or string, got {}", value.kind()),
                    ))
                }
            };

            Ok(match result {
                DensityValue::Number(n) => Value::from(n),
                DensityValue::Unset => Value::from("unset"),
            })
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, ctx: Value) -> std::result::Result<String, minijinja::Error> {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.render_str(source, ctx)
    }

    // =========================================================================
    // opacity
    // =========================================================================

    #[test]
    fn test_opacity_converts() {
        assert_eq!(opacity("#000000", 0.5).unwrap(), "rgba(0, 0, 0, 0.5)");
        assert_eq!(opacity("#ff8000", 0.25).unwrap(), "rgba(255, 128, 0, 0.25)");
    }

    #[test]
    fn test_opacity_rejects_bad_input() {
        assert!(opacity("bad", 0.5).is_err());
        assert!(opacity("#00000", 0.5).is_err());
        assert!(opacity("000000#", 0.5).is_err());
        assert!(opacity("#gg0000", 0.5).is_err());
        assert!(opacity("#000000", 1.5).is_err());
        assert!(opacity("#000000", -0.1).is_err());
    }

    #[test]
    fn test_opacity_filter_default_alpha() {
        let out = render("{{ c|opacity }}", minijinja::context! { c => "#ffffff" }).unwrap();
        assert_eq!(out, "rgba(255, 255, 255, 0.5)");
    }

    #[test]
    fn test_opacity_filter_error() {
        assert!(render("{{ 'red'|opacity(0.2) }}", minijinja::context! {}).is_err());
    }

    // =========================================================================
    // density
    // =========================================================================

    #[test]
    fn test_density_examples() {
        let opts = DensityOptions::default();
        assert_eq!(density("16px", 0.0, &opts).unwrap(), DensityValue::Number(16.0));
        assert_eq!(density("16px", -2.0, &opts).unwrap(), DensityValue::Number(8.0));
        assert_eq!(density("unset", 0.0, &opts).unwrap(), DensityValue::Unset);

        let doubled = DensityOptions {
            scale: 2.0,
            ..DensityOptions::default()
        };
        assert_eq!(density("@20", 0.0, &doubled).unwrap(), DensityValue::Number(40.0));
    }

    #[test]
    fn test_density_applies_min_and_border() {
        let opts = DensityOptions {
            border: 2.0,
            ..DensityOptions::default()
        };
        assert_eq!(density_number(36.0, 0.0, &opts), 32.0);
        assert_eq!(density_number(4.0, -5.0, &opts), 4.0);
    }

    #[test]
    fn test_density_rejects_garbage() {
        let opts = DensityOptions::default();
        assert!(density("wide", 0.0, &opts).is_err());
        assert!(density("@wide", 0.0, &opts).is_err());
    }

    #[test]
    fn test_density_filter_kwargs() {
        let out = render(
            "{{ 36|density(s, border=2) }}|{{ '@20'|density(s, scale=2) }}|{{ 'unset'|density(s) }}",
            minijinja::context! { s => 0.0 },
        )
        .unwrap();
        assert_eq!(out, "32.0|40.0|unset");
    }

    #[test]
    fn test_density_filter_positional() {
        let out = render(
            "{{ 36|density(0, 2) }}|{{ 10|density(-1, 0, 2, 4, 1) }}|{{ 36|density(0, 2, border=0) }}",
            minijinja::context! {},
        )
        .unwrap();
        assert_eq!(out, "32.0|12.0|36.0");
    }

    #[test]
    fn test_density_filter_too_many_arguments() {
        assert!(render("{{ 36|density(0, 0, 1, 4, 4, 9) }}", minijinja::context! {}).is_err());
    }

    #[test]
    fn test_density_filter_unknown_kwarg() {
        assert!(render("{{ 36|density(0, bogus=1) }}", minijinja::context! {}).is_err());
    }

    #[test]
    fn test_density_display() {
        assert_eq!(DensityValue::Unset.to_string(), "unset");
        assert_eq!(DensityValue::Number(8.5).to_string(), "8.5");
    }
}
