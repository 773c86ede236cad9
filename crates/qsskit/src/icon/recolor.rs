//! Hex color substitution in SVG text.
//!
//! Some SVG sources wrap long attribute values, so a color like `#0000ff`
//! may appear as `#00\n00ff`. Matchers accept a single optional newline
//! between any two hex digits.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::theme::is_valid_hex_color;

/// Replacement for solid black, which marks shapes meant to be invisible.
pub const TRANSPARENT: &str = "#ffffff00";

static BLACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&color_pattern("#000000")).expect("black color pattern"));

fn color_pattern(hex_color: &str) -> String {
    let digits: Vec<String> = hex_color[1..]
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    format!("#{}", digits.join("\n?"))
}

/// Replaces one sentinel color, then black, in SVG text.
#[derive(Debug, Clone)]
pub struct ColorReplacer {
    pattern: Regex,
    replacement: String,
}

impl ColorReplacer {
    /// Builds a replacer for `origin` (case-insensitive) to `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `origin` is not `#RRGGBB`.
    pub fn new(origin: &str, replacement: impl Into<String>) -> Result<Self> {
        if !is_valid_hex_color(origin) {
            return Err(Error::InvalidArgument(format!(
                "origin color must be #RRGGBB, got '{}'",
                origin
            )));
        }
        let pattern = RegexBuilder::new(&color_pattern(origin))
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Applies the substitution. Black is always made transparent.
    pub fn apply(&self, svg: &str) -> String {
        let replaced = self
            .pattern
            .replace_all(svg, NoExpand(&self.replacement));
        BLACK.replace_all(&replaced, NoExpand(TRANSPARENT)).into_owned()
    }
}

/// Replaces every occurrence of `origin` in `svg` with `replacement`, and
/// every `#000000` with [`TRANSPARENT`].
///
/// ```rust
/// use qsskit::icon::replace_color;
///
/// let out = replace_color("<path fill=\"#00\n00ff\"/>", "#0000ff", "#00bcd4").unwrap();
/// assert_eq!(out, "<path fill=\"#00bcd4\"/>");
/// ```
pub fn replace_color(svg: &str, origin: &str, replacement: &str) -> Result<String> {
    Ok(ColorReplacer::new(origin, replacement)?.apply(svg))
}
