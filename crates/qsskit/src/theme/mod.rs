//! Theme data model: palettes, extra attributes, and the palette catalog.

mod builtin;
mod error;
mod extra;
mod manager;
mod palette;

pub use builtin::{builtin_theme_json, BUILTIN_THEMES};
pub use error::ThemeError;
pub use extra::ExtraAttributes;
pub use manager::{ThemeManager, ThemeSourceDir};
pub use palette::{is_valid_hex_color, ColorRole, Theme, DEFAULT_ACTIVE_COLOR};
