//! Icon recoloring.
//!
//! Icon templates are drawn with two sentinel colors, [`MAIN_SENTINEL`] and
//! [`SUB_SENTINEL`]. For every [`IconContext`] the generator writes a copy of
//! each icon with the sentinels replaced by that context's theme colors:
//!
//! | context    | main role             | sub role         |
//! |------------|-----------------------|------------------|
//! | `primary`  | `primaryColor`        | `secondaryColor` |
//! | `disabled` | `secondaryLightColor` | `secondaryColor` |
//! | `active`   | `activeColor`         | `secondaryColor` |
//!
//! Black (`#000000`) always becomes fully transparent.

mod builtin;
mod generator;
mod recolor;
mod validator;

use std::fmt;

use crate::theme::ColorRole;

pub use builtin::{required_icon_names, BUILTIN_ICONS};
pub use generator::{BuiltInIconGenerator, ContextIconGenerator, IconSource};
pub use recolor::{replace_color, ColorReplacer, TRANSPARENT};
pub use validator::IconDirValidator;

/// Placeholder for the main color in icon templates.
pub const MAIN_SENTINEL: &str = "#0000ff";

/// Placeholder for the sub color in icon templates.
pub const SUB_SENTINEL: &str = "#ff0000";

/// A UI state that gets its own recolored icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconContext {
    Disabled,
    Primary,
    Active,
}

impl IconContext {
    /// All contexts, in generation order.
    pub const ALL: [IconContext; 3] = [
        IconContext::Disabled,
        IconContext::Primary,
        IconContext::Active,
    ];

    /// Subdirectory name holding this context's icons.
    pub fn dir_name(self) -> &'static str {
        match self {
            IconContext::Disabled => "disabled",
            IconContext::Primary => "primary",
            IconContext::Active => "active",
        }
    }

    /// Role that replaces the main sentinel.
    pub fn main_role(self) -> ColorRole {
        match self {
            IconContext::Disabled => ColorRole::SecondaryLight,
            IconContext::Primary => ColorRole::Primary,
            IconContext::Active => ColorRole::Active,
        }
    }

    /// Role that replaces the sub sentinel.
    pub fn sub_role(self) -> ColorRole {
        ColorRole::Secondary
    }
}

impl fmt::Display for IconContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
