//! The seam between the style pipeline and a GUI toolkit.
//!
//! The pipeline only produces strings and paths. Anything that touches live
//! widgets goes through [`Toolkit`], which the embedding application
//! implements for its toolkit binding. [`NoopToolkit`] serves headless use and
//! [`RecordingToolkit`] records every call for tests.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::theme::Theme;

/// Resource prefix under which icon directories are registered.
pub const ICON_PREFIX: &str = "icon";

/// URL prefix used by stylesheets to reference icons.
pub const ICON_URL_PREFIX: &str = "icon:/";

/// Major toolkit versions a template can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolkitVariant {
    Qt5,
    Qt6,
}

impl ToolkitVariant {
    pub const ALL: [ToolkitVariant; 2] = [ToolkitVariant::Qt5, ToolkitVariant::Qt6];

    /// Name of the boolean template flag for this variant.
    pub fn flag_name(self) -> &'static str {
        match self {
            ToolkitVariant::Qt5 => "qt5",
            ToolkitVariant::Qt6 => "qt6",
        }
    }
}

impl fmt::Display for ToolkitVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_name())
    }
}

/// Operations the style tools need from a GUI toolkit.
pub trait Toolkit {
    /// The widget type stylesheets are applied to.
    type Widget: ?Sized;

    /// Sets `stylesheet` on `widget`. An empty string clears styling.
    fn apply_stylesheet(&mut self, widget: &mut Self::Widget, stylesheet: &str) -> Result<()>;

    /// Applies the theme's colors to the application palette.
    fn apply_palette(&mut self, theme: &Theme) -> Result<()>;

    /// Replaces the search paths registered under `prefix` with `dir`.
    fn add_search_paths(&mut self, dir: &Path, prefix: &str) -> Result<()>;

    /// Registers every font found in `dir`.
    fn add_fonts(&mut self, dir: &Path) -> Result<()>;
}

/// A toolkit that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolkit;

impl Toolkit for NoopToolkit {
    type Widget = ();

    fn apply_stylesheet(&mut self, _widget: &mut (), _stylesheet: &str) -> Result<()> {
        Ok(())
    }

    fn apply_palette(&mut self, _theme: &Theme) -> Result<()> {
        Ok(())
    }

    fn add_search_paths(&mut self, _dir: &Path, _prefix: &str) -> Result<()> {
        Ok(())
    }

    fn add_fonts(&mut self, _dir: &Path) -> Result<()> {
        Ok(())
    }
}

/// A call received by [`RecordingToolkit`].
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitCall {
    Stylesheet(String),
    Palette(Theme),
    SearchPath { dir: PathBuf, prefix: String },
    Fonts(PathBuf),
}

/// A toolkit that records every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingToolkit {
    calls: Vec<ToolkitCall>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> &[ToolkitCall] {
        &self.calls
    }

    /// Forgets all recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// The most recently applied stylesheet.
    pub fn last_stylesheet(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            ToolkitCall::Stylesheet(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Toolkit for RecordingToolkit {
    type Widget = ();

    fn apply_stylesheet(&mut self, _widget: &mut (), stylesheet: &str) -> Result<()> {
        self.calls.push(ToolkitCall::Stylesheet(stylesheet.to_string()));
        Ok(())
    }

    fn apply_palette(&mut self, theme: &Theme) -> Result<()> {
        self.calls.push(ToolkitCall::Palette(theme.clone()));
        Ok(())
    }

    fn add_search_paths(&mut self, dir: &Path, prefix: &str) -> Result<()> {
        self.calls.push(ToolkitCall::SearchPath {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        });
        Ok(())
    }

    fn add_fonts(&mut self, dir: &Path) -> Result<()> {
        self.calls.push(ToolkitCall::Fonts(dir.to_path_buf()));
        Ok(())
    }
}
