//! One pre-built theme bundle on disk.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::theme::Theme;

/// A bundle's palette, before or after it is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeRef {
    /// Path to the palette JSON, not yet read.
    File(PathBuf),
    /// A validated palette.
    Resolved(Theme),
}

/// A theme bundle: palette, directory and stylesheet fragments.
///
/// Values are never changed in place. `with_*` methods return the value
/// unchanged when the new field equals the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeBundleStructure {
    name: String,
    theme: ThemeRef,
    theme_dir: PathBuf,
    qss_files: Vec<PathBuf>,
}

impl ThemeBundleStructure {
    /// Creates a bundle named after the directory's file stem.
    pub fn new(theme: ThemeRef, theme_dir: impl Into<PathBuf>, qss_files: Vec<PathBuf>) -> Self {
        let theme_dir = theme_dir.into();
        let name = theme_dir
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            theme,
            theme_dir,
            qss_files,
        }
    }

    /// Overrides the derived name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn theme(&self) -> &ThemeRef {
        &self.theme
    }

    /// The palette, if it has been resolved.
    pub fn resolved_theme(&self) -> Option<&Theme> {
        match &self.theme {
            ThemeRef::Resolved(theme) => Some(theme),
            ThemeRef::File(_) => None,
        }
    }

    pub fn theme_dir(&self) -> &Path {
        &self.theme_dir
    }

    /// Stylesheet fragments in concatenation order.
    pub fn qss_files(&self) -> &[PathBuf] {
        &self.qss_files
    }

    /// Replaces the palette reference.
    pub fn with_theme(self, theme: ThemeRef) -> Self {
        if self.theme == theme {
            return self;
        }
        Self { theme, ..self }
    }

    /// Replaces the fragment list.
    pub fn with_qss_files(self, qss_files: Vec<PathBuf>) -> Self {
        if self.qss_files == qss_files {
            return self;
        }
        Self { qss_files, ..self }
    }

    /// Concatenates every fragment, in order.
    pub fn stylesheet(&self) -> Result<String> {
        let mut stylesheet = String::new();
        for path in &self.qss_files {
            let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            stylesheet.push_str(&text);
        }
        Ok(stylesheet)
    }
}
