//! Named palette lookup.
//!
//! A [`ThemeManager`] resolves palette names against either the built-in
//! catalog or a directory of `<name>.json` files.

use std::path::{Path, PathBuf};

use super::builtin::{builtin_theme_json, BUILTIN_THEMES};
use super::palette::Theme;
use crate::error::{Error, Result};

const JSON_EXTENSION: &str = "json";

/// Where palette names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSourceDir {
    /// The palettes compiled into the crate.
    BuiltIn,
    /// A directory of `<name>.json` files.
    Dir(PathBuf),
}

/// Loads palettes by name.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    source: ThemeSourceDir,
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeManager {
    /// A manager over the built-in palettes.
    pub fn builtin() -> Self {
        Self {
            source: ThemeSourceDir::BuiltIn,
        }
    }

    /// A manager over `dir`, or the built-ins when `dir` is `None`.
    pub fn new(dir: Option<&Path>) -> Result<Self> {
        let mut manager = Self::builtin();
        manager.set_theme_dir(dir)?;
        Ok(manager)
    }

    /// Switches the lookup directory. `None` reverts to the built-in palettes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if `dir` is not a directory.
    pub fn set_theme_dir(&mut self, dir: Option<&Path>) -> Result<()> {
        self.source = match dir {
            None => ThemeSourceDir::BuiltIn,
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(Error::DirectoryNotFound(dir.to_path_buf()));
                }
                ThemeSourceDir::Dir(dir.to_path_buf())
            }
        };
        Ok(())
    }

    /// The current lookup source.
    pub fn source(&self) -> &ThemeSourceDir {
        &self.source
    }

    /// Sorted palette names without the `.json` extension.
    pub fn theme_names(&self) -> Result<Vec<String>> {
        match &self.source {
            ThemeSourceDir::BuiltIn => Ok(BUILTIN_THEMES
                .iter()
                .map(|(name, _)| (*name).to_string())
                .collect()),
            ThemeSourceDir::Dir(dir) => {
                let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
                let mut names = Vec::new();
                for entry in entries {
                    let path = entry.map_err(|e| Error::io(dir, e))?.path();
                    if !path.is_file()
                        || path.extension().and_then(|e| e.to_str()) != Some(JSON_EXTENSION)
                    {
                        continue;
                    }
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_string());
                    }
                }
                names.sort();
                Ok(names)
            }
        }
    }

    /// Loads a palette. The name may include or omit the `.json` extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ThemeNotFound`] for unknown names, or a validation
    /// error when the palette is malformed.
    pub fn load(&self, name: &str) -> Result<Theme> {
        let stem = name.strip_suffix(".json").unwrap_or(name);
        match &self.source {
            ThemeSourceDir::BuiltIn => {
                let json = builtin_theme_json(stem)
                    .ok_or_else(|| Error::ThemeNotFound(stem.to_string()))?;
                Ok(Theme::from_json_str(json)?)
            }
            ThemeSourceDir::Dir(dir) => {
                let path = dir.join(format!("{}.{}", stem, JSON_EXTENSION));
                if !path.is_file() {
                    tracing::error!("color theme '{}' not found in {}", stem, dir.display());
                    return Err(Error::ThemeNotFound(stem.to_string()));
                }
                Theme::from_file(&path)
            }
        }
    }
}
