//! Writing recolored icon sets to disk.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::builtin::BUILTIN_ICONS;
use super::recolor::ColorReplacer;
use super::{IconContext, MAIN_SENTINEL, SUB_SENTINEL};
use crate::error::{Error, Result};
use crate::files;
use crate::platform::{self, DEFAULT_APP_NAME};
use crate::theme::Theme;

/// Where icon templates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// The templates compiled into the crate.
    BuiltIn,
    /// Every `*.svg` file below a directory, recursively.
    Dir(PathBuf),
}

impl IconSource {
    /// Loads `(file_name, svg)` pairs.
    fn load(&self) -> Result<Vec<(Cow<'static, str>, Cow<'static, str>)>> {
        match self {
            IconSource::BuiltIn => Ok(BUILTIN_ICONS
                .iter()
                .map(|(name, svg)| (Cow::Borrowed(*name), Cow::Borrowed(*svg)))
                .collect()),
            IconSource::Dir(dir) => {
                platform::validate_dir_path(dir)?;
                let mut icons = Vec::new();
                for path in files::walk_dir(dir, "svg")? {
                    let svg = std::fs::read_to_string(&path).map_err(|e| {
                        tracing::error!("failed to read SVG file {}: {}", path.display(), e);
                        Error::io(&path, e)
                    })?;
                    let name = files::file_name(&path).to_string();
                    icons.push((Cow::Owned(name), Cow::Owned(svg)));
                }
                Ok(icons)
            }
        }
    }
}

/// Recolors an icon set into one subdirectory per [`IconContext`].
#[derive(Debug, Clone)]
pub struct ContextIconGenerator {
    main_color: String,
    sub_color: String,
}

impl Default for ContextIconGenerator {
    fn default() -> Self {
        Self {
            main_color: MAIN_SENTINEL.to_string(),
            sub_color: SUB_SENTINEL.to_string(),
        }
    }
}

impl ContextIconGenerator {
    /// A generator for templates drawn with the given sentinel colors.
    pub fn new(main_color: impl Into<String>, sub_color: impl Into<String>) -> Self {
        Self {
            main_color: main_color.into(),
            sub_color: sub_color.into(),
        }
    }

    /// Writes `<destination>/<context>/<icon>` for every context and icon.
    ///
    /// # Errors
    ///
    /// Fails if `destination` is not an existing directory, if a sentinel is
    /// not `#RRGGBB`, or on any read or write failure.
    pub fn generate(&self, theme: &Theme, source: &IconSource, destination: &Path) -> Result<()> {
        platform::validate_dir_path(destination)?;
        let icons = source.load()?;

        for context in IconContext::ALL {
            let context_dir = destination.join(context.dir_name());
            std::fs::create_dir_all(&context_dir).map_err(|e| Error::io(&context_dir, e))?;

            let main = ColorReplacer::new(&self.main_color, theme.color(context.main_role()))?;
            let sub = ColorReplacer::new(&self.sub_color, theme.color(context.sub_role()))?;

            for (name, svg) in &icons {
                let recolored = sub.apply(&main.apply(svg));
                let output = context_dir.join(name.as_ref());
                std::fs::write(&output, recolored).map_err(|e| {
                    tracing::error!("failed to write processed SVG {}: {}", output.display(), e);
                    Error::io(&output, e)
                })?;
            }
            tracing::debug!(
                "wrote {} icons to {}",
                icons.len(),
                context_dir.display()
            );
        }
        Ok(())
    }
}

/// Recolors the built-in icon set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltInIconGenerator;

impl BuiltInIconGenerator {
    /// Generates icons into the per-user cache directory for `app_name`
    /// (default [`DEFAULT_APP_NAME`]) and returns that directory.
    pub fn generate_dynamically(theme: &Theme, app_name: Option<&str>) -> Result<PathBuf> {
        let destination = Self::dynamic_icons_dir(app_name)?;
        Self::generate_into(theme, &destination)?;
        Ok(destination)
    }

    /// The per-user cache directory for `app_name`, created if absent.
    ///
    /// # Errors
    ///
    /// An invalid `app_name` fails with [`Error::InvalidAppName`].
    pub fn dynamic_icons_dir(app_name: Option<&str>) -> Result<PathBuf> {
        let destination = platform::resource_dir(app_name.unwrap_or(DEFAULT_APP_NAME))?;
        platform::ensure_dir(&destination)?;
        Ok(destination)
    }

    /// Generates icons into `destination`, creating it if needed.
    pub fn generate_statically(theme: &Theme, destination: &Path) -> Result<()> {
        platform::ensure_dir(destination)?;
        Self::generate_into(theme, destination)
    }

    fn generate_into(theme: &Theme, destination: &Path) -> Result<()> {
        ContextIconGenerator::default().generate(theme, &IconSource::BuiltIn, destination)
    }
}
