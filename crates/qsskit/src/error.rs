//! Error types for theme resolution and asset generation.
//!
//! This module provides [`Error`], the error type returned by every fallible
//! operation in the crate. Template engine failures are translated into
//! [`Error::Template`] so callers never depend on the engine's own error type.

use std::path::PathBuf;

use crate::theme::ThemeError;

/// Error type for qsskit operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A palette or extra-attribute mapping failed validation.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No theme with the given name is known.
    #[error("theme '{0}' not found")]
    ThemeNotFound(String),

    /// The template file does not exist or is not a regular file.
    #[error("template file '{}' does not exist or is not a file", .0.display())]
    TemplateNotFound(PathBuf),

    /// A required directory does not exist.
    #[error("directory '{}' does not exist or is not a directory", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The template engine failed to compile or render the stylesheet.
    #[error("stylesheet rendering failed: {0}")]
    Template(String),

    /// The application name contains characters that are not allowed in a path.
    #[error("invalid app name '{0}': contains prohibited characters")]
    InvalidAppName(String),

    /// Resource directories are not defined for the current platform.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The user's home directory could not be determined.
    #[error("home directory could not be determined")]
    HomeDirUnavailable,

    /// An icon tree lacks one or more context subdirectories.
    #[error("missing context directories: {} in '{}'", .contexts.join(", "), .dir.display())]
    MissingIconContexts { dir: PathBuf, contexts: Vec<String> },

    /// A context directory lacks some of the required icons.
    #[error("icon directory '{}' is missing required icons: {}", .dir.display(), .icons.join(", "))]
    MissingIcons { dir: PathBuf, icons: Vec<String> },

    /// Two bundles resolve to the same theme name.
    #[error("duplicate theme name found: {0}")]
    DuplicateThemeName(String),

    /// A lookup was made before the theme table was initialized.
    #[error("theme table is not initialized")]
    Uninitialized,

    /// Reading or writing a file failed.
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates an I/O error tagged with the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Error::Template(message)
    }
}

/// Result type for qsskit operations.
pub type Result<T> = std::result::Result<T, Error>;
