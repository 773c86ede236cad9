//! Per-platform cache directories for dynamically generated assets.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Application name used when none is given.
pub const DEFAULT_APP_NAME: &str = ".qsskit";

const PROHIBITED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Returns true if `name` is non-empty and free of `<>:"/\|?*`.
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains(PROHIBITED_CHARS)
}

/// Fails with [`Error::InvalidAppName`] unless `name` is a valid file name.
pub fn validate_app_name(name: &str) -> Result<()> {
    if is_valid_filename(name) {
        Ok(())
    } else {
        Err(Error::InvalidAppName(name.to_string()))
    }
}

/// Resolves the resource directory for `app_name` under `home` on `os`.
///
/// `os` takes the values of [`std::env::consts::OS`].
pub fn resource_dir_for(os: &str, home: &Path, app_name: &str) -> Result<PathBuf> {
    validate_app_name(app_name)?;
    match os {
        "windows" => Ok(home.join("AppData").join("Local").join(app_name)),
        "macos" => Ok(home
            .join("Library")
            .join("Application Support")
            .join(app_name)),
        "linux" => Ok(home.join(".local").join("share").join(app_name)),
        other => Err(Error::UnsupportedPlatform(other.to_string())),
    }
}

/// Resolves the resource directory for `app_name` on the running platform.
pub fn resource_dir(app_name: &str) -> Result<PathBuf> {
    validate_app_name(app_name)?;
    let home = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
    resource_dir_for(std::env::consts::OS, &home, app_name)
}

/// Validates a directory path.
pub fn validate_dir_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryNotFound(path.to_path_buf()))
    }
}

/// Creates `path` and its parents when missing.
pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            tracing::error!("failed to create directory {}: {}", path.display(), e);
            Error::io(path, e)
        })?;
    }
    Ok(())
}
