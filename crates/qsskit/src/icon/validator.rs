//! Structural checks for recolored icon trees.

use std::collections::BTreeSet;
use std::path::Path;

use super::builtin::required_icon_names;
use super::IconContext;
use crate::error::{Error, Result};
use crate::files;
use crate::platform;

/// Checks that an icon tree has every context directory and every required icon.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconDirValidator;

impl IconDirValidator {
    /// Validates `icon_dir`, or `icon_dir/<theme_name>` when a name is given.
    ///
    /// Extra icons are allowed; missing ones are not.
    pub fn validate(icon_dir: &Path, theme_name: Option<&str>) -> Result<()> {
        let theme_dir = match theme_name {
            Some(name) => icon_dir.join(name),
            None => icon_dir.to_path_buf(),
        };
        platform::validate_dir_path(&theme_dir)?;

        let missing: Vec<String> = IconContext::ALL
            .iter()
            .filter(|context| !theme_dir.join(context.dir_name()).is_dir())
            .map(|context| context.dir_name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingIconContexts {
                dir: theme_dir,
                contexts: missing,
            });
        }

        for context in IconContext::ALL {
            let context_dir = theme_dir.join(context.dir_name());
            let present: BTreeSet<String> = files::list_files(&context_dir, "svg")?
                .iter()
                .map(|path| files::file_name(path).to_string())
                .collect();
            let missing: Vec<String> = required_icon_names()
                .iter()
                .filter(|name| !present.contains(**name))
                .map(|name| name.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(Error::MissingIcons {
                    dir: context_dir,
                    icons: missing,
                });
            }
        }
        Ok(())
    }
}
