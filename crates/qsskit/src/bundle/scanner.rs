//! Discovering and validating pre-built theme bundles.
//!
//! A bundle parent directory holds one subdirectory per theme:
//!
//! ```text
//! themes/
//! └── dark_teal/
//!     ├── dark_teal.json
//!     ├── _qsskit.qss
//!     ├── disabled/*.svg
//!     ├── primary/*.svg
//!     └── active/*.svg
//! ```
//!
//! [`BundleScanner::build`] runs the candidates through these steps:
//!
//! 1. names must be unique across all candidates, or the whole build fails
//! 2. candidates without fragments, without a palette file, or with an
//!    incomplete icon tree are dropped
//! 3. palette files are parsed; failures are dropped
//! 4. some fragment rendered from the default template must contain every
//!    color except `activeColor`; otherwise the candidate is dropped
//! 5. the survivors become the name-keyed [`BundleTable`]
//!
//! Dropped candidates are logged, never returned as errors.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::structure::{ThemeBundleStructure, ThemeRef};
use crate::error::{Error, Result};
use crate::files;
use crate::icon::IconDirValidator;
use crate::platform;
use crate::template::has_default_signature;
use crate::theme::{ColorRole, Theme};

/// The validated bundles, or nothing yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BundleTable {
    /// No valid bundle has been loaded.
    #[default]
    Uninitialized,
    /// Bundles keyed by theme name.
    Ready(BTreeMap<String, ThemeBundleStructure>),
}

impl BundleTable {
    pub fn is_ready(&self) -> bool {
        matches!(self, BundleTable::Ready(_))
    }

    /// Known theme names, sorted. Empty while uninitialized.
    pub fn names(&self) -> Vec<String> {
        match self {
            BundleTable::Uninitialized => Vec::new(),
            BundleTable::Ready(map) => map.keys().cloned().collect(),
        }
    }

    /// Looks up a bundle by name.
    ///
    /// # Errors
    ///
    /// [`Error::Uninitialized`] before any bundle is loaded, otherwise
    /// [`Error::ThemeNotFound`] for unknown names.
    pub fn get(&self, name: &str) -> Result<&ThemeBundleStructure> {
        match self {
            BundleTable::Uninitialized => Err(Error::Uninitialized),
            BundleTable::Ready(map) => map
                .get(name)
                .ok_or_else(|| Error::ThemeNotFound(name.to_string())),
        }
    }
}

/// Returns true if the file at `path` starts with the default template header.
///
/// Unreadable or missing files are not recognized.
pub fn is_rendered_from_default_template(path: &Path) -> bool {
    if !path.is_file() {
        tracing::debug!("'{}' does not exist or is not a file", path.display());
        return false;
    }
    match std::fs::read_to_string(path) {
        Ok(text) => has_default_signature(&text),
        Err(e) => {
            tracing::debug!("error while reading '{}': {}", path.display(), e);
            false
        }
    }
}

/// Builds a [`BundleTable`] from bundle directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleScanner;

impl BundleScanner {
    /// Scans `parent` and builds the table in one step.
    pub fn scan(parent: &Path) -> Result<BundleTable> {
        Self::build(Self::scan_dir(parent)?)
    }

    /// Lists one candidate per subdirectory of `parent`, sorted by name.
    ///
    /// Fragments are sorted by name, then those rendered from the default
    /// template are moved to the front. Nothing is validated here.
    pub fn scan_dir(parent: &Path) -> Result<Vec<ThemeBundleStructure>> {
        platform::validate_dir_path(parent)?;

        Ok(files::list_dirs(parent)?
            .into_iter()
            .map(candidate)
            .collect())
    }

    /// Validates candidates and builds the table.
    ///
    /// An empty result is [`BundleTable::Uninitialized`], not an error.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateThemeName`] if two candidates share a name.
    pub fn build(candidates: Vec<ThemeBundleStructure>) -> Result<BundleTable> {
        verify_unique_names(&candidates)?;

        let survivors: Vec<_> = candidates
            .into_iter()
            .filter(is_structure_valid)
            .filter_map(resolve_theme)
            .filter(matches_template_fragment)
            .collect();

        if survivors.is_empty() {
            tracing::debug!("no valid theme directories found");
            return Ok(BundleTable::Uninitialized);
        }

        verify_unique_names(&survivors)?;
        let table = survivors
            .into_iter()
            .map(|bundle| (bundle.name().to_string(), bundle))
            .collect();
        Ok(BundleTable::Ready(table))
    }
}

/// A candidate for one theme directory.
///
/// A directory whose fragments cannot be listed yields no fragments, so the
/// candidate is dropped by [`BundleScanner::build`] instead of failing the scan.
fn candidate(theme_dir: PathBuf) -> ThemeBundleStructure {
    let mut qss_files = files::list_files(&theme_dir, "qss").unwrap_or_else(|e| {
        tracing::debug!(
            "failed to list QSS files in '{}': {}",
            theme_dir.display(),
            e
        );
        Vec::new()
    });
    qss_files.sort_by_key(|path| !is_rendered_from_default_template(path));

    let dir_name = files::file_name(&theme_dir).to_string();
    let theme_file = theme_dir.join(format!("{}.json", dir_name));
    ThemeBundleStructure::new(ThemeRef::File(theme_file), theme_dir, qss_files)
}

fn verify_unique_names(bundles: &[ThemeBundleStructure]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for bundle in bundles {
        if !seen.insert(bundle.name()) {
            return Err(Error::DuplicateThemeName(bundle.name().to_string()));
        }
    }
    Ok(())
}

fn is_structure_valid(bundle: &ThemeBundleStructure) -> bool {
    if bundle.qss_files().is_empty() {
        tracing::debug!(
            "no QSS files found in theme directory '{}'",
            bundle.theme_dir().display()
        );
        return false;
    }

    if let ThemeRef::File(path) = bundle.theme() {
        if !path.is_file() {
            tracing::debug!("invalid theme file '{}'", path.display());
            return false;
        }
    }

    if let Err(e) = IconDirValidator::validate(bundle.theme_dir(), None) {
        tracing::debug!(
            "invalid theme directory '{}': {}",
            bundle.theme_dir().display(),
            e
        );
        return false;
    }
    true
}

fn resolve_theme(bundle: ThemeBundleStructure) -> Option<ThemeBundleStructure> {
    let path = match bundle.theme() {
        ThemeRef::Resolved(_) => return Some(bundle),
        ThemeRef::File(path) => path.clone(),
    };
    match Theme::from_file(&path) {
        Ok(theme) => Some(bundle.with_theme(ThemeRef::Resolved(theme))),
        Err(e) => {
            tracing::debug!("failed to load theme '{}': {}", bundle.name(), e);
            None
        }
    }
}

fn matches_template_fragment(bundle: &ThemeBundleStructure) -> bool {
    let Some(theme) = bundle.resolved_theme() else {
        return false;
    };

    let template_files: Vec<_> = bundle
        .qss_files()
        .iter()
        .filter(|path| is_rendered_from_default_template(path))
        .collect();
    match template_files.len() {
        0 => {
            tracing::warn!(
                "theme '{}' has no QSS file rendered from the default template",
                bundle.name()
            );
            return false;
        }
        1 => {}
        n => tracing::warn!(
            "{} template QSS files found in theme '{}': {:?}",
            n,
            bundle.name(),
            template_files
        ),
    }

    let expected: Vec<&str> = theme
        .colors()
        .iter()
        .filter(|(key, value)| key.as_str() != ColorRole::Active.key() && !value.is_empty())
        .map(|(_, value)| value.as_str())
        .collect();

    for path in template_files {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("failed to read QSS file '{}': {}", path.display(), e);
                continue;
            }
        };
        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|color| !content.contains(color))
            .collect();
        if missing.is_empty() {
            return true;
        }
        tracing::warn!(
            "theme '{}' is invalid: missing values {:?} in template '{}'",
            bundle.name(),
            missing,
            path.display()
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::BuiltInIconGenerator;
    use crate::template::StyleSheetRenderer;
    use crate::theme::{ExtraAttributes, ThemeManager};
    use tempfile::TempDir;

    /// Writes a complete bundle for a built-in palette.
    fn write_bundle(parent: &Path, dir_name: &str, palette: &str) -> PathBuf {
        let theme = ThemeManager::builtin().load(palette).unwrap();
        let dir = parent.join(dir_name);
        BuiltInIconGenerator::generate_statically(&theme, &dir).unwrap();
        let qss = StyleSheetRenderer::new()
            .render(&theme, &ExtraAttributes::default())
            .unwrap();
        std::fs::write(dir.join("_qsskit.qss"), qss).unwrap();
        std::fs::write(dir.join(format!("{}.json", dir_name)), theme.to_json_pretty()).unwrap();
        dir
    }

    #[test]
    fn test_valid_bundles_are_loaded() {
        let tmp = TempDir::new().unwrap();
        write_bundle(tmp.path(), "dark_teal", "dark_teal");
        write_bundle(tmp.path(), "light_blue", "light_blue");

        let table = BundleScanner::scan(tmp.path()).unwrap();
        assert_eq!(table.names(), vec!["dark_teal", "light_blue"]);
        let bundle = table.get("dark_teal").unwrap();
        assert!(bundle.resolved_theme().is_some());
    }

    #[test]
    fn test_template_fragment_sorts_first() {
        let tmp = TempDir::new().unwrap();
        let dir = write_bundle(tmp.path(), "dark_teal", "dark_teal");
        std::fs::write(dir.join("000_custom.qss"), "QLabel { color: red; }").unwrap();

        let candidates = BundleScanner::scan_dir(tmp.path()).unwrap();
        let names: Vec<_> = candidates[0]
            .qss_files()
            .iter()
            .map(|p| files::file_name(p).to_string())
            .collect();
        assert_eq!(names, vec!["_qsskit.qss", "000_custom.qss"]);
    }

    #[test]
    fn test_incomplete_bundles_are_dropped() {
        let tmp = TempDir::new().unwrap();
        write_bundle(tmp.path(), "good", "dark_teal");

        let no_qss = write_bundle(tmp.path(), "no_qss", "dark_blue");
        std::fs::remove_file(no_qss.join("_qsskit.qss")).unwrap();

        let no_json = write_bundle(tmp.path(), "no_json", "dark_red");
        std::fs::remove_file(no_json.join("no_json.json")).unwrap();

        let no_icons = write_bundle(tmp.path(), "no_icons", "dark_pink");
        std::fs::remove_dir_all(no_icons.join("active")).unwrap();

        let bad_json = write_bundle(tmp.path(), "bad_json", "dark_amber");
        std::fs::write(bad_json.join("bad_json.json"), "{\"primaryColor\": \"red\"}").unwrap();

        let table = BundleScanner::scan(tmp.path()).unwrap();
        assert_eq!(table.names(), vec!["good"]);
    }

    #[test]
    fn test_mismatched_palette_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let dir = write_bundle(tmp.path(), "dark_teal", "dark_teal");
        let other = ThemeManager::builtin().load("light_red").unwrap();
        std::fs::write(dir.join("dark_teal.json"), other.to_json_pretty()).unwrap();

        assert_eq!(BundleScanner::scan(tmp.path()).unwrap(), BundleTable::Uninitialized);
    }

    #[test]
    fn test_hand_written_stylesheet_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let dir = write_bundle(tmp.path(), "dark_teal", "dark_teal");
        std::fs::write(dir.join("_qsskit.qss"), "QWidget { color: #1de9b6; }").unwrap();

        assert!(!BundleScanner::scan(tmp.path()).unwrap().is_ready());
    }

    #[test]
    fn test_two_template_fragments_still_load() {
        let tmp = TempDir::new().unwrap();
        let dir = write_bundle(tmp.path(), "dark_teal", "dark_teal");
        std::fs::copy(dir.join("_qsskit.qss"), dir.join("_copy.qss")).unwrap();

        assert_eq!(BundleScanner::scan(tmp.path()).unwrap().names(), vec!["dark_teal"]);
    }

    #[test]
    fn test_duplicate_names_abort() {
        let tmp = TempDir::new().unwrap();
        let a = write_bundle(tmp.path(), "dark_teal", "dark_teal");
        let b = write_bundle(tmp.path(), "light_teal", "light_teal");

        let candidates = vec![
            ThemeBundleStructure::new(ThemeRef::File(a.join("dark_teal.json")), &a, vec![]),
            ThemeBundleStructure::new(ThemeRef::File(b.join("light_teal.json")), &b, vec![])
                .named("dark_teal"),
        ];
        assert!(matches!(
            BundleScanner::build(candidates),
            Err(Error::DuplicateThemeName(name)) if name == "dark_teal"
        ));
    }

    #[test]
    fn test_unlistable_directory_is_dropped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let good = write_bundle(tmp.path(), "dark_teal", "dark_teal");
        let vanished = candidate(tmp.path().join("vanished"));
        assert_eq!(vanished.name(), "vanished");
        assert!(vanished.qss_files().is_empty());

        let mut candidates = BundleScanner::scan_dir(tmp.path()).unwrap();
        candidates.push(vanished);
        let table = BundleScanner::build(candidates).unwrap();
        assert_eq!(table.names(), vec!["dark_teal"]);
        assert_eq!(table.get("dark_teal").unwrap().theme_dir(), good.as_path());
    }

    #[test]
    fn test_duplicate_directory_stems_abort_scan() {
        let tmp = TempDir::new().unwrap();
        write_bundle(tmp.path(), "dark_teal.a", "dark_teal");
        write_bundle(tmp.path(), "dark_teal.b", "dark_teal");
        assert!(matches!(
            BundleScanner::scan(tmp.path()),
            Err(Error::DuplicateThemeName(name)) if name == "dark_teal"
        ));
    }

    #[test]
    fn test_empty_parent_is_uninitialized() {
        let tmp = TempDir::new().unwrap();
        let table = BundleScanner::scan(tmp.path()).unwrap();
        assert_eq!(table, BundleTable::Uninitialized);
        assert!(table.names().is_empty());
        assert!(matches!(table.get("x"), Err(Error::Uninitialized)));
    }

    #[test]
    fn test_missing_parent_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            BundleScanner::scan(&tmp.path().join("absent")),
            Err(Error::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_signature_check_never_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_rendered_from_default_template(&tmp.path().join("none.qss")));
        assert!(!is_rendered_from_default_template(tmp.path()));
    }
}
