//! Runtime theme switching.
//!
//! [`StyleTools`] keeps the currently applied theme and drives a [`Toolkit`].
//! Where themes come from is a [`ThemeSource`]:
//!
//! - [`StaticThemes`] serves pre-built bundles validated by [`BundleScanner`]
//! - [`DynamicThemes`] renders the stylesheet and recolors icons on demand
//!
//! The pseudo-theme `default` is always listed first; applying it clears all
//! styling.
//!
//! ```rust
//! use qsskit::toolkit::RecordingToolkit;
//! use qsskit::tools::{StaticThemes, StyleTools};
//!
//! let mut tools = StyleTools::new(StaticThemes::new());
//! assert_eq!(tools.theme_list().unwrap(), vec!["default"]);
//!
//! let mut toolkit = RecordingToolkit::new();
//! tools.apply(&mut toolkit, &mut (), "default").unwrap();
//! assert!(toolkit.calls().is_empty());
//! ```

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::bundle::{BundleScanner, BundleTable, ThemeBundleStructure};
use crate::error::{Error, Result};
use crate::icon::BuiltInIconGenerator;
use crate::platform::{self, validate_app_name};
use crate::template::StyleSheetRenderer;
use crate::theme::{ExtraAttributes, Theme, ThemeManager};
use crate::toolkit::{Toolkit, ICON_PREFIX};

/// Name of the pseudo-theme that clears styling.
pub const DEFAULT_THEME: &str = "default";

/// Everything a toolkit needs to apply one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub theme: Theme,
    pub stylesheet: String,
    pub icons_dir: PathBuf,
}

/// A provider of named themes.
pub trait ThemeSource {
    /// Known theme names, without `default`.
    fn theme_names(&self) -> Result<Vec<String>>;

    /// The palette for `name`.
    fn theme(&self, name: &str) -> Result<Theme>;

    /// The stylesheet for `name`.
    fn stylesheet(&self, name: &str) -> Result<String>;

    /// Directory registered under the icon prefix for `name`.
    fn icons_dir(&self, name: &str) -> Result<PathBuf>;

    /// Resolves everything needed to apply `name`.
    fn resolve(&self, name: &str) -> Result<ResolvedTheme> {
        Ok(ResolvedTheme {
            stylesheet: self.stylesheet(name)?,
            icons_dir: self.icons_dir(name)?,
            theme: self.theme(name)?,
        })
    }
}

/// Applies themes from a [`ThemeSource`] and tracks the current one.
#[derive(Debug, Clone)]
pub struct StyleTools<S> {
    source: S,
    current: String,
}

impl<S: ThemeSource> StyleTools<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: DEFAULT_THEME.to_string(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Name of the theme applied last; `default` initially.
    pub fn current_theme(&self) -> &str {
        &self.current
    }

    /// `default` followed by every known theme name.
    pub fn theme_list(&self) -> Result<Vec<String>> {
        let mut names = vec![DEFAULT_THEME.to_string()];
        names.extend(self.source.theme_names()?);
        Ok(names)
    }

    /// Applies `name` to `widget`.
    ///
    /// Applying the current theme again does nothing. For other themes the
    /// toolkit receives, in order, the icon search path, the palette and the
    /// stylesheet.
    ///
    /// # Errors
    ///
    /// [`Error::ThemeNotFound`] if `name` is not in [`theme_list`](Self::theme_list).
    pub fn apply<T: Toolkit>(
        &mut self,
        toolkit: &mut T,
        widget: &mut T::Widget,
        name: &str,
    ) -> Result<()> {
        if !self.theme_list()?.iter().any(|n| n == name) {
            return Err(Error::ThemeNotFound(name.to_string()));
        }
        if self.current == name {
            return Ok(());
        }

        if name == DEFAULT_THEME {
            toolkit.apply_stylesheet(widget, "")?;
        } else {
            let resolved = self.source.resolve(name)?;
            toolkit.add_search_paths(&resolved.icons_dir, ICON_PREFIX)?;
            toolkit.apply_palette(&resolved.theme)?;
            toolkit.apply_stylesheet(widget, &resolved.stylesheet)?;
        }

        tracing::debug!("theme changed from '{}' to '{}'", self.current, name);
        self.current = name.to_string();
        Ok(())
    }

    /// Registers the fonts in `dir` with the toolkit.
    pub fn add_fonts<T: Toolkit>(&self, toolkit: &mut T, dir: &Path) -> Result<()> {
        platform::validate_dir_path(dir)?;
        toolkit.add_fonts(dir)
    }
}

/// Pre-built bundles discovered on disk.
#[derive(Debug, Clone, Default)]
pub struct StaticThemes {
    table: BundleTable,
}

impl StaticThemes {
    /// An uninitialized source; lookups fail until bundles are loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `parent` for bundles.
    pub fn from_dir(parent: &Path) -> Result<Self> {
        Ok(Self {
            table: BundleScanner::scan(parent)?,
        })
    }

    /// Validates explicitly constructed bundles.
    pub fn from_structures(bundles: Vec<ThemeBundleStructure>) -> Result<Self> {
        Ok(Self {
            table: BundleScanner::build(bundles)?,
        })
    }

    pub fn table(&self) -> &BundleTable {
        &self.table
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_ready()
    }
}

impl ThemeSource for StaticThemes {
    fn theme_names(&self) -> Result<Vec<String>> {
        Ok(self.table.names())
    }

    fn theme(&self, name: &str) -> Result<Theme> {
        self.table
            .get(name)?
            .resolved_theme()
            .cloned()
            .ok_or_else(|| Error::ThemeNotFound(name.to_string()))
    }

    fn stylesheet(&self, name: &str) -> Result<String> {
        self.table.get(name)?.stylesheet()
    }

    fn icons_dir(&self, name: &str) -> Result<PathBuf> {
        Ok(self.table.get(name)?.theme_dir().to_path_buf())
    }
}

/// Themes rendered and recolored on demand.
///
/// Icons go to the per-user cache directory for the application name, or to
/// an explicit directory set with [`with_cache_dir`](Self::with_cache_dir).
#[derive(Debug, Clone)]
pub struct DynamicThemes {
    app_name: Option<String>,
    cache_dir: Option<PathBuf>,
    manager: ThemeManager,
    renderer: StyleSheetRenderer,
    extra: ExtraAttributes,
}

impl DynamicThemes {
    /// A source over the built-in palettes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAppName`] if `app_name` contains prohibited characters.
    pub fn new(app_name: Option<&str>) -> Result<Self> {
        if let Some(name) = app_name {
            validate_app_name(name)?;
        }
        Ok(Self {
            app_name: app_name.map(str::to_string),
            cache_dir: None,
            manager: ThemeManager::builtin(),
            renderer: StyleSheetRenderer::new(),
            extra: ExtraAttributes::default(),
        })
    }

    /// Writes icons to `dir` instead of the per-user cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Renders with `renderer` instead of the default template.
    pub fn with_renderer(mut self, renderer: StyleSheetRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Merges `overrides` into the current extra attributes.
    pub fn set_extra(&mut self, overrides: Map<String, Value>) -> Result<()> {
        self.extra = self.extra.with_updated_values(overrides)?;
        Ok(())
    }

    pub fn extra(&self) -> &ExtraAttributes {
        &self.extra
    }

    /// Switches the palette directory; `None` reverts to the built-ins.
    pub fn set_theme_dir(&mut self, dir: Option<&Path>) -> Result<()> {
        self.manager.set_theme_dir(dir)
    }

    fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => {
                platform::ensure_dir(dir)?;
                Ok(dir.clone())
            }
            None => BuiltInIconGenerator::dynamic_icons_dir(self.app_name.as_deref()),
        }
    }
}

impl ThemeSource for DynamicThemes {
    fn theme_names(&self) -> Result<Vec<String>> {
        self.manager.theme_names()
    }

    fn theme(&self, name: &str) -> Result<Theme> {
        self.manager.load(name)
    }

    /// Also regenerates the icons for `name`.
    fn stylesheet(&self, name: &str) -> Result<String> {
        Ok(self.resolve(name)?.stylesheet)
    }

    fn icons_dir(&self, _name: &str) -> Result<PathBuf> {
        self.cache_dir()
    }

    fn resolve(&self, name: &str) -> Result<ResolvedTheme> {
        let theme = self.manager.load(name)?;
        let icons_dir = self.cache_dir()?;
        BuiltInIconGenerator::generate_statically(&theme, &icons_dir)?;
        let stylesheet = self.renderer.render(&theme, &self.extra)?;
        Ok(ResolvedTheme {
            theme,
            stylesheet,
            icons_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{RecordingToolkit, ToolkitCall};
    use serde_json::json;
    use tempfile::TempDir;

    fn dynamic(tmp: &TempDir) -> StyleTools<DynamicThemes> {
        StyleTools::new(
            DynamicThemes::new(Some("qsskit-test"))
                .unwrap()
                .with_cache_dir(tmp.path().join("cache")),
        )
    }

    #[test]
    fn test_default_is_first() {
        let tmp = TempDir::new().unwrap();
        let list = dynamic(&tmp).theme_list().unwrap();
        assert_eq!(list[0], DEFAULT_THEME);
        assert!(list.contains(&"dark_teal".to_string()));
    }

    #[test]
    fn test_apply_dynamic_theme() {
        let tmp = TempDir::new().unwrap();
        let mut tools = dynamic(&tmp);
        let mut toolkit = RecordingToolkit::new();

        tools.apply(&mut toolkit, &mut (), "dark_teal").unwrap();
        assert_eq!(tools.current_theme(), "dark_teal");

        let calls = toolkit.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            ToolkitCall::SearchPath {
                dir: tmp.path().join("cache"),
                prefix: ICON_PREFIX.into()
            }
        );
        assert!(matches!(calls[1], ToolkitCall::Palette(_)));
        assert!(toolkit.last_stylesheet().unwrap().contains("#1de9b6"));
        assert!(tmp.path().join("cache/primary/close.svg").is_file());
    }

    #[test]
    fn test_reapplying_current_theme_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut tools = dynamic(&tmp);
        let mut toolkit = RecordingToolkit::new();

        tools.apply(&mut toolkit, &mut (), "default").unwrap();
        assert!(toolkit.calls().is_empty());

        tools.apply(&mut toolkit, &mut (), "dark_blue").unwrap();
        toolkit.clear();
        tools.apply(&mut toolkit, &mut (), "dark_blue").unwrap();
        assert!(toolkit.calls().is_empty());
    }

    #[test]
    fn test_default_clears_styling() {
        let tmp = TempDir::new().unwrap();
        let mut tools = dynamic(&tmp);
        let mut toolkit = RecordingToolkit::new();

        tools.apply(&mut toolkit, &mut (), "light_red").unwrap();
        toolkit.clear();
        tools.apply(&mut toolkit, &mut (), "default").unwrap();
        assert_eq!(toolkit.calls(), &[ToolkitCall::Stylesheet(String::new())]);
        assert_eq!(tools.current_theme(), DEFAULT_THEME);
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut tools = dynamic(&tmp);
        let mut toolkit = RecordingToolkit::new();
        assert!(matches!(
            tools.apply(&mut toolkit, &mut (), "nope"),
            Err(Error::ThemeNotFound(_))
        ));
        assert_eq!(tools.current_theme(), DEFAULT_THEME);
    }

    #[test]
    fn test_set_extra_reaches_stylesheet() {
        let tmp = TempDir::new().unwrap();
        let mut tools = dynamic(&tmp);
        let mut overrides = Map::new();
        overrides.insert("font_family".into(), json!("Fira Sans"));
        tools.source_mut().set_extra(overrides).unwrap();

        let mut toolkit = RecordingToolkit::new();
        tools.apply(&mut toolkit, &mut (), "dark_teal").unwrap();
        assert!(toolkit.last_stylesheet().unwrap().contains("font-family: Fira Sans;"));
    }

    #[test]
    fn test_invalid_app_name() {
        assert!(matches!(
            DynamicThemes::new(Some("a:b")),
            Err(Error::InvalidAppName(_))
        ));
    }

    #[test]
    fn test_uninitialized_static_lookups_fail() {
        let source = StaticThemes::new();
        assert!(!source.is_initialized());
        assert!(matches!(source.theme("x"), Err(Error::Uninitialized)));
        assert!(matches!(source.stylesheet("x"), Err(Error::Uninitialized)));
        assert!(matches!(source.icons_dir("x"), Err(Error::Uninitialized)));
    }

    #[test]
    fn test_add_fonts_forwards_directory() {
        let tmp = TempDir::new().unwrap();
        let tools = StyleTools::new(StaticThemes::new());
        let mut toolkit = RecordingToolkit::new();
        tools.add_fonts(&mut toolkit, tmp.path()).unwrap();
        assert_eq!(toolkit.calls(), &[ToolkitCall::Fonts(tmp.path().to_path_buf())]);

        assert!(tools.add_fonts(&mut toolkit, &tmp.path().join("none")).is_err());
    }
}
