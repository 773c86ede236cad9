//! Writing rendered stylesheets, resource manifests and complete bundles.
//!
//! [`StyleSheetExporter`] persists one stylesheet and, optionally, a `.qrc`
//! manifest listing the icons beside it. [`ResourceGenerator`] produces a
//! whole bundle: icons, stylesheet, manifest and palette JSON.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::files;
use crate::icon::BuiltInIconGenerator;
use crate::platform::{self, is_valid_filename};
use crate::template::StyleSheetRenderer;
use crate::theme::{ExtraAttributes, Theme, ThemeManager};
use crate::toolkit::ICON_URL_PREFIX;

/// Default stylesheet file name.
pub const DEFAULT_QSS_NAME: &str = "_qsskit.qss";

/// Options for [`StyleSheetExporter::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// URL prefix for icon references; must end with `:/`.
    pub icon_url_prefix: String,
    pub qss_name: String,
    /// Manifest file name; no manifest is written when `None`.
    pub qrc_name: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            icon_url_prefix: ICON_URL_PREFIX.to_string(),
            qss_name: DEFAULT_QSS_NAME.to_string(),
            qrc_name: None,
        }
    }
}

/// Persists a rendered stylesheet and its resource manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleSheetExporter;

impl StyleSheetExporter {
    /// Writes `<destination>/<qss_name>` and, if requested, the manifest.
    ///
    /// The manifest lists every `*.svg` already present in subdirectories of
    /// `destination`, so icons should be generated first.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for a prefix not ending in `:/`, or
    /// [`Error::Io`] when a file cannot be written.
    pub fn export(stylesheet: &str, destination: &Path, options: &ExportOptions) -> Result<()> {
        if !options.icon_url_prefix.ends_with(":/") {
            return Err(Error::InvalidArgument(format!(
                "icon URL prefix must end with ':/', got '{}'",
                options.icon_url_prefix
            )));
        }
        platform::ensure_dir(destination)?;

        let qss_path = destination.join(&options.qss_name);
        let content = if options.icon_url_prefix == ICON_URL_PREFIX {
            stylesheet.to_string()
        } else {
            stylesheet.replace(ICON_URL_PREFIX, &options.icon_url_prefix)
        };
        write_file(&qss_path, &content)?;

        if let Some(qrc_name) = &options.qrc_name {
            let resource_prefix = options
                .icon_url_prefix
                .strip_suffix(":/")
                .unwrap_or(&options.icon_url_prefix);
            let manifest = qrc_manifest(destination, resource_prefix, &options.qss_name)?;
            write_file(&destination.join(qrc_name), &manifest)?;
        }
        Ok(())
    }
}

/// Builds the `.qrc` manifest for the icons under `dir`.
///
/// One `<qresource>` group per subdirectory holding at least one `*.svg`,
/// then one group for the stylesheet. Everything is sorted and relative to `dir`.
pub fn qrc_manifest(dir: &Path, resource_prefix: &str, qss_name: &str) -> Result<String> {
    let mut out = String::from("<RCC>\n");
    for sub_dir in files::list_dirs(dir)? {
        let icons = files::list_files(&sub_dir, "svg")?;
        if icons.is_empty() {
            continue;
        }
        let sub_name = files::file_name(&sub_dir);
        let _ = writeln!(out, "  <qresource prefix=\"{}\">", resource_prefix);
        for icon in &icons {
            let _ = writeln!(out, "    <file>{}/{}</file>", sub_name, files::file_name(icon));
        }
        out.push_str("  </qresource>\n");
    }
    out.push_str("  <qresource prefix=\"file\">\n");
    let _ = writeln!(out, "    <file>{}</file>", qss_name);
    out.push_str("  </qresource>\n");
    out.push_str("</RCC>\n");
    Ok(out)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| {
        tracing::error!("failed to write {}: {}", path.display(), e);
        Error::io(path, e)
    })
}

/// Options for [`ResourceGenerator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Parent directory for the bundle; `./resources` when `None`.
    pub destination: Option<PathBuf>,
    pub export: ExportOptions,
}

/// Generates complete static bundles.
#[derive(Debug, Clone, Default)]
pub struct ResourceGenerator {
    manager: ThemeManager,
    renderer: StyleSheetRenderer,
}

impl ResourceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves palette names with `manager` instead of the built-ins.
    pub fn with_manager(mut self, manager: ThemeManager) -> Self {
        self.manager = manager;
        self
    }

    /// Renders with `renderer` instead of the default template.
    pub fn with_renderer(mut self, renderer: StyleSheetRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Generates the bundle for a named palette and returns its directory.
    ///
    /// # Errors
    ///
    /// [`Error::ThemeNotFound`] if the palette is unknown.
    pub fn generate(
        &self,
        theme_name: &str,
        extra: &ExtraAttributes,
        options: &GenerateOptions,
    ) -> Result<PathBuf> {
        let theme = self.manager.load(theme_name)?;
        self.generate_custom_theme(theme_name, &theme, extra, options)
    }

    /// Generates `<destination>/<theme_name>/` for an explicit palette.
    ///
    /// The bundle holds the recolored icons, the stylesheet, the optional
    /// manifest and `<theme_name>.json`.
    pub fn generate_custom_theme(
        &self,
        theme_name: &str,
        theme: &Theme,
        extra: &ExtraAttributes,
        options: &GenerateOptions,
    ) -> Result<PathBuf> {
        if !is_valid_filename(theme_name) {
            return Err(Error::InvalidArgument(format!(
                "theme name '{}' is not a valid directory name",
                theme_name
            )));
        }
        let destination = bundle_dir(theme_name, options.destination.as_deref())?;

        let stylesheet = self.renderer.render(theme, extra)?;
        BuiltInIconGenerator::generate_statically(theme, &destination)?;
        StyleSheetExporter::export(&stylesheet, &destination, &options.export)?;
        write_file(
            &destination.join(format!("{}.json", theme_name)),
            &theme.to_json_pretty(),
        )?;

        tracing::debug!("generated theme '{}' in {}", theme_name, destination.display());
        Ok(destination)
    }
}

fn bundle_dir(theme_name: &str, destination: Option<&Path>) -> Result<PathBuf> {
    let parent = match destination {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()
            .map_err(|e| Error::io(".", e))?
            .join("resources"),
    };
    Ok(parent.join(theme_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{required_icon_names, IconContext};
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_stylesheet() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");
        StyleSheetExporter::export("a { image: url(icon:/primary/x.svg); }", &dest, &ExportOptions::default())
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(dest.join(DEFAULT_QSS_NAME)).unwrap(),
            "a { image: url(icon:/primary/x.svg); }"
        );
        assert!(!dest.join("resources.qrc").exists());
    }

    #[test]
    fn test_export_rewrites_prefix() {
        let tmp = TempDir::new().unwrap();
        let options = ExportOptions {
            icon_url_prefix: "theme:/".into(),
            ..ExportOptions::default()
        };
        StyleSheetExporter::export("url(icon:/primary/x.svg)", tmp.path(), &options).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(DEFAULT_QSS_NAME)).unwrap(),
            "url(theme:/primary/x.svg)"
        );
    }

    #[test]
    fn test_export_rejects_bad_prefix() {
        let tmp = TempDir::new().unwrap();
        let options = ExportOptions {
            icon_url_prefix: "icon".into(),
            ..ExportOptions::default()
        };
        assert!(matches!(
            StyleSheetExporter::export("", tmp.path(), &options),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_qrc_manifest_layout() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("primary")).unwrap();
        std::fs::create_dir_all(tmp.path().join("active")).unwrap();
        std::fs::create_dir_all(tmp.path().join("fonts")).unwrap();
        std::fs::write(tmp.path().join("primary/b.svg"), "").unwrap();
        std::fs::write(tmp.path().join("primary/a.svg"), "").unwrap();
        std::fs::write(tmp.path().join("active/a.svg"), "").unwrap();
        std::fs::write(tmp.path().join("fonts/x.ttf"), "").unwrap();

        let manifest = qrc_manifest(tmp.path(), "icon", "style.qss").unwrap();
        assert_eq!(
            manifest,
            "<RCC>\n\
             \x20 <qresource prefix=\"icon\">\n\
             \x20   <file>active/a.svg</file>\n\
             \x20 </qresource>\n\
             \x20 <qresource prefix=\"icon\">\n\
             \x20   <file>primary/a.svg</file>\n\
             \x20   <file>primary/b.svg</file>\n\
             \x20 </qresource>\n\
             \x20 <qresource prefix=\"file\">\n\
             \x20   <file>style.qss</file>\n\
             \x20 </qresource>\n\
             </RCC>\n"
        );
    }

    #[test]
    fn test_generate_builtin_bundle() {
        let tmp = TempDir::new().unwrap();
        let options = GenerateOptions {
            destination: Some(tmp.path().to_path_buf()),
            export: ExportOptions {
                qrc_name: Some("resources.qrc".into()),
                ..ExportOptions::default()
            },
        };
        let dir = ResourceGenerator::new()
            .generate("dark_teal", &ExtraAttributes::default(), &options)
            .unwrap();

        assert_eq!(dir, tmp.path().join("dark_teal"));
        assert!(dir.join(DEFAULT_QSS_NAME).is_file());
        assert!(dir.join("dark_teal.json").is_file());
        let manifest = std::fs::read_to_string(dir.join("resources.qrc")).unwrap();
        for context in IconContext::ALL {
            for icon in required_icon_names() {
                assert!(manifest.contains(&format!("<file>{}/{}</file>", context, icon)));
            }
        }
        assert!(manifest.contains(&format!("<file>{}</file>", DEFAULT_QSS_NAME)));
    }

    #[test]
    fn test_generate_unknown_theme() {
        let tmp = TempDir::new().unwrap();
        let options = GenerateOptions {
            destination: Some(tmp.path().to_path_buf()),
            ..GenerateOptions::default()
        };
        assert!(matches!(
            ResourceGenerator::new().generate("nope", &ExtraAttributes::default(), &options),
            Err(Error::ThemeNotFound(_))
        ));
    }

    #[test]
    fn test_generate_rejects_path_like_names() {
        let tmp = TempDir::new().unwrap();
        let theme = ThemeManager::builtin().load("dark_teal").unwrap();
        let options = GenerateOptions {
            destination: Some(tmp.path().to_path_buf()),
            ..GenerateOptions::default()
        };
        assert!(matches!(
            ResourceGenerator::new().generate_custom_theme(
                "../escape",
                &theme,
                &ExtraAttributes::default(),
                &options
            ),
            Err(Error::InvalidArgument(_))
        ));
    }
}
