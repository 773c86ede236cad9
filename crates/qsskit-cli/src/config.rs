//! qsskit.toml handling

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use qsskit::toolkit::ICON_URL_PREFIX;
use qsskit::DEFAULT_QSS_NAME;
use serde::Deserialize;
use serde_json::{Map, Value};

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "qsskit.toml";

/// Project configuration (qsskit.toml)
///
/// Relative paths are resolved against the directory holding the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QsskitConfig {
    /// Directory of palette JSON files; built-in palettes when unset
    #[serde(default)]
    pub theme_dir: Option<PathBuf>,
    /// Custom stylesheet template
    #[serde(default)]
    pub template: Option<PathBuf>,
    /// Parent directory for generated bundles
    #[serde(default)]
    pub destination: Option<PathBuf>,
    #[serde(default = "default_qss_name")]
    pub qss_name: String,
    #[serde(default)]
    pub qrc_name: Option<String>,
    #[serde(default = "default_icon_url_prefix")]
    pub icon_url_prefix: String,
    /// Application name for the per-user icon cache
    #[serde(default)]
    pub app_name: Option<String>,
    /// Extra attributes passed to the template
    #[serde(default)]
    pub extra: toml::Table,
}

fn default_qss_name() -> String {
    DEFAULT_QSS_NAME.to_string()
}

fn default_icon_url_prefix() -> String {
    ICON_URL_PREFIX.to_string()
}

impl Default for QsskitConfig {
    fn default() -> Self {
        Self {
            theme_dir: None,
            template: None,
            destination: None,
            qss_name: default_qss_name(),
            qrc_name: None,
            icon_url_prefix: default_icon_url_prefix(),
            app_name: None,
            extra: toml::Table::new(),
        }
    }
}

impl QsskitConfig {
    /// Loads the configuration for this run.
    ///
    /// An explicit path must exist. Without one, `./qsskit.toml` is used when
    /// present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE_NAME);
                if path.is_file() {
                    Self::load_from_file(path)
                } else {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Configuration file {} not found", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut config: QsskitConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.theme_dir, &mut self.template, &mut self.destination]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// The `[extra]` table as template values.
    pub fn extra_values(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(&self.extra).context("Failed to convert [extra] table")? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_for_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();

        let config = QsskitConfig::load_from_file(&path).unwrap();
        assert_eq!(config, QsskitConfig::default());
        assert_eq!(config.qss_name, DEFAULT_QSS_NAME);
        assert_eq!(config.icon_url_prefix, "icon:/");
    }

    #[test]
    fn test_relative_paths_follow_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
theme_dir = "palettes"
destination = "/abs/out"
qrc_name = "resources.qrc"

[extra]
font_family = "Roboto"
density_scale = -1

[extra.QMenu]
padding = "4px"
"#,
        )
        .unwrap();

        let config = QsskitConfig::load_from_file(&path).unwrap();
        assert_eq!(config.theme_dir, Some(tmp.path().join("palettes")));
        assert_eq!(config.destination, Some(PathBuf::from("/abs/out")));
        assert_eq!(config.qrc_name.as_deref(), Some("resources.qrc"));

        let extra = config.extra_values().unwrap();
        assert_eq!(extra["font_family"], "Roboto");
        assert_eq!(extra["density_scale"], -1);
        assert_eq!(extra["QMenu"]["padding"], "4px");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let tmp = TempDir::new().unwrap();
        let err = QsskitConfig::load(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "qss_name = [").unwrap();
        let err = QsskitConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
