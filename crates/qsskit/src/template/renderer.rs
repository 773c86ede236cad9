//! Stylesheet rendering.
//!
//! [`StyleSheetRenderer`] merges three namespaces into one template context,
//! later ones winning on key collisions:
//!
//! 1. the theme's color roles (`primaryColor`, ...)
//! 2. the resolved extra attributes (`font_family`, `density_scale`, ...)
//! 3. environment flags: `linux`, `windows`, `darwin` for the compile target,
//!    and `qt5`, `qt6` for the selected toolkit variant

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::builtin::DEFAULT_TEMPLATE;
use super::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::{Error, Result};
use crate::theme::{ExtraAttributes, Theme};
use crate::toolkit::ToolkitVariant;

/// Which template a renderer uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The default template compiled into the crate.
    BuiltIn,
    /// A template file; its directory is the include root.
    File(PathBuf),
}

/// Renders a stylesheet from a theme and extra attributes.
#[derive(Debug, Clone)]
pub struct StyleSheetRenderer {
    source: TemplateSource,
    toolkit: Option<ToolkitVariant>,
}

impl Default for StyleSheetRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheetRenderer {
    /// A renderer for the default template.
    pub fn new() -> Self {
        Self {
            source: TemplateSource::BuiltIn,
            toolkit: None,
        }
    }

    /// A renderer for a custom template file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] unless `path` is an existing file.
    pub fn with_template_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::TemplateNotFound(path.to_path_buf()));
        }
        Ok(Self {
            source: TemplateSource::File(path.to_path_buf()),
            toolkit: None,
        })
    }

    /// Sets the toolkit variant flag exposed to the template.
    pub fn with_toolkit(mut self, toolkit: ToolkitVariant) -> Self {
        self.toolkit = Some(toolkit);
        self
    }

    /// The template this renderer uses.
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Builds the template context for `theme` and `extra`.
    pub fn context(&self, theme: &Theme, extra: &ExtraAttributes) -> Value {
        let mut ctx = Map::new();
        for (key, color) in theme.colors() {
            ctx.insert(key.clone(), Value::from(color.as_str()));
        }
        for (key, value) in extra.values() {
            ctx.insert(key.clone(), value.clone());
        }

        ctx.insert("linux".into(), Value::from(cfg!(target_os = "linux")));
        ctx.insert("windows".into(), Value::from(cfg!(target_os = "windows")));
        ctx.insert("darwin".into(), Value::from(cfg!(target_os = "macos")));
        for variant in ToolkitVariant::ALL {
            ctx.insert(
                variant.flag_name().into(),
                Value::from(self.toolkit == Some(variant)),
            );
        }
        Value::Object(ctx)
    }

    /// Renders the stylesheet.
    ///
    /// # Errors
    ///
    /// Any engine failure is returned as [`Error::Template`]; a template file
    /// removed since construction is [`Error::TemplateNotFound`].
    pub fn render(&self, theme: &Theme, extra: &ExtraAttributes) -> Result<String> {
        let ctx = self.context(theme, extra);
        let rendered = match &self.source {
            TemplateSource::BuiltIn => MiniJinjaEngine::new().render_template(DEFAULT_TEMPLATE, &ctx),
            TemplateSource::File(path) => {
                let (dir, name) = split_template_path(path)?;
                MiniJinjaEngine::with_template_dir(dir).render_named(name, &ctx)
            }
        };
        rendered.map_err(|err| {
            tracing::error!("template rendering failed: {}", err);
            err
        })
    }
}

fn split_template_path(path: &Path) -> Result<(&Path, &str)> {
    if !path.is_file() {
        return Err(Error::TemplateNotFound(path.to_path_buf()));
    }
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::TemplateNotFound(path.to_path_buf()))?;
    Ok((dir, name))
}
