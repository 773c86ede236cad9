//! Template engine abstraction.
//!
//! [`TemplateEngine`] is the seam between the stylesheet renderer and the
//! template backend. [`MiniJinjaEngine`] is the implementation used by the
//! crate; engine failures come back as [`Error::Template`](crate::Error::Template).

use std::path::Path;

use minijinja::{AutoEscape, Environment, Value};

use super::filters::register_filters;
use crate::error::Result;

/// A template engine that can render templates with data.
pub trait TemplateEngine: Send + Sync {
    /// Compiles and renders a template string.
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String>;

    /// Renders a template the engine can resolve by name.
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String>;

    /// Checks if a template with the given name can be resolved.
    fn has_template(&self, name: &str) -> bool;
}

/// MiniJinja-based template engine with `opacity` and `density` registered.
///
/// Output is never escaped. With [`MiniJinjaEngine::with_template_dir`],
/// templates are resolved from a directory, so a template can
/// `{% include %}` its siblings.
///
/// ```rust
/// use qsskit::template::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// let out = engine
///     .render_template("color: {{ c|opacity(0.5) }};", &json!({"c": "#000000"}))
///     .unwrap();
/// assert_eq!(out, "color: rgba(0, 0, 0, 0.5);");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates an engine with no template loader.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_filters(&mut env);
        Self { env }
    }

    /// Creates an engine that loads named templates from `dir`.
    pub fn with_template_dir(dir: impl AsRef<Path>) -> Self {
        let mut engine = Self::new();
        engine
            .env
            .set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));
        engine
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        let value = Value::from_serialize(data);
        Ok(tmpl.render(value)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_render_template_substitutes() {
        let engine = MiniJinjaEngine::new();
        let out = engine
            .render_template("a { color: {{ primaryColor }}; }", &json!({"primaryColor": "#112233"}))
            .unwrap();
        assert_eq!(out, "a { color: #112233; }");
    }

    #[test]
    fn test_output_is_not_escaped() {
        let engine = MiniJinjaEngine::new();
        let out = engine
            .render_template("{{ font }}", &json!({"font": "\"Roboto\" <x>"}))
            .unwrap();
        assert_eq!(out, "\"Roboto\" <x>");
    }

    #[test]
    fn test_syntax_error_is_template_error() {
        let engine = MiniJinjaEngine::new();
        let err = engine.render_template("{% if %}", &json!({})).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_named_templates_include_siblings() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("main.qss.jinja"), "{% include 'part.qss' %}!").unwrap();
        std::fs::write(tmp.path().join("part.qss"), "{{ x }}").unwrap();

        let engine = MiniJinjaEngine::with_template_dir(tmp.path());
        assert!(engine.has_template("main.qss.jinja"));
        assert!(!engine.has_template("absent.jinja"));
        assert_eq!(
            engine.render_named("main.qss.jinja", &json!({"x": "ok"})).unwrap(),
            "ok!"
        );
    }
}
