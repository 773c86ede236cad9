//! The default stylesheet template.

/// Name under which the default template is registered.
pub const DEFAULT_TEMPLATE_NAME: &str = "material.css.jinja";

/// Source of the default template.
///
/// Its leading comment header contains no template syntax, so it survives
/// rendering unchanged and identifies stylesheets rendered from it.
pub const DEFAULT_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/material.css.jinja"
));

/// Number of leading lines compared when recognizing rendered output.
pub const SIGNATURE_LINES: usize = 4;

/// The first [`SIGNATURE_LINES`] lines of `text`, whitespace-trimmed.
pub fn signature(text: &str) -> Vec<&str> {
    text.lines().take(SIGNATURE_LINES).map(str::trim).collect()
}

/// Returns true if `text` starts with the default template's header.
pub fn has_default_signature(text: &str) -> bool {
    signature(text) == signature(DEFAULT_TEMPLATE)
}
