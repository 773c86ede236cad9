//! Stylesheet templates and rendering.
//!
//! The default template ships with the crate; a custom template file can be
//! used instead via [`StyleSheetRenderer::with_template_file`]. Templates use
//! MiniJinja syntax and have two extra filters, `opacity` and `density`
//! (see [`filters`]).

mod builtin;
mod engine;
pub mod filters;
mod renderer;

pub use builtin::{
    has_default_signature, signature, DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_NAME, SIGNATURE_LINES,
};
pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use filters::{density, opacity, register_filters, DensityOptions, DensityValue};
pub use renderer::{StyleSheetRenderer, TemplateSource};
