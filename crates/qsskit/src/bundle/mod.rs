//! Static theme bundles.

mod scanner;
mod structure;

pub use scanner::{is_rendered_from_default_template, BundleScanner, BundleTable};
pub use structure::{ThemeBundleStructure, ThemeRef};
