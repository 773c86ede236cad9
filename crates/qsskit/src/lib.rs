//! # qsskit - Themed Qt Stylesheets from Color Palettes
//!
//! `qsskit` turns a small declarative palette (eight named colors) into a
//! complete look for a Qt application: a rendered QSS stylesheet, a set of
//! recolored SVG icons per UI state, and optionally a `.qrc` resource
//! manifest.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: a validated palette keyed by [`ColorRole`]
//! - [`ExtraAttributes`]: optional styling knobs (fonts, density, button shape)
//! - [`StyleSheetRenderer`]: renders the stylesheet template with MiniJinja
//! - [`icon`]: recolors SVG templates into `disabled/`, `primary/` and `active/`
//! - [`ResourceGenerator`]: writes a complete static bundle to disk
//! - [`BundleScanner`]: discovers and validates pre-built bundles
//! - [`StyleTools`]: applies themes at runtime through a [`Toolkit`]
//!
//! ## Quick Start
//!
//! ```rust
//! use qsskit::{ExtraAttributes, StyleSheetRenderer, ThemeManager};
//!
//! let theme = ThemeManager::builtin().load("dark_teal").unwrap();
//! let qss = StyleSheetRenderer::new()
//!     .render(&theme, &ExtraAttributes::default())
//!     .unwrap();
//! assert!(qss.contains("#1de9b6"));
//! ```
//!
//! ## Template Filters
//!
//! Besides the MiniJinja built-ins, templates can use:
//!
//! - `opacity(alpha)`: `"#ff0000"|opacity(0.5)` gives `rgba(255, 0, 0, 0.5)`
//! - `density(scale, ...)`: scales pixel sizes by the density setting
//!
//! ## Toolkit Integration
//!
//! The crate does not link against Qt. Applications implement [`Toolkit`] for
//! their binding and hand it to [`StyleTools::apply`].

mod error;
mod files;

pub mod bundle;
pub mod export;
pub mod icon;
pub mod platform;
pub mod template;
pub mod theme;
pub mod toolkit;
pub mod tools;

pub use error::{Error, Result};

pub use theme::{
    builtin_theme_json, is_valid_hex_color, ColorRole, ExtraAttributes, Theme, ThemeError,
    ThemeManager, ThemeSourceDir, BUILTIN_THEMES, DEFAULT_ACTIVE_COLOR,
};

pub use icon::{
    replace_color, BuiltInIconGenerator, ContextIconGenerator, IconContext, IconDirValidator,
    IconSource,
};

pub use template::{
    MiniJinjaEngine, StyleSheetRenderer, TemplateEngine, TemplateSource, DEFAULT_TEMPLATE,
};

pub use bundle::{BundleScanner, BundleTable, ThemeBundleStructure, ThemeRef};

pub use export::{
    qrc_manifest, ExportOptions, GenerateOptions, ResourceGenerator, StyleSheetExporter,
    DEFAULT_QSS_NAME,
};

pub use toolkit::{NoopToolkit, RecordingToolkit, Toolkit, ToolkitCall, ToolkitVariant};

pub use tools::{DynamicThemes, ResolvedTheme, StaticThemes, StyleTools, ThemeSource};
