//! Subcommand implementations.
//!
//! Each command writes its user-facing output to `out`; diagnostics go
//! through `tracing`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use qsskit::{
    BuiltInIconGenerator, BundleScanner, ExportOptions, ExtraAttributes, GenerateOptions,
    ResourceGenerator, StyleSheetRenderer, Theme, ThemeManager,
};
use serde_json::Value;

use crate::cli::{GenerateArgs, IconsArgs, ListArgs, RenderArgs, SourceArgs, ValidateArgs};
use crate::config::QsskitConfig;

pub fn list(args: &ListArgs, config: &QsskitConfig, out: &mut dyn Write) -> Result<()> {
    let manager = theme_manager(args.theme_dir.as_deref(), config)?;
    for name in manager.theme_names()? {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

pub fn render(args: &RenderArgs, config: &QsskitConfig, out: &mut dyn Write) -> Result<()> {
    let manager = theme_manager(args.source.theme_dir.as_deref(), config)?;
    let theme = manager
        .load(&args.theme)
        .with_context(|| format!("Failed to load palette '{}'", args.theme))?;
    let extra = extra_attributes(&args.source, config)?;
    let stylesheet = renderer(&args.source, config)?.render(&theme, &extra)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &stylesheet)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => out.write_all(stylesheet.as_bytes())?,
    }
    Ok(())
}

pub fn generate(args: &GenerateArgs, config: &QsskitConfig, out: &mut dyn Write) -> Result<()> {
    let extra = extra_attributes(&args.source, config)?;
    let generator = ResourceGenerator::new()
        .with_manager(theme_manager(args.source.theme_dir.as_deref(), config)?)
        .with_renderer(renderer(&args.source, config)?);
    let options = GenerateOptions {
        destination: args.dest.clone().or_else(|| config.destination.clone()),
        export: ExportOptions {
            icon_url_prefix: args
                .icon_prefix
                .clone()
                .unwrap_or_else(|| config.icon_url_prefix.clone()),
            qss_name: args
                .qss_name
                .clone()
                .unwrap_or_else(|| config.qss_name.clone()),
            qrc_name: args.qrc_name.clone().or_else(|| config.qrc_name.clone()),
        },
    };

    if let Some(theme_file) = &args.theme_file {
        let name = args
            .name
            .as_deref()
            .context("--name is required with --theme-file")?;
        let theme = Theme::from_file(theme_file)
            .with_context(|| format!("Failed to load palette {}", theme_file.display()))?;
        let dir = generator.generate_custom_theme(name, &theme, &extra, &options)?;
        writeln!(out, "{}", dir.display())?;
        return Ok(());
    }

    if args.themes.is_empty() {
        anyhow::bail!("No palette names given. Run `qsskit list` to see the available palettes.");
    }
    for name in &args.themes {
        let dir = generator
            .generate(name, &extra, &options)
            .with_context(|| format!("Failed to generate theme '{}'", name))?;
        writeln!(out, "{}", dir.display())?;
    }
    Ok(())
}

pub fn icons(args: &IconsArgs, config: &QsskitConfig, out: &mut dyn Write) -> Result<()> {
    let theme = theme_manager(args.theme_dir.as_deref(), config)?
        .load(&args.theme)
        .with_context(|| format!("Failed to load palette '{}'", args.theme))?;

    let dir = match &args.dest {
        Some(dest) => {
            BuiltInIconGenerator::generate_statically(&theme, dest)?;
            dest.clone()
        }
        None => BuiltInIconGenerator::generate_dynamically(&theme, config.app_name.as_deref())?,
    };
    writeln!(out, "{}", dir.display())?;
    Ok(())
}

pub fn validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<()> {
    let table = BundleScanner::scan(&args.dir)
        .with_context(|| format!("Failed to scan {}", args.dir.display()))?;
    if !table.is_ready() {
        anyhow::bail!("No valid theme bundles found in {}", args.dir.display());
    }
    for name in table.names() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

fn theme_manager(theme_dir: Option<&Path>, config: &QsskitConfig) -> Result<ThemeManager> {
    let dir: Option<PathBuf> = theme_dir
        .map(Path::to_path_buf)
        .or_else(|| config.theme_dir.clone());
    Ok(ThemeManager::new(dir.as_deref())?)
}

fn renderer(source: &SourceArgs, config: &QsskitConfig) -> Result<StyleSheetRenderer> {
    let template = source.template.as_ref().or(config.template.as_ref());
    let renderer = match template {
        Some(path) => StyleSheetRenderer::with_template_file(path)?,
        None => StyleSheetRenderer::new(),
    };
    Ok(match source.toolkit {
        Some(toolkit) => renderer.with_toolkit(toolkit.into()),
        None => renderer,
    })
}

/// Config `[extra]` values, overridden by the `--extra` JSON file.
fn extra_attributes(source: &SourceArgs, config: &QsskitConfig) -> Result<ExtraAttributes> {
    let mut extra = ExtraAttributes::default().with_updated_values(config.extra_values()?)?;
    if let Some(path) = &source.extra {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        let overrides = match value {
            Value::Object(map) => map,
            _ => anyhow::bail!("{} must contain a JSON object", path.display()),
        };
        extra = extra.with_updated_values(overrides)?;
    }
    Ok(extra)
}
