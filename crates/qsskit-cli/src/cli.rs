use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use qsskit::ToolkitVariant;
use tracing_subscriber::EnvFilter;

use crate::commands;
use crate::config::QsskitConfig;

/// Generate themed Qt stylesheets and icons from color palettes
#[derive(Debug, Clone, Parser)]
#[command(name = "qsskit", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub subcommand: RootSubcommand,
    /// Configuration file (defaults to ./qsskit.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Increase logging verbosity
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl CliArgs {
    pub fn execute(self) -> Result<ExitCode> {
        Self::setup_logging(self.verbose).context("failed to initialize logging")?;

        let config = QsskitConfig::load(self.config.as_deref())?;
        let mut stdout = std::io::stdout().lock();
        self.subcommand.execute(&config, &mut stdout)?;
        Ok(ExitCode::SUCCESS)
    }

    fn setup_logging(verbose: u8) -> Result<()> {
        let default_level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("qsskit={0},qsskit_cli={0}", default_level)));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e))
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum RootSubcommand {
    /// List palette names
    List(ListArgs),
    /// Render a stylesheet to stdout or a file
    Render(RenderArgs),
    /// Generate complete theme bundles
    Generate(GenerateArgs),
    /// Generate recolored icons only
    Icons(IconsArgs),
    /// Scan a bundle directory and print the valid themes
    Validate(ValidateArgs),
}

impl RootSubcommand {
    pub fn execute(self, config: &QsskitConfig, out: &mut dyn std::io::Write) -> Result<()> {
        match self {
            RootSubcommand::List(args) => commands::list(&args, config, out),
            RootSubcommand::Render(args) => commands::render(&args, config, out),
            RootSubcommand::Generate(args) => commands::generate(&args, config, out),
            RootSubcommand::Icons(args) => commands::icons(&args, config, out),
            RootSubcommand::Validate(args) => commands::validate(&args, out),
        }
    }
}

/// Toolkit variant flag exposed to the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToolkitArg {
    Qt5,
    Qt6,
}

impl From<ToolkitArg> for ToolkitVariant {
    fn from(arg: ToolkitArg) -> Self {
        match arg {
            ToolkitArg::Qt5 => ToolkitVariant::Qt5,
            ToolkitArg::Qt6 => ToolkitVariant::Qt6,
        }
    }
}

/// Palette and template selection shared by rendering commands
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Directory of palette JSON files
    #[arg(long)]
    pub theme_dir: Option<PathBuf>,
    /// JSON file with extra attributes
    #[arg(long)]
    pub extra: Option<PathBuf>,
    /// Custom stylesheet template
    #[arg(long)]
    pub template: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub toolkit: Option<ToolkitArg>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Directory of palette JSON files
    #[arg(long)]
    pub theme_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Palette name
    pub theme: String,
    #[command(flatten)]
    pub source: SourceArgs,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Palette names
    pub themes: Vec<String>,
    /// Palette JSON file to generate instead of named palettes
    #[arg(long, requires = "name", conflicts_with = "themes")]
    pub theme_file: Option<PathBuf>,
    /// Bundle name for --theme-file
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub source: SourceArgs,
    /// Parent directory for the bundles
    #[arg(long)]
    pub dest: Option<PathBuf>,
    #[arg(long)]
    pub qss_name: Option<String>,
    /// Also write a resource manifest with this name
    #[arg(long)]
    pub qrc_name: Option<String>,
    /// Icon URL prefix, ending with ':/'
    #[arg(long)]
    pub icon_prefix: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct IconsArgs {
    /// Palette name
    pub theme: String,
    /// Output directory; the per-user cache directory when omitted
    #[arg(long)]
    pub dest: Option<PathBuf>,
    /// Directory of palette JSON files
    #[arg(long)]
    pub theme_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Parent directory of theme bundles
    pub dir: PathBuf,
}
