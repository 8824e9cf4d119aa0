use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "repogen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Materialize a project tree from a flat text manifest")]
#[command(
    long_about = "Repogen reads a manifest containing embedded file blocks and writes \
                       each block to disk under an output root, recreating the described \
                       project tree."
)]
#[command(before_help = "📦 Repogen - Manifest Unpacking Tool")]
#[command(after_help = "EXAMPLES:\n  \
    repogen\n  \
    repogen path/to/manifest.txt\n  \
    repogen manifest.txt --output generated --verbose\n  \
    repogen --dry-run\n  \
    repogen --config my-config.toml\n\n\
    With no arguments, the manifest is expected at ../manifest.txt relative to the\n\
    tool's install directory and files are written to the sibling repo_out/.")]
pub struct Cli {
    /// Manifest file to unpack (defaults to the install-location convention)
    pub manifest: Option<PathBuf>,

    /// Output root directory (defaults to repo_out next to the manifest convention)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (list manifest entries without writing anything)
    #[arg(long, help = "Show what would be written without actually doing it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_manifest(self.manifest.clone())
            .with_output_root(self.output.clone())
    }
}
