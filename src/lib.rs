pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod ui;
pub mod writer;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ManifestConfig, OutputConfig};
pub use error::{RepogenError, Result, UserFriendlyError};

// Core functionality re-exports
pub use manifest::{BlockParser, FileEntry, Manifest, ManifestLocator};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};
pub use writer::{EntryInfo, FileWriter, UnpackProgress, UnpackReport};

use std::path::{Path, PathBuf};

/// Main library interface for Repogen functionality
pub struct Repogen {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Repogen {
    /// Create a new Repogen instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create Repogen instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Unpack the manifest into the output root
    pub fn unpack(&self) -> Result<UnpackReport> {
        self.output_formatter
            .start_operation("Regenerating project from manifest");

        // Step 1: Locate and read the manifest. Fatal if absent; nothing has
        // been written at this point.
        let manifest = self.load_manifest()?;

        // Step 2: Extract entries
        let entries = self.parse_entries(&manifest);
        self.output_formatter
            .success(&format!("Detected {} file entries", entries.len()));

        // Step 3: Write entries in manifest order
        let output_root = self.resolve_output_root()?;
        let progress = self.write_entries(&entries, &output_root)?;

        // Step 4: Summarize
        let report = UnpackReport::new(manifest.path, output_root, &entries, &progress);
        self.output_formatter.print_unpack_summary(&progress);

        Ok(report)
    }

    /// Locate and list entries without writing anything (dry-run support)
    pub fn list_entries(&self) -> Result<(Manifest, Vec<FileEntry>)> {
        let manifest = self.load_manifest()?;
        let entries = self.parse_entries(&manifest);
        Ok((manifest, entries))
    }

    fn load_manifest(&self) -> Result<Manifest> {
        let locator = ManifestLocator::new().with_path(self.config.manifest.path.clone());
        let manifest = locator.load()?;

        self.output_formatter
            .info(&format!("Manifest: {}", manifest.path.display()));

        Ok(manifest)
    }

    fn parse_entries(&self, manifest: &Manifest) -> Vec<FileEntry> {
        let parser = BlockParser::new();
        let entries = parser.parse(&manifest.text);

        let stats = parser.get_statistics(&entries);
        self.output_formatter.debug(&stats.display_summary());

        entries
    }

    /// Resolve the effective output root: configuration wins over the
    /// sibling `repo_out` convention.
    pub fn resolve_output_root(&self) -> Result<PathBuf> {
        match self.config.output.root {
            Some(ref root) => Ok(root.clone()),
            None => manifest::locator::conventional_output_root(),
        }
    }

    fn write_entries(&self, entries: &[FileEntry], output_root: &Path) -> Result<UnpackProgress> {
        let file_progress = self
            .progress_manager
            .create_file_progress(entries.len() as u64);

        let progress_callback = {
            let pb = file_progress.clone();
            let formatter = &self.output_formatter;
            let progress_manager = &self.progress_manager;
            move |progress: &UnpackProgress| {
                ui::progress::update_file_progress(&pb, progress);
                if let Some(ref destination) = progress.current_destination {
                    progress_manager.suspend(|| formatter.file_written(destination));
                }
            }
        };

        let writer = FileWriter::new();
        match writer.write_entries(entries, output_root, Some(&progress_callback)) {
            Ok(progress) => {
                ui::progress::finish_progress_with_summary(
                    &file_progress,
                    &format!("Wrote {} files", progress.files_written),
                    progress.elapsed(),
                );
                Ok(progress)
            }
            Err(e) => {
                file_progress.abandon_with_message("Write failed".to_string());
                Err(e)
            }
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(RepogenError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Get progress manager reference
    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &RepogenError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to unpack a manifest with minimal setup
pub fn unpack_simple(
    manifest_path: &Path,
    output_root: Option<&Path>,
    verbose: bool,
) -> Result<UnpackReport> {
    let mut config = Config::default();
    config.manifest.path = Some(manifest_path.to_path_buf());

    if let Some(root) = output_root {
        config.output.root = Some(root.to_path_buf());
    }

    let repogen = Repogen::new(
        config,
        OutputMode::Plain,
        if verbose { 1 } else { 0 },
        !verbose,
    );

    repogen.unpack()
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
