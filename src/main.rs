use clap::Parser;
use repogen::{Cli, OutputFormatter, OutputMode, Repogen, RepogenError, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Create Repogen instance
    let repogen = match Repogen::from_cli(&cli) {
        Ok(repogen) => repogen,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&repogen);
    }

    // Execute main unpack workflow
    match repogen.unpack() {
        Ok(report) => {
            repogen.output_formatter().print_unpack_report(&report);
            0
        }
        Err(e) => {
            repogen.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

// Map error types to appropriate exit codes
fn exit_code_for(error: &RepogenError) -> i32 {
    match error {
        RepogenError::MissingManifest { .. } => 3,
        RepogenError::WriteFailure { .. } => 4,
        RepogenError::Config { .. } => 2,
        RepogenError::Permission { .. } => 7,
        RepogenError::Io(_) => 5,
        _ => 1, // General error
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "repogen.toml".to_string());

    match Repogen::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  repogen --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(repogen: &Repogen) -> i32 {
    let formatter = repogen.output_formatter();

    formatter.start_operation("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    let (manifest, entries) = match repogen.list_entries() {
        Ok(listed) => listed,
        Err(e) => {
            repogen.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    let output_root = match repogen.resolve_output_root() {
        Ok(root) => root,
        Err(e) => {
            repogen.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    formatter.success(&format!("Manifest is readable: {}", manifest.path.display()));
    formatter.success(&format!("Detected {} file entries", entries.len()));

    for entry in &entries {
        println!(
            "  {} ({} bytes)",
            output_root.join(entry.relative_path.trim()).display(),
            entry.content_bytes()
        );
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");

    0
}

fn print_startup_error(error: &RepogenError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
