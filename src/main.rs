//! mixtape CLI entry point

use clap::Parser;
use mixtape::config::{Cli, Settings};
use mixtape::pipeline;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Validate inputs
    if let Err(e) = validate_inputs(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Build settings from CLI
    let settings = Settings::from_cli(&cli);

    // Run the pipeline
    match pipeline::run(&settings) {
        Ok(report) => {
            if report.rendered {
                println!(
                    "✓ Created {} ({} tracks, {:.1} minutes, seed {})",
                    report.output.display(),
                    report.tracks_used,
                    report.mix_secs / 60.0,
                    report.seed
                );
            } else {
                println!(
                    "Planned {} tracks ({:.1} minutes, seed {})",
                    report.tracks_used,
                    report.mix_secs / 60.0,
                    report.seed
                );
            }
            if report.skipped_files > 0 {
                println!(
                    "  {} unreadable file(s) were left out of the pool",
                    report.skipped_files
                );
            }
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = if cli.quiet { "error" } else { filter };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn validate_inputs(cli: &Cli) -> Result<(), String> {
    if !cli.length.is_finite() || cli.length <= 0.0 {
        return Err("--length must be a positive number of minutes".to_string());
    }

    // A crossfade at least as long as the mix leaves no room for audio
    if cli.crossfade as f64 >= cli.length * 60.0 * 1000.0 {
        return Err("--crossfade must be shorter than the requested mix length".to_string());
    }

    Ok(())
}
