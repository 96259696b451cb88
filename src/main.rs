//! Endpoint Connectivity Tester - Main CLI Application
//!
//! Probes a static catalog of network endpoints for reachability and
//! latency, concurrently in bounded batches, and reports aggregated
//! results.

use clap::Parser;
use endpoint_connectivity_tester::{
    app::App,
    cli::Cli,
    error::AppError,
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Debug mode enabled");
        println!();
    }

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<(), AppError> {
    let app = App::new(cli)?;
    app.run().await
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config { .. } | AppError::Validation { .. } => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Verify URL formats (must start with http:// or https://)");
            eprintln!("  - Attempt count must be between 1 and 20");
            eprintln!("  - Timeout must be between 1 and 300 seconds");
        }
        AppError::Catalog { .. } => {
            eprintln!();
            eprintln!("Catalog help:");
            eprintln!("  - Pass the catalog location with --catalog <PATH>");
            eprintln!("  - The catalog is a JSON array of {{name, url, type}} records");
            eprintln!("  - Ad-hoc endpoints can be probed with --url <URL>");
        }
        AppError::Network { .. } | AppError::DnsResolution { .. } => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Verify firewall settings");
            eprintln!("  - Test a single endpoint with --url and --fast");
        }
        AppError::ProbeRun { .. } => {
            eprintln!();
            eprintln!("Probe troubleshooting:");
            eprintln!("  - Increase timeout with --timeout");
            eprintln!("  - Reduce batch size with --batch-size");
            eprintln!("  - Run with --verbose for per-endpoint errors");
        }
        _ => {}
    }
}
