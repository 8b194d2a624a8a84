//! Taskrank CLI binary.

use anyhow::Result;
use taskrank::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the taskrank CLI.
fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=taskrank=debug taskrank analyze tasks.json
    // Logs go to stderr so --json output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskrank=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting taskrank CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("Taskrank CLI completed successfully");
    Ok(())
}
