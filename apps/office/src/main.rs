//! `hma` binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hma_office::cli::{self, Cli};

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Cli::parse();
    if let Err(err) = cli::run(args).await {
        eprintln!("✗ {}", err.message);
        std::process::exit(err.exit_code());
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=hma=trace` - Show trace for hma crates only
/// - Default: INFO, DEBUG for hma crates
///
/// Logs go to stderr; stdout carries documents and listings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hma=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
