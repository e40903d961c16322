//! directory-pager CLI
//!
//! Command-line interface for streaming directory users

use clap::Parser;
use directory_pager::cli::{Cli, Runner};
use tracing::Level;

/// Exit status for a listing stopped by Ctrl-C
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only records
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        let code = if e.is_cancelled() { EXIT_CANCELLED } else { 1 };
        std::process::exit(code);
    }
}
