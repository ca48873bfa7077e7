//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and location picking
//! - Human-friendly output formatting
//! - Starting the HTTP service

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod picker;
mod render;

/// Filter used when `RUST_LOG` is unset. One-shot commands print to stdout,
/// so they only log warnings unless asked.
fn default_filter(verbose: bool, serving: bool) -> &'static str {
    match (verbose, serving) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    }
}

fn init_tracing(verbose: bool, serving: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, serving)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose, matches!(cmd.command, cli::Command::Serve { .. }));
    cmd.run().await
}
