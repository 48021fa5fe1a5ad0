#![allow(clippy::multiple_crate_versions)]

//! `ModMove` binary.
//!
//! Without a subcommand this starts the background agent; see `modmove --help`
//! for the configuration and diagnostics commands.

use clap::Parser;
use modmove_lib::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute() {
        eprintln!("modmove: {err}");
        std::process::exit(1);
    }
}
