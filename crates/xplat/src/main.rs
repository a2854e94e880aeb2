//! xplat CLI tool

use anyhow::Result;
use clap::Parser;
use tracing::Level;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose, cli.quiet);

    // Execute the command
    let result = match &cli.command {
        Commands::Rename(args) => rename_files(args),
    };

    if let Err(e) = result {
        match xplat::errors::suggestion_for(&e) {
            Some(suggestion) => {
                xplat::errors::print_error_with_suggestion("Rename failed", &e, suggestion)
            }
            None => xplat::errors::print_error("Rename failed", &e),
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for the report
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, _) => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}
