//! `guacman` CLI - Command-line interface for Guacamole administration
//!
//! Provides commands for inspecting the connection group tree, users and
//! protocols visible to the configured account, creating users and showing
//! the data edit forms are opened with.

mod cli;
mod commands;
mod error;
mod format;
mod surface;
mod util;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = commands::dispatch(&cli.global, cli.command);

    if let Err(e) = result {
        if !cli.global.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
