//! clipabit-install - ClipABit plugin installer CLI

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use clipabit_cli::cmd;
use clipabit_cli::{Cli, Commands};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Double-clicking the installer runs a plain install.
    match cli.command.unwrap_or(Commands::Install) {
        Commands::Install => cmd::install::install(cli.dry_run, cli.quiet),
        Commands::Check => cmd::check::check(cli.quiet),
    }
}
