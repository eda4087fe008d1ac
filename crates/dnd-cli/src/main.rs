//! dnd (do not disturb) CLI
//!
//! Manages the configured restriction lists and reconciles them with the
//! hosts file and the per-user launch agents.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    execute_command(cli.command, cli.hosts_file)
}

fn execute_command(cmd: Commands, hosts_file: Option<PathBuf>) -> Result<()> {
    match cmd {
        Commands::Types => {
            commands::run_types();
            Ok(())
        }
        Commands::Search { pattern } => commands::run_search(&pattern),
        Commands::Add { kind, items, exact } => {
            commands::run_add(&Context::detect(hosts_file)?, kind, &items, exact)
        }
        Commands::Del { kind, item } => commands::run_del(&Context::detect(hosts_file)?, kind, &item),
        Commands::Print { json } => commands::run_print(&Context::detect(hosts_file)?, json),
        Commands::Diff => commands::run_diff(&Context::detect(hosts_file)?),
        Commands::Commit { yes } => commands::run_commit(&Context::detect(hosts_file)?, yes),
    }
}
