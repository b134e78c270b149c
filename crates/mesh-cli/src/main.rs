//! meshsync configuration CLI
//!
//! Thin front end over `mesh-config`: every command resolves a config location
//! and a local device identity, then runs one library operation.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.target),
        None => {
            println!("{} meshsync configuration tool", "meshcfg".green().bold());
            println!();
            println!("Run {} for available commands.", "meshcfg --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, target: &cli::Target) -> Result<()> {
    match cmd {
        Commands::DeviceId => commands::run_device_id(target),
        Commands::Init { force } => commands::run_init(&Context::resolve(target)?, force),
        Commands::Check => commands::run_check(&Context::resolve(target)?),
        Commands::Migrate => commands::run_migrate(&Context::resolve(target)?),
        Commands::Diff { other, json } => {
            commands::run_diff(&Context::resolve(target)?, &other, json)
        }
    }
}
