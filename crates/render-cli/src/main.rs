//! Config renderer CLI
//!
//! Renders deployment-managed configuration files and keeps their targets
//! in sync.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up logging: {}", e)))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} deployment config renderer", "render".green().bold());
            println!();
            println!("Run {} for available commands.", "render --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render {
            source,
            output,
            mode,
        } => commands::run_render(&source, output.as_deref(), mode),
        Commands::Check {
            source,
            target,
            mode,
        } => commands::run_check(&source, &target, mode),
        Commands::Diff {
            source,
            target,
            mode,
            json,
        } => commands::run_diff(&source, &target, mode, json),
        Commands::Placeholders { template, json } => commands::run_placeholders(&template, json),
        Commands::Apply {
            manifest,
            set,
            dry_run,
            json,
        } => commands::run_apply(&manifest, &set, dry_run, json),
        Commands::Postfixadmin {
            settings,
            target,
            doveadm,
            mode,
            dry_run,
        } => commands::run_postfixadmin(&settings, &target, doveadm.as_deref(), mode, dry_run),
    }
}
