//! pgbouncer-hba CLI
//!
//! Validates access-rule declarations and assembles pgbouncer auth files.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

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
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} auth file generator", "pgbouncer-hba".green().bold());
            println!();
            println!("Run {} for available commands.", "pgbouncer-hba --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render {
            declarations,
            output,
            dry_run,
        } => commands::run_render(&declarations, output.as_deref(), dry_run),
        Commands::Check {
            declarations,
            output,
        } => commands::run_check(&declarations, output.as_deref()),
        Commands::Line {
            connection_type,
            database,
            user,
            address,
            auth_method,
            order,
            json,
        } => commands::run_line(
            commands::LineArgs {
                connection_type,
                database,
                user,
                address,
                auth_method,
                order,
            },
            json,
        ),
    }
}
