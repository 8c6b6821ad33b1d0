//! Render and check commands
//!
//! Both load declarations, validate every rule, and assemble the document.
//! Any invalid rule aborts the run before anything is written.

use std::path::{Path, PathBuf};

use colored::Colorize;
use hba_core::{Assembler, DriftStatus, Fragment, TargetConfig, WriteOutcome, load_declarations};

use crate::error::{CliError, Result};

struct Prepared {
    target: TargetConfig,
    fragments: Vec<Fragment>,
}

fn prepare(declarations: &Path) -> Result<Prepared> {
    let loaded = load_declarations(declarations)?;
    let registry = loaded.to_registry()?;
    tracing::debug!(rules = registry.len(), "validated declarations");

    Ok(Prepared {
        target: loaded.target(),
        fragments: registry.fragments(),
    })
}

fn output_path(cli_output: Option<&Path>, target: &TargetConfig) -> Option<PathBuf> {
    cli_output
        .map(Path::to_path_buf)
        .or_else(|| target.path.clone())
}

/// Run the render command
pub fn run_render(declarations: &Path, output: Option<&Path>, dry_run: bool) -> Result<()> {
    let prepared = prepare(declarations)?;
    let assembler = Assembler::new(prepared.target.assembly_options());

    let path = match output_path(output, &prepared.target) {
        Some(path) if !dry_run => path,
        _ => {
            print!("{}", assembler.assemble(&prepared.fragments)?);
            return Ok(());
        }
    };

    match assembler.write(&prepared.fragments, &path)? {
        WriteOutcome::Written => println!(
            "{} Wrote {} rule(s) to {}",
            "OK".green().bold(),
            prepared.fragments.len(),
            path.display()
        ),
        WriteOutcome::Unchanged => println!(
            "{} {} is up to date",
            "OK".green().bold(),
            path.display()
        ),
    }
    Ok(())
}

/// Run the check command
///
/// Succeeds when every rule is valid, the rules assemble into a document,
/// and, if an output path is known, the file on disk matches it.
pub fn run_check(declarations: &Path, output: Option<&Path>) -> Result<()> {
    let prepared = prepare(declarations)?;
    let assembler = Assembler::new(prepared.target.assembly_options());
    assembler.assemble(&prepared.fragments)?;
    println!(
        "{} {} rule(s) valid",
        "OK".green().bold(),
        prepared.fragments.len()
    );

    let Some(path) = output_path(output, &prepared.target) else {
        return Ok(());
    };

    match assembler.check(&prepared.fragments, &path)? {
        DriftStatus::InSync => {
            println!("{} {} is up to date", "OK".green().bold(), path.display());
            Ok(())
        }
        DriftStatus::Missing => Err(CliError::user(format!(
            "{} does not exist",
            path.display()
        ))),
        DriftStatus::Drifted { expected, actual } => {
            tracing::debug!(%expected, %actual, "checksum mismatch");
            Err(CliError::user(format!(
                "{} has drifted from its declarations",
                path.display()
            )))
        }
    }
}
