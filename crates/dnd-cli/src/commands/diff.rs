//! Diff command implementation
//!
//! Shows what commit would change for every kind without applying it.

use colored::Colorize;
use dnd_core::{DiffResult, Error, RestrictionKind};

use crate::context::Context;
use crate::error::Result;

pub fn run_diff(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let engine = ctx.engine()?;

    for kind in RestrictionKind::ALL {
        match engine.diff(kind, &config.list(kind)) {
            Ok(result) => print_diff(&result),
            Err(e) => print_diff_error(kind, &e),
        }
    }
    Ok(())
}

/// Print the three buckets of a diff, plus any partial-sync warning.
pub fn print_diff(result: &DiffResult) {
    if let Some(warning) = result.partial_sync() {
        println!("{} {}", "WARN".yellow().bold(), warning);
    }

    let summary = result.summary();
    println!("{}", format!("{}s:", summary.kind).bold());

    println!("{} matched [{}]", "~".blue(), summary.matched.len());
    for entry in &summary.matched {
        println!("\t{}", entry);
    }
    println!("{} add [{}]", "+".green(), summary.missing.len());
    for entry in &summary.missing {
        println!("\t{}", entry.green());
    }
    println!("{} delete [{}]", "-".red(), summary.delete.len());
    for entry in &summary.delete {
        println!("\t{}", entry.red());
    }
}

/// Report a diff that could not be computed.
pub fn print_diff_error(kind: RestrictionKind, error: &Error) {
    if error.is_not_implemented() {
        println!("{} {}s: {}", "SKIP".yellow().bold(), kind, error);
    } else {
        println!(
            "{} failed to determine difference between actual and desired state: {}",
            "ERROR".red().bold(),
            error
        );
    }
}
