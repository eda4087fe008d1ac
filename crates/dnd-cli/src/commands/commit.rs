//! Commit command implementation
//!
//! Diffs every kind, asks for confirmation and applies the changes while
//! holding the commit lock.

use colored::Colorize;
use dnd_core::RestrictionKind;
use dnd_fs::LockGuard;

use super::diff::{print_diff, print_diff_error};
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive;

pub fn run_commit(ctx: &Context, yes: bool) -> Result<()> {
    let _lock = LockGuard::acquire(&ctx.paths.lock_file())?;

    let mut config = ctx.load_config()?;
    let engine = ctx.engine()?;
    let mut failed = 0;

    for kind in RestrictionKind::ALL {
        let result = match engine.diff(kind, &config.list(kind)) {
            Ok(result) => result,
            Err(e) => {
                print_diff_error(kind, &e);
                if !e.is_not_implemented() {
                    failed += 1;
                }
                continue;
            }
        };
        print_diff(&result);

        if !result.has_changes() {
            continue;
        }
        if !yes && !interactive::confirm_commit(kind)? {
            println!("aborting...");
            continue;
        }

        match engine.commit(&result) {
            Ok(report) => {
                for action in &report.actions {
                    println!("   {} {}", "✓".green(), action);
                }
                println!("{} {} change(s) applied", "OK".green().bold(), report.committed);
            }
            Err(e) if e.is_partial_commit() => {
                println!("{} {}", "WARN".yellow().bold(), e);
                println!("Re-run {} to retry the failed entries.", "dnd commit".cyan());
                failed += 1;
            }
            Err(e) => {
                println!("{} failed to commit: {}", "ERROR".red().bold(), e);
                failed += 1;
            }
        }
    }

    config.mark_committed();
    ctx.save_config(&mut config)?;

    if failed > 0 {
        return Err(CliError::user(format!(
            "{} restriction kind(s) did not commit cleanly",
            failed
        )));
    }
    Ok(())
}
