//! Add command implementation

use colored::Colorize;
use dnd_core::{List, RestrictionKind, search};

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive;

/// Add each comma separated item to the kind's list.
///
/// Application items are resolved against installed applications first
/// unless `exact` is set.
pub fn run_add(ctx: &Context, kind: RestrictionKind, items: &str, exact: bool) -> Result<()> {
    let items = List::new(items).items();
    if items.is_empty() {
        return Err(CliError::user("no items specified"));
    }

    let mut config = ctx.load_config()?;
    let mut processed = 0;

    for item in items {
        let value = if kind == RestrictionKind::Application && !exact {
            let matches = search::search(&search::default_roots(), &item);
            match interactive::choose_application(&item, &matches)? {
                Some(choice) => choice,
                None => {
                    println!("{} {}", "Skipped".yellow(), item);
                    continue;
                }
            }
        } else {
            item
        };

        config.add(kind, &value);
        println!("{} {} {}", "+".green(), kind, value);
        processed += 1;
    }

    if processed > 0 {
        ctx.save_config(&mut config)?;
    }
    println!("processed {} items", processed);
    Ok(())
}
