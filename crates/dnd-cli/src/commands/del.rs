//! Del command implementation

use colored::Colorize;
use dnd_core::RestrictionKind;

use crate::context::Context;
use crate::error::Result;

/// Remove every occurrence of `item` from the kind's list.
pub fn run_del(ctx: &Context, kind: RestrictionKind, item: &str) -> Result<()> {
    let mut config = ctx.load_config()?;
    let removed = config.remove(kind, item);

    if removed > 0 {
        ctx.save_config(&mut config)?;
        println!("{} {} {}", "-".red(), kind, item.trim());
    }
    println!("processed {} items", removed);
    Ok(())
}
