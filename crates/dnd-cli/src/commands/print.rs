//! Print command implementation

use colored::Colorize;
use dnd_core::RestrictionKind;

use crate::context::Context;
use crate::error::Result;

pub fn run_print(ctx: &Context, json: bool) -> Result<()> {
    let config = ctx.load_config()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Config".blue().bold(),
        ctx.paths.config_file().display().to_string().yellow()
    );
    println!("   version {}", config.version);
    match &config.last_committed {
        Some(snapshot) => println!("   last committed at version {}", snapshot.version),
        None => println!("   never committed"),
    }
    println!();

    for kind in RestrictionKind::ALL {
        let items = config.list(kind).items();
        println!("{}s [{}]", kind.to_string().bold(), items.len());
        for item in items {
            println!("   {}", item);
        }
    }
    Ok(())
}
