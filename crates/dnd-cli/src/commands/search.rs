//! Search command implementation

use colored::Colorize;
use dnd_core::search;

use crate::error::Result;

pub fn run_search(pattern: &str) -> Result<()> {
    let matches = search::search(&search::default_roots(), pattern);

    if matches.is_empty() {
        println!("No matches for {:?}", pattern);
        return Ok(());
    }

    for (i, m) in matches.iter().enumerate() {
        println!(
            "[{}]\t{} | {} {}",
            i + 1,
            m.name.bold(),
            m.dir.display(),
            format!("({})", m.score).dimmed()
        );
    }
    Ok(())
}
