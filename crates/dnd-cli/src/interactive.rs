//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based selection and confirmation.

use dialoguer::{Confirm, Select};
use dnd_core::RestrictionKind;
use dnd_core::search::Match;

use crate::error::Result;

/// Label of the entry that keeps the typed pattern as is.
const RAW_PATTERN: &str = "general purpose pattern match";

/// Ask which installed application `pattern` refers to.
///
/// The last choice keeps the raw pattern. Returns `None` if the prompt was
/// dismissed.
pub fn choose_application(pattern: &str, matches: &[Match]) -> Result<Option<String>> {
    let mut items: Vec<String> = matches.iter().map(|m| m.to_string()).collect();
    items.push(format!("{} | {}", pattern, RAW_PATTERN));

    let selected = Select::new()
        .with_prompt(format!(
            "Found {} matches for {:?}, which one should be killed",
            items.len(),
            pattern
        ))
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selected.map(|idx| match matches.get(idx) {
        Some(m) => m.name.clone(),
        None => pattern.to_string(),
    }))
}

/// Ask whether to commit the shown diff.
pub fn confirm_commit(kind: RestrictionKind) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("Commit {} restrictions?", kind))
        .default(false)
        .interact()?)
}
