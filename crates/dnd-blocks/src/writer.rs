//! Block writing for marker-delimited regions.
//!
//! Blocks are handled as literal text, as produced by [`Block::text`]:
//! insertion appends it and removal excises the first exact occurrence.
//!
//! [`Block::text`]: crate::parser::Block::text

use crate::error::{Error, Result};

/// Appends a rendered block to the end of the content.
///
/// If the content does not end in a newline one is inserted first, so the
/// opening marker always starts its own line.
///
/// # Example
/// ```
/// use dnd_blocks::writer::insert_block;
///
/// let result = insert_block("127.0.0.1 localhost", "#dnd01\n#dnd01\n");
/// assert_eq!(result, "127.0.0.1 localhost\n#dnd01\n#dnd01\n");
/// ```
pub fn insert_block(content: &str, block: &str) -> String {
    let mut result = String::with_capacity(content.len() + block.len() + 1);
    result.push_str(content);
    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
    result.push_str(block);
    result
}

/// Removes the first exact occurrence of a rendered block from the content.
///
/// # Errors
/// Returns `Error::BlockNotFound` if the block text does not occur.
///
/// # Example
/// ```
/// use dnd_blocks::writer::remove_block;
///
/// let content = "before\n#dnd01\n127.0.0.1 a.com\n#dnd01\nafter\n";
/// let result = remove_block(content, "#dnd01\n127.0.0.1 a.com\n#dnd01\n").unwrap();
/// assert_eq!(result, "before\nafter\n");
/// ```
pub fn remove_block(content: &str, block: &str) -> Result<String> {
    let Some(start) = content.find(block).filter(|_| !block.is_empty()) else {
        return Err(Error::BlockNotFound {
            marker: block.lines().next().unwrap_or_default().to_string(),
        });
    };

    let mut result = String::with_capacity(content.len() - block.len());
    result.push_str(&content[..start]);
    result.push_str(&content[start + block.len()..]);
    Ok(result)
}
