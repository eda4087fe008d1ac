//! Integration tests for block rendering, insertion and removal.

use dnd_blocks::{Block, Error, insert_block, parse_blocks, remove_block};
use pretty_assertions::assert_eq;

#[test]
fn test_insert_then_parse_round_trip() {
    let block = Block::new("#dnd01", &["127.0.0.1 example.com"]).text();
    let content = insert_block("127.0.0.1 localhost\n", &block);

    assert_eq!(
        content,
        "127.0.0.1 localhost\n#dnd01\n127.0.0.1 example.com\n#dnd01\n"
    );

    let blocks = parse_blocks(&content, "#dnd");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), block);
}

#[test]
fn test_insert_separates_unterminated_last_line() {
    let block = Block::new("#dnd01", &["127.0.0.1 example.com"]).text();
    let content = insert_block("127.0.0.1 localhost", &block);

    assert!(content.starts_with("127.0.0.1 localhost\n#dnd01\n"));
}

#[test]
fn test_remove_keeps_surrounding_content() {
    let old = Block::new("#dnd01", &["127.0.0.1 old.com"]).text();
    let content = format!("127.0.0.1 localhost\n{}# trailing comment\n", old);

    let result = remove_block(&content, &old).unwrap();

    assert_eq!(result, "127.0.0.1 localhost\n# trailing comment\n");
}

#[test]
fn test_remove_edited_block_is_not_found() {
    let rendered = Block::new("#dnd01", &["127.0.0.1 old.com"]).text();
    let content = "#dnd01\n127.0.0.1   old.com\n#dnd01\n";

    let result = remove_block(content, &rendered);

    assert!(matches!(result, Err(Error::BlockNotFound { .. })));
}

#[test]
fn test_remove_then_insert_replaces_block() {
    let old = Block::new("#dnd01", &["127.0.0.1 old.com"]).text();
    let new = Block::new("#dnd02", &["127.0.0.1 new.com"]).text();
    let content = format!("127.0.0.1 localhost\n{}", old);

    let content = remove_block(&content, &old).unwrap();
    let content = insert_block(&content, &new);

    assert_eq!(content, format!("127.0.0.1 localhost\n{}", new));
}
