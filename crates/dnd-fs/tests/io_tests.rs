use dnd_fs::{read_bytes, read_text, write_atomic};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hosts");

    write_atomic(&path, b"127.0.0.1 localhost\n", 0o644).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "127.0.0.1 localhost\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hosts");
    fs::write(&path, "original").unwrap();

    write_atomic(&path, b"updated", 0o644).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Library").join("LaunchAgents").join("agent.plist");

    write_atomic(&path, b"<plist/>", 0o644).unwrap();

    assert_eq!(read_text(&path).unwrap(), "<plist/>");
}

#[test]
fn test_write_atomic_empty_payload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty");

    write_atomic(&path, b"", 0o644).unwrap();

    assert!(read_bytes(&path).unwrap().is_empty());
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hosts");

    for i in 0..5 {
        write_atomic(&path, format!("write {}", i).as_bytes(), 0o644).unwrap();
    }

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["hosts".to_string()]);
    assert_eq!(read_text(&path).unwrap(), "write 4");
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let result = read_text(&temp.path().join("missing"));

    let err = result.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing"));
}
