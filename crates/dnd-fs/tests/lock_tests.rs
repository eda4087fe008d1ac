use dnd_fs::{Error, LockGuard};
use tempfile::tempdir;

#[test]
fn second_lock_fails_while_first_is_held() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".lock");

    let first = LockGuard::acquire(&path).unwrap();
    let second = LockGuard::acquire(&path);

    assert!(matches!(second, Err(Error::LockFailed { .. })));
    assert_eq!(first.path(), path.as_path());
}

#[test]
fn lock_is_released_on_drop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join(".lock");

    {
        let _guard = LockGuard::acquire(&path).unwrap();
    }

    assert!(LockGuard::acquire(&path).is_ok());
}
