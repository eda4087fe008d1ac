//! Atomic I/O operations
//!
//! Every file dnd owns (the hosts file, agent definitions, its own config) is
//! replaced with write-to-temp-then-rename so that no reader ever observes a
//! half-written file, even across a crash.

use std::fs;
use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;

use crate::{Error, Result};

/// Write `content` to `path` with all-or-nothing visibility.
///
/// A fresh temporary file is created next to the target (same directory, so
/// the final rename never crosses filesystems), given the permission bits in
/// `mode`, filled, flushed to durable storage and closed. Only then is it
/// renamed onto `path`. If any step fails the temporary file is removed and
/// the target is left untouched.
///
/// Missing parent directories are created.
#[cfg(unix)]
pub fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    write_atomic_with(path, content, mode, |from, to| fs::rename(from, to))
}

/// Platforms without an atomic rename-over fail fast instead of falling back
/// to an in-place write.
#[cfg(not(unix))]
pub fn write_atomic(path: &Path, _content: &[u8], _mode: u32) -> Result<()> {
    Err(Error::Unsupported {
        operation: "atomic write",
        path: path.to_path_buf(),
    })
}

#[cfg(unix)]
fn write_atomic_with<F>(path: &Path, content: &[u8], mode: u32, rename: F) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> std::io::Result<()>,
{
    use std::fs::{OpenOptions, Permissions};
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

    let temp = TempFile::new(path)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(&temp.path)
        .map_err(|e| Error::io(&temp.path, e))?;

    file.set_permissions(Permissions::from_mode(mode))
        .map_err(|e| Error::io(&temp.path, e))?;

    file.write_all(content)
        .map_err(|e| Error::io(&temp.path, e))?;

    file.sync_all().map_err(|e| Error::io(&temp.path, e))?;
    drop(file);

    rename(&temp.path, path).map_err(|e| Error::io(path, e))?;
    temp.persisted();

    tracing::debug!(path = %path.display(), bytes = content.len(), "Atomically wrote file");
    Ok(())
}

/// Temporary sibling of a target path, removed on drop unless persisted.
#[cfg(unix)]
struct TempFile {
    path: PathBuf,
    armed: bool,
}

#[cfg(unix)]
impl TempFile {
    fn new(target: &Path) -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};

        static SEQUENCE: AtomicU64 = AtomicU64::new(0);

        let name = target.file_name().ok_or_else(|| {
            Error::io(
                target,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;

        let temp_name = format!(
            ".{}.{}.{}.tmp",
            name.to_string_lossy(),
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );

        Ok(Self {
            path: target.with_file_name(temp_name),
            armed: true,
        })
    }

    fn persisted(mut self) {
        self.armed = false;
    }
}

#[cfg(unix)]
impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed && fs::remove_file(&self.path).is_ok() {
            tracing::debug!(path = %self.path.display(), "Removed temporary file");
        }
    }
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}
