//! File locking utilities for safe concurrent access
//!
//! Provides locked read/write operations using `fs2` advisory locks so that
//! two labnote invocations editing the same README or catalog do not corrupt
//! each other. Advisory locks are cooperative - all participants must use
//! these functions for the locking to be effective.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Read file contents with a shared (read) lock.
pub fn locked_read(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    file.lock_shared()
        .with_context(|| format!("Failed to acquire shared lock: {}", path.display()))?;
    let mut content = String::new();
    BufReader::new(&file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(content)
}

/// Write file contents with an exclusive (write) lock.
///
/// The file is truncated only after the exclusive lock is held, so a
/// concurrent reader can never observe a half-written document.
pub fn locked_write(path: &Path, content: &str) -> Result<()> {
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;
    file.set_len(0)
        .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
    let mut writer = BufWriter::new(&file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}

/// Hold an exclusive advisory lock on a marker file for the lifetime of the
/// returned guard. Used to serialize renumbering transactions per directory.
pub struct DirLock {
    _file: File,
}

impl DirLock {
    /// Acquire an exclusive lock on `<dir>/<name>`, blocking until available.
    pub fn acquire(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(name);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open lock file: {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to acquire directory lock: {}", path.display()))?;
        Ok(Self { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_locked_write_and_read() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("note.md");

        locked_write(&path, "## Reagent").unwrap();
        assert_eq!(locked_read(&path).unwrap(), "## Reagent");
    }

    #[test]
    fn test_locked_write_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("note.md");

        locked_write(&path, "first revision of the note").unwrap();
        locked_write(&path, "second").unwrap();
        assert_eq!(locked_read(&path).unwrap(), "second");
    }

    #[test]
    fn test_concurrent_write_safety() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("concurrent.md");

        locked_write(&path, "initial").unwrap();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let path = path.clone();
                thread::spawn(move || {
                    locked_write(&path, &format!("writer {i}")).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(locked_read(&path).unwrap().starts_with("writer "));
    }

    #[test]
    fn test_dir_lock_creates_marker() {
        let temp = tempfile::tempdir().unwrap();
        {
            let _guard = DirLock::acquire(temp.path(), ".renumber.lock").unwrap();
            assert!(temp.path().join(".renumber.lock").exists());
        }
        // Lock released on drop; a second acquisition succeeds
        let _guard = DirLock::acquire(temp.path(), ".renumber.lock").unwrap();
    }
}
