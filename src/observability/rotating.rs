//! Size-rotated append-only file.
//!
//! Lines are appended to `<name>.json`. Once the file grows past the policy's
//! size limit it is shifted to `<name>.json.1`, older backups move up by one
//! (`.1` → `.2`, ...), and anything past the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many backups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 5 MB per file, two backups.
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_backups: 2,
        }
    }
}

/// Thread-safe line writer with size-based rotation.
///
/// The file is opened lazily on the first write, so construction never
/// touches the filesystem.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `index`-th backup (1 is the newest).
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Appends `line` plus a newline, rotating first when the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening, writing or flushing, or
    /// an error if a previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        let current_len = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if current_len > self.policy.max_bytes {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.policy.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_policy(max_backups: usize) -> RotationPolicy {
        RotationPolicy {
            max_bytes: 10,
            max_backups,
        }
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("t.json"), RotationPolicy::default());
        file.write_line("one").unwrap();
        file.write_line("two").unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn rotates_past_limit_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("t.json"), small_policy(2));

        for line in ["first-line", "second-line", "third-line", "z"] {
            file.write_line(line).unwrap();
        }

        let backup = |n: usize| fs::read_to_string(dir.path().join(format!("t.json.{n}")));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "z\n");
        assert_eq!(backup(1).unwrap(), "third-line\n");
        assert_eq!(backup(2).unwrap(), "second-line\n");
        assert!(backup(3).is_err());
    }

    #[test]
    fn zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("t.json"), small_policy(0));
        file.write_line("a long first line").unwrap();
        file.write_line("b").unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "b\n");
        assert!(!dir.path().join("t.json.1").exists());
    }
}
