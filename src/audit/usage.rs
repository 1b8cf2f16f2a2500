//! Usage counting and the audit limit.
//!
//! The count survives between runs when file-backed. A store that cannot be
//! read counts as zero; a failed write is logged and otherwise ignored.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{Error, Result};

/// Number of audits allowed per user.
pub const DEFAULT_USAGE_LIMIT: u32 = 2;

/// Persistent count of completed audits.
pub trait UsageCounter: Send + Sync {
    /// Number of audits completed so far.
    fn current_count(&self) -> u32;

    /// Record one more completed audit, returning the new count.
    fn increment(&self) -> Result<u32>;

    /// Reset the count to zero.
    fn reset(&self) -> Result<()>;
}

/// In-process counter, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryUsage {
    count: AtomicU32,
}

impl MemoryUsage {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter starting at `count`.
    pub fn with_count(count: u32) -> Self {
        Self {
            count: AtomicU32::new(count),
        }
    }
}

impl UsageCounter for MemoryUsage {
    fn current_count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    fn increment(&self) -> Result<u32> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst).saturating_add(1))
    }

    fn reset(&self) -> Result<()> {
        self.count.store(0, Ordering::SeqCst);
        Ok(())
    }
}

/// Counter stored as a decimal number in a small text file.
#[derive(Debug, Clone)]
pub struct FileUsage {
    path: PathBuf,
}

impl FileUsage {
    /// Use the store at `path`. The file is created on first increment.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u32> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        raw.trim()
            .parse::<u32>()
            .map_err(|e| Error::Other(format!("Corrupt usage store '{}': {}", raw.trim(), e)))
    }

    fn write(&self, count: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, count.to_string())?;
        Ok(())
    }
}

impl UsageCounter for FileUsage {
    fn current_count(&self) -> u32 {
        match self.read() {
            Ok(count) => count,
            Err(e) => {
                log::warn!(
                    "Failed to read usage count from {}: {}",
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    fn increment(&self) -> Result<u32> {
        let next = self.current_count().saturating_add(1);
        self.write(next)?;
        log::debug!("Usage count is now {}", next);
        Ok(next)
    }

    fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Pass/fail decision for starting another audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageGate {
    limit: u32,
}

impl UsageGate {
    /// Gate allowing `limit` audits.
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    /// Maximum number of audits.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Check if another audit may start after `used` audits.
    pub fn allows(&self, used: u32) -> bool {
        used < self.limit
    }

    /// Audits left after `used`.
    pub fn remaining(&self, used: u32) -> u32 {
        self.limit.saturating_sub(used)
    }

    /// Fail with `UsageLimitReached` once the limit is used up.
    pub fn check(&self, used: u32) -> Result<()> {
        if self.allows(used) {
            Ok(())
        } else {
            Err(Error::UsageLimitReached {
                used,
                limit: self.limit,
            })
        }
    }
}

impl Default for UsageGate {
    fn default() -> Self {
        Self::new(DEFAULT_USAGE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_usage() {
        let usage = MemoryUsage::new();
        assert_eq!(usage.current_count(), 0);
        assert_eq!(usage.increment().unwrap(), 1);
        assert_eq!(usage.increment().unwrap(), 2);
        usage.reset().unwrap();
        assert_eq!(usage.current_count(), 0);
    }

    #[test]
    fn test_gate() {
        let gate = UsageGate::default();
        assert_eq!(gate.limit(), 2);
        assert!(gate.check(0).is_ok());
        assert!(gate.check(1).is_ok());
        assert!(matches!(
            gate.check(2),
            Err(Error::UsageLimitReached { used: 2, limit: 2 })
        ));
        assert_eq!(gate.remaining(5), 0);
        assert!(!UsageGate::new(0).allows(0));
    }

    #[test]
    fn test_file_usage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let usage = FileUsage::new(dir.path().join("nested").join("usage"));

        assert_eq!(usage.current_count(), 0);
        assert_eq!(usage.increment().unwrap(), 1);
        assert_eq!(usage.increment().unwrap(), 2);
        assert_eq!(FileUsage::new(usage.path()).current_count(), 2);

        usage.reset().unwrap();
        assert_eq!(usage.current_count(), 0);
        usage.reset().unwrap();
    }

    #[test]
    fn test_corrupt_store_counts_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage");
        fs::write(&path, "not a number").unwrap();

        let usage = FileUsage::new(&path);
        assert_eq!(usage.current_count(), 0);
        assert_eq!(usage.increment().unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1");
    }
}
