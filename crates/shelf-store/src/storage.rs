//! # Storage Adapter
//!
//! Whole-blob read and write of the inventory file.
//!
//! ## Write Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FileStorage::write_all                           │
//! │                                                                         │
//! │  ATOMIC (default)                    DIRECT                             │
//! │  ────────────────                    ──────                             │
//! │  write inventory.txt.tmp             truncate inventory.txt             │
//! │       │                              write blob                         │
//! │       ▼                                                                 │
//! │  rename over inventory.txt           a crash mid-write leaves a         │
//! │                                      truncated file                     │
//! │  readers see the old file or                                            │
//! │  the new file, never half of it                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Read-all / write-all capability over paths.
///
/// Every failure surfaces as [`StoreError::Io`].
pub trait Storage {
    /// Reads the entire file at `path` as UTF-8 text.
    fn read_all(&self, path: &Path) -> StoreResult<String>;

    /// Replaces the file at `path` with `text`.
    fn write_all(&self, path: &Path, text: &str) -> StoreResult<()>;
}

// =============================================================================
// File Storage
// =============================================================================

/// [`Storage`] backed by the local file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStorage {
    atomic: bool,
}

impl FileStorage {
    /// File storage with atomic (temp file + rename) writes.
    pub const fn atomic() -> Self {
        FileStorage { atomic: true }
    }

    /// File storage that truncates and rewrites the target in place.
    pub const fn direct() -> Self {
        FileStorage { atomic: false }
    }

    /// Returns true if writes go through a temporary file.
    pub const fn is_atomic(&self) -> bool {
        self.atomic
    }

    /// Path of the temporary file used by atomic writes.
    ///
    /// `inventory.txt` → `inventory.txt.tmp`, in the same directory so the
    /// rename never crosses file systems.
    pub fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        FileStorage::atomic()
    }
}

impl Storage for FileStorage {
    fn read_all(&self, path: &Path) -> StoreResult<String> {
        fs::read_to_string(path).map_err(|e| StoreError::io(path, e))
    }

    fn write_all(&self, path: &Path, text: &str) -> StoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        if !self.atomic {
            return fs::write(path, text).map_err(|e| StoreError::io(path, e));
        }

        let tmp = Self::temp_path(path);
        debug!(tmp = %tmp.display(), "Writing inventory via temporary file");

        if let Err(e) = fs::write(&tmp, text) {
            // Best effort: a partial temp file is useless.
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&tmp, e));
        }

        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(path, e)
        })
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process [`Storage`] for tests and dry runs.
///
/// Reading a path that was never written fails with `NotFound`, like a
/// missing file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage holding one file.
    pub fn with_file(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut files) = storage.files.lock() {
            files.insert(path.into(), text.into());
        }
        storage
    }

    /// Returns the current contents of `path`, if written.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().ok()?.get(path).cloned()
    }
}

impl Storage for MemoryStorage {
    fn read_all(&self, path: &Path) -> StoreResult<String> {
        let files = self.files.lock().map_err(|_| StoreError::LockPoisoned)?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::io(path, io::Error::from(io::ErrorKind::NotFound)))
    }

    fn write_all(&self, path: &Path, text: &str) -> StoreResult<()> {
        let mut files = self.files.lock().map_err(|_| StoreError::LockPoisoned)?;
        files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_all(&self, path: &Path) -> StoreResult<String> {
        (**self).read_all(path)
    }

    fn write_all(&self, path: &Path, text: &str) -> StoreResult<()> {
        (**self).write_all(path, text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
