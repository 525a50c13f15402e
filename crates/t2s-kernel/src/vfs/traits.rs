//! Core VFS traits and types.

use std::io;
use std::path::{Path, PathBuf};

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirEntryKind {
    File,
    Directory,
}

/// A directory entry as returned by `list()` and `stat()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    /// Kind of entry.
    pub kind: DirEntryKind,
    /// Size in bytes (0 for directories).
    pub size: u64,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DirEntryKind::Directory,
            size: 0,
        }
    }

    /// Create a new file entry.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: DirEntryKind::File,
            size,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == DirEntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == DirEntryKind::File
    }
}

/// Abstract filesystem interface.
///
/// All operations use paths relative to the filesystem root.
/// For example, if a `LocalFs` is rooted at `/srv/checks`,
/// then `read("tests/login.t2s")` reads `/srv/checks/tests/login.t2s`.
pub trait Filesystem: Send + Sync {
    /// Read the entire contents of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write data to a file, creating it if it doesn't exist.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Create a directory and any missing parents.
    fn mkdir(&self, path: &Path) -> io::Result<()>;

    /// List the immediate entries of a directory.
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Get metadata for a file or directory.
    fn stat(&self, path: &Path) -> io::Result<DirEntry>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool {
        self.stat(path).is_ok()
    }

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let data = self.read(path)?;
        String::from_utf8(data).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not valid UTF-8: {e}", path.display()),
            )
        })
    }

    /// Absolute form of `path`, used when reporting errors.
    ///
    /// Virtual backends report the path as if mounted at `/`.
    fn absolute(&self, path: &Path) -> PathBuf {
        Path::new("/").join(path)
    }
}
