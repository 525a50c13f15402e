//! Local filesystem backend.
//!
//! Exposes the directory tree under the suite root, with optional
//! read-only mode for static checks.

use super::traits::{DirEntry, DirEntryKind, Filesystem};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Local filesystem backend.
///
/// All operations are relative to `root`. For example, if `root` is
/// `/srv/checks`, then `read("tests/a.t2s")` reads `/srv/checks/tests/a.t2s`.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
    read_only: bool,
}

impl LocalFs {
    /// Create a new local filesystem rooted at the given path.
    ///
    /// A relative root is made absolute against the current directory so
    /// that error messages always carry absolute paths.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            read_only: false,
        }
    }

    /// Create a read-only local filesystem.
    pub fn read_only(root: impl Into<PathBuf>) -> Self {
        let mut fs = Self::new(root);
        fs.read_only = true;
        fs
    }

    /// Get the root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path to a path within the root.
    ///
    /// Normalizes `.` and `..` without touching the disk; a path that would
    /// climb above the root is rejected.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let path = path.strip_prefix("/").unwrap_or(path);

        let mut normalized = self.root.clone();
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    if normalized == self.root {
                        return Err(io::Error::new(
                            io::ErrorKind::PermissionDenied,
                            format!("path escapes root: {}", path.display()),
                        ));
                    }
                    normalized.pop();
                }
                Component::Normal(c) => normalized.push(c),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        Ok(normalized)
    }

    /// Check if write operations are allowed.
    fn check_writable(&self) -> io::Result<()> {
        if self.read_only {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "filesystem is read-only",
            ))
        } else {
            Ok(())
        }
    }

    fn kind_of(meta: &fs::Metadata) -> DirEntryKind {
        if meta.is_dir() {
            DirEntryKind::Directory
        } else {
            DirEntryKind::File
        }
    }
}

impl Filesystem for LocalFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let full_path = self.resolve(path)?;
        fs::read(&full_path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        self.check_writable()?;
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)
    }

    fn mkdir(&self, path: &Path) -> io::Result<()> {
        self.check_writable()?;
        fs::create_dir_all(self.resolve(path)?)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let full_path = self.resolve(path)?;
        let mut entries = Vec::new();

        for entry in fs::read_dir(&full_path)? {
            let entry = entry?;
            // Follows symlinks, so a linked scenario directory counts as a directory.
            let meta = fs::metadata(entry.path())?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: Self::kind_of(&meta),
                size: meta.len(),
            });
        }

        Ok(entries)
    }

    fn stat(&self, path: &Path) -> io::Result<DirEntry> {
        let full_path = self.resolve(path)?;
        let meta = fs::metadata(&full_path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "/".to_string());

        Ok(DirEntry {
            name,
            kind: Self::kind_of(&meta),
            size: meta.len(),
        })
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        self.resolve(path).unwrap_or_else(|_| self.root.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, LocalFs) {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFs::new(dir.path());
        (dir, fs)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, fs) = setup();
        fs.write(Path::new("a.t2s"), b"open x").unwrap();
        assert_eq!(fs.read(Path::new("a.t2s")).unwrap(), b"open x");
    }

    #[test]
    fn test_nested_write_creates_parents() {
        let (dir, fs) = setup();
        fs.write(Path::new("tests/sub/a.t2s"), b"click").unwrap();
        assert!(dir.path().join("tests/sub/a.t2s").is_file());
    }

    #[test]
    fn test_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFs::read_only(dir.path());
        let err = fs.write(Path::new("x"), b"data").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_list_and_stat() {
        let (_dir, fs) = setup();
        fs.write(Path::new("tests/a.t2s"), b"").unwrap();
        fs.write(Path::new("tests/methods/m.t2s"), b"").unwrap();

        let mut entries = fs.list(Path::new("tests")).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_file());
        assert_eq!(entries[1].name, "methods");
        assert!(entries[1].is_dir());

        assert!(fs.stat(Path::new("tests")).unwrap().is_dir());
        assert!(!fs.exists(Path::new("nope")));
    }

    #[test]
    fn test_path_escape_blocked() {
        let (_dir, fs) = setup();
        let err = fs.read(Path::new("../etc/passwd")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_absolute_is_under_root() {
        let (dir, fs) = setup();
        let abs = fs.absolute(Path::new("tests/a.t2s"));
        assert!(abs.is_absolute());
        assert!(abs.starts_with(dir.path()));
        assert!(abs.ends_with("tests/a.t2s"));
    }
}
