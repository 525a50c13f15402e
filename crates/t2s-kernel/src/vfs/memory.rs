//! In-memory filesystem implementation.
//!
//! Used for tests and fixtures. All data is ephemeral.

use super::traits::{DirEntry, DirEntryKind, Filesystem};
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Entry in the memory filesystem.
#[derive(Debug, Clone)]
enum Entry {
    File { data: Vec<u8> },
    Directory,
}

/// In-memory filesystem.
///
/// Listing order is unspecified, as it is on a real disk.
#[derive(Debug)]
pub struct MemoryFs {
    entries: RwLock<HashMap<PathBuf, Entry>>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create a new empty in-memory filesystem.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        // Root directory always exists
        entries.insert(PathBuf::new(), Entry::Directory);
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Normalize a path: remove leading `/`, resolve `.` and `..`.
    fn normalize(path: &Path) -> PathBuf {
        let mut result = PathBuf::new();
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(s) => result.push(s),
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        result
    }

    /// Ensure all parent directories of `path` exist.
    fn ensure_parents(entries: &mut HashMap<PathBuf, Entry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.parent().into_iter().flat_map(|p| p.components()) {
            if let Component::Normal(s) = component {
                current.push(s);
                entries.entry(current.clone()).or_insert(Entry::Directory);
            }
        }
    }

    fn read_lock(&self) -> io::Result<RwLockReadGuard<'_, HashMap<PathBuf, Entry>>> {
        self.entries
            .read()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))
    }

    fn write_lock(&self) -> io::Result<RwLockWriteGuard<'_, HashMap<PathBuf, Entry>>> {
        self.entries
            .write()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("not found: {}", path.display()),
        )
    }
}

impl Filesystem for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let normalized = Self::normalize(path);
        let entries = self.read_lock()?;

        match entries.get(&normalized) {
            Some(Entry::File { data }) => Ok(data.clone()),
            Some(Entry::Directory) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(Self::not_found(path)),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let normalized = Self::normalize(path);
        let mut entries = self.write_lock()?;

        if let Some(Entry::Directory) = entries.get(&normalized) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            ));
        }

        Self::ensure_parents(&mut entries, &normalized);
        entries.insert(
            normalized,
            Entry::File {
                data: data.to_vec(),
            },
        );
        Ok(())
    }

    fn mkdir(&self, path: &Path) -> io::Result<()> {
        let normalized = Self::normalize(path);
        let mut entries = self.write_lock()?;
        Self::ensure_parents(&mut entries, &normalized);

        match entries.get(&normalized) {
            Some(Entry::Directory) => Ok(()),
            Some(Entry::File { .. }) => Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("file exists: {}", path.display()),
            )),
            None => {
                entries.insert(normalized, Entry::Directory);
                Ok(())
            }
        }
    }

    fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let normalized = Self::normalize(path);
        let entries = self.read_lock()?;

        match entries.get(&normalized) {
            Some(Entry::Directory) => {}
            Some(Entry::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => return Err(Self::not_found(path)),
        }

        let mut result = Vec::new();
        for (entry_path, entry) in entries.iter() {
            if entry_path == &normalized || entry_path.parent() != Some(normalized.as_path()) {
                continue;
            }
            if let Some(name) = entry_path.file_name() {
                let name = name.to_string_lossy().into_owned();
                result.push(match entry {
                    Entry::File { data } => DirEntry::file(name, data.len() as u64),
                    Entry::Directory => DirEntry::directory(name),
                });
            }
        }
        Ok(result)
    }

    fn stat(&self, path: &Path) -> io::Result<DirEntry> {
        let normalized = Self::normalize(path);
        let entries = self.read_lock()?;

        let name = normalized
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "/".to_string());

        match entries.get(&normalized) {
            Some(Entry::File { data }) => Ok(DirEntry::file(name, data.len() as u64)),
            Some(Entry::Directory) => Ok(DirEntry {
                name,
                kind: DirEntryKind::Directory,
                size: 0,
            }),
            None => Err(Self::not_found(path)),
        }
    }
}
