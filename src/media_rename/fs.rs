//! Filesystem access used by the mapping builder and the rename executor.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Filesystem operations needed for building and applying renames.
pub trait FileSystem {
    /// List all entries under `root`, excluding `root` itself, in enumeration order.
    fn list_entries(&self, root: &Path, recursive: bool) -> Vec<PathBuf>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Check if both paths point to the same entry, such as `a.mkv` and `A.mkv`
    /// on a case-insensitive filesystem.
    fn is_same_entry(&self, a: &Path, b: &Path) -> bool {
        a == b
    }

    /// Move a file to a new path.
    ///
    /// # Errors
    /// Returns an error if the move fails.
    fn move_file(&mut self, from: &Path, to: &Path) -> io::Result<()>;

    /// Move a directory and all of its contents to a new path.
    ///
    /// # Errors
    /// Returns an error if the move fails.
    fn move_dir(&mut self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_entries(&self, root: &Path, recursive: bool) -> Vec<PathBuf> {
        let max_depth = if recursive { usize::MAX } else { 1 };
        WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.into_path()),
                Err(error) => {
                    crate::print_warning!("Skipping unreadable entry: {error}");
                    None
                }
            })
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[cfg(unix)]
    fn is_same_entry(&self, a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;

        match (std::fs::metadata(a), std::fs::metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn is_same_entry(&self, a: &Path, b: &Path) -> bool {
        a.exists() && crate::equals_ignore_case(&crate::path_to_string(a), &crate::path_to_string(b))
    }

    fn move_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn move_dir(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// In-memory filesystem for exercising renames without touching the disk.
///
/// Entries are listed in insertion order. Every successful move is recorded
/// so callers can check the order in which renames were applied.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    entries: Vec<(PathBuf, EntryKind)>,
    moves: Vec<(PathBuf, PathBuf)>,
}

impl MemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file entry.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.entries.push((path.into(), EntryKind::File));
        self
    }

    /// Add a directory entry.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.entries.push((path.into(), EntryKind::Directory));
        self
    }

    /// Successful moves in the order they happened.
    #[must_use]
    pub fn moves(&self) -> &[(PathBuf, PathBuf)] {
        &self.moves
    }

    /// All current entry paths.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(path, _)| path.as_path())
    }

    fn kind(&self, path: &Path) -> Option<EntryKind> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == path)
            .map(|(_, kind)| *kind)
    }

    fn check_move(&self, from: &Path, to: &Path, expected: EntryKind) -> io::Result<()> {
        if self.kind(from) != Some(expected) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file or directory: {}", from.display()),
            ));
        }
        if from != to && self.exists(to) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Entry already exists: {}", to.display()),
            ));
        }
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_entries(&self, root: &Path, recursive: bool) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(|(path, _)| path)
            .filter(|path| path.as_path() != root && path.starts_with(root))
            .filter(|path| recursive || path.parent() == Some(root))
            .cloned()
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        self.kind(path).is_some()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.kind(path) == Some(EntryKind::File)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.kind(path) == Some(EntryKind::Directory)
    }

    fn move_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        self.check_move(from, to, EntryKind::File)?;
        for (path, _) in &mut self.entries {
            if path == from {
                *path = to.to_path_buf();
            }
        }
        self.moves.push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }

    fn move_dir(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        self.check_move(from, to, EntryKind::Directory)?;
        for (path, _) in &mut self.entries {
            if let Ok(relative) = path.strip_prefix(from) {
                *path = if relative.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(relative)
                };
            }
        }
        self.moves.push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }
}
