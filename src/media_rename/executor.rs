//! Apply rename mappings and capture the outcome of each one.

use std::io;
use std::path::Path;

use crate::media_rename::{FileSystem, RenameMapping, ReportEntry};

/// Applies mappings through a [`FileSystem`], files first and directories last.
///
/// A failed rename does not stop the remaining ones, and nothing is rolled back.
#[derive(Debug)]
pub struct RenameExecutor<'a, F: FileSystem> {
    fs: &'a mut F,
    print: bool,
}

impl<'a, F: FileSystem> RenameExecutor<'a, F> {
    #[must_use]
    pub const fn new(fs: &'a mut F, print: bool) -> Self {
        Self { fs, print }
    }

    /// Rename every mapping and return one report entry per mapping in execution order.
    pub fn execute(&mut self, mappings: Vec<RenameMapping>) -> Vec<ReportEntry> {
        self.order_files_first(mappings)
            .iter()
            .map(|mapping| self.rename(mapping))
            .collect()
    }

    /// Stable sort so that entries which are currently directories come after everything else.
    ///
    /// Uses the live filesystem state, so a missing path sorts together with files.
    #[must_use]
    pub fn order_files_first(&self, mappings: Vec<RenameMapping>) -> Vec<RenameMapping> {
        let mut classified: Vec<(bool, RenameMapping)> = mappings
            .into_iter()
            .map(|mapping| (self.fs.is_dir(&mapping.original), mapping))
            .collect();
        classified.sort_by_key(|(is_dir, _)| *is_dir);
        classified.into_iter().map(|(_, mapping)| mapping).collect()
    }

    fn rename(&mut self, mapping: &RenameMapping) -> ReportEntry {
        let source = &mapping.original;
        let target = &mapping.proposed;

        let result = if self.fs.is_file(source) {
            self.move_entry(source, target, false)
        } else if self.fs.is_dir(source) {
            self.move_entry(source, target, true)
        } else {
            let message = format!("Path not found: {}", source.display());
            crate::print_error!("{message}");
            return ReportEntry::failed(mapping, message);
        };

        match result {
            Ok(()) => {
                if self.print {
                    crate::show_diff(&mapping.original_name(), &mapping.proposed_name());
                }
                ReportEntry::success(mapping)
            }
            Err(error) => {
                crate::print_error!(
                    "Error renaming '{}' to '{}': {error}",
                    source.display(),
                    target.display()
                );
                ReportEntry::failed(mapping, error.to_string())
            }
        }
    }

    fn move_entry(&mut self, source: &Path, target: &Path, is_dir: bool) -> io::Result<()> {
        if source != target && self.fs.exists(target) {
            if is_case_only_change(source, target) && self.fs.is_same_entry(source, target) {
                return self.move_with_temp_name(source, target, is_dir);
            }
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Destination already exists: {}", target.display()),
            ));
        }
        self.move_raw(source, target, is_dir)
    }

    /// Rename through an intermediate name to work around case-insensitive file systems.
    fn move_with_temp_name(&mut self, source: &Path, target: &Path, is_dir: bool) -> io::Result<()> {
        let temp_path = crate::append_extension_to_path(target.to_path_buf(), "tmp");
        self.move_raw(source, &temp_path, is_dir)?;
        self.move_raw(&temp_path, target, is_dir)
    }

    fn move_raw(&mut self, source: &Path, target: &Path, is_dir: bool) -> io::Result<()> {
        if is_dir {
            self.fs.move_dir(source, target)
        } else {
            self.fs.move_file(source, target)
        }
    }
}

fn is_case_only_change(source: &Path, target: &Path) -> bool {
    crate::equals_ignore_case(&crate::path_to_string(source), &crate::path_to_string(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use crate::media_rename::{MemoryFileSystem, RenameStatus};

    /// Memory filesystem where every move fails.
    struct ReadOnlyFileSystem(MemoryFileSystem);

    impl FileSystem for ReadOnlyFileSystem {
        fn list_entries(&self, root: &Path, recursive: bool) -> Vec<PathBuf> {
            self.0.list_entries(root, recursive)
        }

        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.0.is_file(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.0.is_dir(path)
        }

        fn move_file(&mut self, _from: &Path, _to: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "Read-only filesystem"))
        }

        fn move_dir(&mut self, _from: &Path, _to: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "Read-only filesystem"))
        }
    }

    /// Memory filesystem that resolves existence checks ignoring case.
    struct CaseInsensitiveFileSystem(MemoryFileSystem);

    impl FileSystem for CaseInsensitiveFileSystem {
        fn list_entries(&self, root: &Path, recursive: bool) -> Vec<PathBuf> {
            self.0.list_entries(root, recursive)
        }

        fn exists(&self, path: &Path) -> bool {
            self.0.paths().any(|entry| is_case_only_change(entry, path))
        }

        fn is_same_entry(&self, a: &Path, b: &Path) -> bool {
            is_case_only_change(a, b)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.0.is_file(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.0.is_dir(path)
        }

        fn move_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
            self.0.move_file(from, to)
        }

        fn move_dir(&mut self, from: &Path, to: &Path) -> io::Result<()> {
            self.0.move_dir(from, to)
        }
    }

    #[test]
    fn test_file_inside_directory_is_renamed_first() {
        let mut memory = MemoryFileSystem::new();
        memory
            .add_dir("/media/Movie.2020.1080p")
            .add_file("/media/Movie.2020.1080p/Movie.2020.1080p.mkv");

        let mappings = vec![
            RenameMapping::new("/media/Movie.2020.1080p", "/media/Movie (2020)"),
            RenameMapping::new(
                "/media/Movie.2020.1080p/Movie.2020.1080p.mkv",
                "/media/Movie.2020.1080p/Movie (2020).mkv",
            ),
        ];

        let report = RenameExecutor::new(&mut memory, false).execute(mappings);
        assert!(report.iter().all(ReportEntry::is_success));
        assert_eq!(
            memory.moves(),
            [
                (
                    PathBuf::from("/media/Movie.2020.1080p/Movie.2020.1080p.mkv"),
                    PathBuf::from("/media/Movie.2020.1080p/Movie (2020).mkv"),
                ),
                (PathBuf::from("/media/Movie.2020.1080p"), PathBuf::from("/media/Movie (2020)")),
            ]
        );
        assert!(memory.is_file(Path::new("/media/Movie (2020)/Movie (2020).mkv")));
    }

    #[test]
    fn test_order_is_stable_within_groups() {
        let mut memory = MemoryFileSystem::new();
        memory
            .add_dir("/m/d1")
            .add_file("/m/f1")
            .add_dir("/m/d2")
            .add_file("/m/f2");
        let mappings = vec![
            RenameMapping::new("/m/d1", "/m/D1"),
            RenameMapping::new("/m/f1", "/m/F1"),
            RenameMapping::new("/m/missing", "/m/Missing"),
            RenameMapping::new("/m/d2", "/m/D2"),
            RenameMapping::new("/m/f2", "/m/F2"),
        ];
        let executor = RenameExecutor::new(&mut memory, false);
        let ordered: Vec<PathBuf> = executor
            .order_files_first(mappings)
            .into_iter()
            .map(|mapping| mapping.original)
            .collect();
        assert_eq!(
            ordered,
            ["/m/f1", "/m/missing", "/m/f2", "/m/d1", "/m/d2"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_source_fails_and_continues() {
        let mut memory = MemoryFileSystem::new();
        memory.add_file("/m/Movie.2001.mkv");
        let mappings = vec![
            RenameMapping::new("/m/Gone.2000.mkv", "/m/Gone (2000).mkv"),
            RenameMapping::new("/m/Movie.2001.mkv", "/m/Movie (2001).mkv"),
        ];

        let report = RenameExecutor::new(&mut memory, false).execute(mappings);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].status, RenameStatus::Failed);
        assert_eq!(report[0].error_message, "Path not found: /m/Gone.2000.mkv");
        assert_eq!(report[1].status, RenameStatus::Success);
        assert!(report[1].error_message.is_empty());
    }

    #[test]
    fn test_existing_destination_fails() {
        let mut memory = MemoryFileSystem::new();
        memory.add_file("/m/Movie.2001.mkv").add_file("/m/Movie (2001).mkv");
        let report = RenameExecutor::new(&mut memory, false)
            .execute(vec![RenameMapping::new("/m/Movie.2001.mkv", "/m/Movie (2001).mkv")]);
        assert_eq!(report[0].status, RenameStatus::Failed);
        assert_eq!(report[0].error_message, "Destination already exists: /m/Movie (2001).mkv");
        assert!(memory.is_file(Path::new("/m/Movie.2001.mkv")));
    }

    #[test]
    fn test_move_error_message_is_captured() {
        let mut memory = MemoryFileSystem::new();
        memory.add_file("/m/a.1999.mkv").add_dir("/m/b.2000");
        let mut read_only = ReadOnlyFileSystem(memory);
        let report = RenameExecutor::new(&mut read_only, false).execute(vec![
            RenameMapping::new("/m/b.2000", "/m/b (2000)"),
            RenameMapping::new("/m/a.1999.mkv", "/m/a (1999).mkv"),
        ]);
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|entry| entry.status == RenameStatus::Failed));
        assert_eq!(report[0].original, PathBuf::from("/m/a.1999.mkv"));
        assert_eq!(report[0].error_message, "Read-only filesystem");
        assert_eq!(report[1].error_message, "Read-only filesystem");
    }

    #[test]
    fn test_case_only_rename_uses_temp_name() {
        let mut memory = MemoryFileSystem::new();
        memory.add_file("/m/movie (2001).mkv");
        let mut case_insensitive = CaseInsensitiveFileSystem(memory);
        let report = RenameExecutor::new(&mut case_insensitive, false)
            .execute(vec![RenameMapping::new("/m/movie (2001).mkv", "/m/Movie (2001).mkv")]);
        assert!(report[0].is_success());

        let memory = case_insensitive.0;
        assert_eq!(
            memory.moves(),
            [
                (
                    PathBuf::from("/m/movie (2001).mkv"),
                    PathBuf::from("/m/Movie (2001).mkv.tmp"),
                ),
                (
                    PathBuf::from("/m/Movie (2001).mkv.tmp"),
                    PathBuf::from("/m/Movie (2001).mkv"),
                ),
            ]
        );
        assert!(memory.is_file(Path::new("/m/Movie (2001).mkv")));
    }

    #[test]
    fn test_case_only_rename_keeps_distinct_entries() {
        let mut memory = MemoryFileSystem::new();
        memory.add_file("/m/movie.mkv").add_file("/m/Movie.mkv");
        let report = RenameExecutor::new(&mut memory, false)
            .execute(vec![RenameMapping::new("/m/movie.mkv", "/m/Movie.mkv")]);
        assert_eq!(report[0].status, RenameStatus::Failed);
        assert!(memory.moves().is_empty());
    }

    #[test]
    fn test_case_only_change() {
        assert!(is_case_only_change(Path::new("/m/movie.mkv"), Path::new("/m/Movie.mkv")));
        assert!(!is_case_only_change(Path::new("/m/movie.mkv"), Path::new("/m/Movie (2001).mkv")));
    }
}
