//! Build the proposed renames for a directory tree.

use std::path::Path;

use crate::media_rename::{
    FileSystem, MAPPING_FILE_NAME, MediaRenameConfig, NameCleaner, REPORT_FILE_NAME, RenameMapping,
};

/// Walks a directory and proposes a cleaned name for every entry that needs one.
#[derive(Debug)]
pub struct MappingBuilder<'a, F: FileSystem> {
    fs: &'a F,
    cleaner: NameCleaner,
    recursive: bool,
    exclude: Vec<String>,
}

impl<'a, F: FileSystem> MappingBuilder<'a, F> {
    #[must_use]
    pub fn new(fs: &'a F, config: &MediaRenameConfig) -> Self {
        Self {
            fs,
            cleaner: NameCleaner::new(config),
            recursive: config.recursive,
            exclude: config.exclude.clone(),
        }
    }

    /// Collect mappings for all entries under `root` in enumeration order.
    ///
    /// Entries whose cleaned name matches the current name ignoring case are left out.
    #[must_use]
    pub fn build(&self, root: &Path) -> Vec<RenameMapping> {
        self.fs
            .list_entries(root, self.recursive)
            .into_iter()
            .filter(|path| !self.is_excluded(path) && !Self::is_own_output(root, path))
            .filter_map(|path| self.propose(&path))
            .collect()
    }

    /// Propose a new path for a single entry, or `None` if no rename is needed.
    ///
    /// Paths that are not valid UTF-8 are skipped with a warning,
    /// since they cannot be written to the mapping file unchanged.
    #[must_use]
    pub fn propose(&self, path: &Path) -> Option<RenameMapping> {
        if path.to_str().is_none() {
            crate::print_warning!("Skipping non-UTF-8 path: {}", path.display());
            return None;
        }
        let name = crate::path_to_filename_string(path);
        let is_directory = !self.fs.is_file(path);
        let new_name = self.cleaner.clean_name(&name, is_directory);
        if crate::equals_ignore_case(&name, &new_name) {
            return None;
        }
        if new_name.trim().is_empty() {
            crate::print_warning!("Skipping {}: cleaned name is empty", path.display());
            return None;
        }
        let parent = path.parent()?;
        Some(RenameMapping::new(path, parent.join(new_name)))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let path_str = crate::path_to_string(path);
        self.exclude.iter().any(|pattern| path_str.contains(pattern))
    }

    /// The mapping and report files written to the root directory.
    fn is_own_output(root: &Path, path: &Path) -> bool {
        path.parent() == Some(root)
            && path
                .file_name()
                .is_some_and(|name| name == MAPPING_FILE_NAME || name == REPORT_FILE_NAME)
    }
}
