//! Reading and writing the reviewable rename mapping file.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Header line of the mapping file.
pub const MAPPING_HEADER: &str = "OriginalFullPath|ProposedNewFullPath";

/// A single proposed rename from the original path to the new path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenameMapping {
    pub original: PathBuf,
    pub proposed: PathBuf,
}

impl RenameMapping {
    #[must_use]
    pub fn new(original: impl Into<PathBuf>, proposed: impl Into<PathBuf>) -> Self {
        Self {
            original: original.into(),
            proposed: proposed.into(),
        }
    }

    /// Original file or directory name.
    #[must_use]
    pub fn original_name(&self) -> String {
        crate::path_to_filename_string(&self.original)
    }

    /// Proposed file or directory name.
    #[must_use]
    pub fn proposed_name(&self) -> String {
        crate::path_to_filename_string(&self.proposed)
    }
}

impl fmt::Display for RenameMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}",
            crate::path_to_string(&self.original),
            crate::path_to_string(&self.proposed)
        )
    }
}

/// Format mappings as mapping file content, including the header line.
#[must_use]
pub fn format_mappings(mappings: &[RenameMapping]) -> String {
    let mut content = String::from(MAPPING_HEADER);
    content.push('\n');
    for mapping in mappings {
        content.push_str(&mapping.to_string());
        content.push('\n');
    }
    content
}

/// Parse mapping file content.
///
/// The first line is the header and is always skipped.
/// Lines that do not split into exactly two columns are ignored.
///
/// ```rust
/// use media_renamer::media_rename::parse_mappings;
///
/// let content = "OriginalFullPath|ProposedNewFullPath\n/a/Movie.2001.mkv|/a/Movie (2001).mkv\nbroken line\n";
/// let mappings = parse_mappings(content);
/// assert_eq!(mappings.len(), 1);
/// assert_eq!(mappings[0].proposed_name(), "Movie (2001).mkv");
/// ```
#[must_use]
pub fn parse_mappings(content: &str) -> Vec<RenameMapping> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('|').collect();
            match parts.as_slice() {
                [original, proposed] => Some(RenameMapping::new(*original, *proposed)),
                _ => None,
            }
        })
        .collect()
}

/// Write the mapping file, replacing any existing one.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_mapping_file(path: &Path, mappings: &[RenameMapping]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create mapping file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_mappings(mappings).as_bytes())
        .with_context(|| format!("Failed to write mapping file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write mapping file: {}", path.display()))
}

/// Read mappings from the mapping file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_mapping_file(path: &Path) -> Result<Vec<RenameMapping>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
    Ok(parse_mappings(&content))
}
