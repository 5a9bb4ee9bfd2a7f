//! Rename report written after commit mode.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::media_rename::RenameMapping;

/// Header line of the report file.
pub const REPORT_HEADER: &str = "Status|OriginalFullPath|NewFullPath|ErrorMessage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameStatus {
    Success,
    Failed,
}

/// Outcome of a single rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub status: RenameStatus,
    pub original: PathBuf,
    pub new: PathBuf,
    /// Empty on success.
    pub error_message: String,
}

/// Number of successful and failed renames.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl ReportEntry {
    #[must_use]
    pub fn success(mapping: &RenameMapping) -> Self {
        Self {
            status: RenameStatus::Success,
            original: mapping.original.clone(),
            new: mapping.proposed.clone(),
            error_message: String::new(),
        }
    }

    #[must_use]
    pub fn failed(mapping: &RenameMapping, error_message: impl Into<String>) -> Self {
        Self {
            status: RenameStatus::Failed,
            original: mapping.original.clone(),
            new: mapping.proposed.clone(),
            error_message: error_message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == RenameStatus::Success
    }
}

impl RenameSummary {
    #[must_use]
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        let succeeded = entries.iter().filter(|entry| entry.is_success()).count();
        Self {
            succeeded,
            failed: entries.len() - succeeded,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

impl fmt::Display for RenameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for RenameStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Success" => Ok(Self::Success),
            "Failed" => Ok(Self::Failed),
            _ => Err(anyhow::anyhow!("Unknown rename status: '{s}'")),
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.status,
            crate::path_to_string(&self.original),
            crate::path_to_string(&self.new),
            self.error_message
        )
    }
}

impl fmt::Display for RenameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} succeeded, {} failed", self.succeeded, self.failed)
    }
}

/// Format report entries as report file content, including the header line.
#[must_use]
pub fn format_report(entries: &[ReportEntry]) -> String {
    let mut content = String::from(REPORT_HEADER);
    content.push('\n');
    for entry in entries {
        content.push_str(&entry.to_string());
        content.push('\n');
    }
    content
}

/// Parse report file content, skipping the header and unrecognized lines.
///
/// The error message is the last column and may itself contain `|`.
#[must_use]
pub fn parse_report(content: &str) -> Vec<ReportEntry> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut parts = line.splitn(4, '|');
            let status = parts.next()?.parse().ok()?;
            let original = parts.next()?;
            let new = parts.next()?;
            let error_message = parts.next()?;
            Some(ReportEntry {
                status,
                original: PathBuf::from(original),
                new: PathBuf::from(new),
                error_message: error_message.to_string(),
            })
        })
        .collect()
}

/// Write the report file, replacing any existing one.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_report_file(path: &Path, entries: &[ReportEntry]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create report file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_report(entries).as_bytes())
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write report file: {}", path.display()))
}

/// Read entries back from a report file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_report_file(path: &Path) -> Result<Vec<ReportEntry>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read report file: {}", path.display()))?;
    Ok(parse_report(&content))
}
