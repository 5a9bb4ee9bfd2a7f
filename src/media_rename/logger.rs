use std::fs;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::media_rename::{MediaRenameConfig, RenameMapping, RenameSummary, ReportEntry, RunMode};

/// Simple file logger for rename runs with buffered writes
#[derive(Debug)]
pub struct RenameLogger {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RenameLogger {
    /// Create a new file logger, writing to ~/logs/media-renamer/media_rename_<timestamp>.log
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Self::in_directory(&home_dir.join("logs").join(env!("CARGO_PKG_NAME")))
    }

    /// Create a new file logger in the given directory.
    pub fn in_directory(log_dir: &Path) -> Result<Self> {
        if !log_dir.exists() {
            fs::create_dir_all(log_dir).context("Failed to create log directory")?;
        }

        let path = log_dir.join(format!(
            "media_rename_{}.log",
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        ));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Log when starting the program
    pub fn log_init(&mut self, root: &Path, mode: RunMode, config: &MediaRenameConfig) {
        let _ = writeln!(
            self.writer,
            "[{}] INIT {} \"{}\"",
            Self::timestamp(),
            mode.to_string().to_uppercase(),
            root.display()
        );
        let _ = writeln!(self.writer, "  recursive: {}", config.recursive);
        if !config.exclude.is_empty() {
            let _ = writeln!(self.writer, "  exclude: {:?}", config.exclude);
        }
        if !config.unwanted_terms.is_empty() {
            let _ = writeln!(self.writer, "  unwanted_terms: {:?}", config.unwanted_terms);
        }
        if !config.language_codes.is_empty() {
            let _ = writeln!(self.writer, "  language_codes: {:?}", config.language_codes);
        }
        let _ = self.writer.flush();
    }

    /// Log the proposed renames written to the mapping file
    pub fn log_proposed(&mut self, mapping_file: &Path, mappings: &[RenameMapping]) {
        for mapping in mappings {
            let _ = writeln!(
                self.writer,
                "[{}] PROPOSE \"{}\" -> \"{}\"",
                Self::timestamp(),
                mapping.original.display(),
                mapping.proposed_name()
            );
        }
        let _ = writeln!(
            self.writer,
            "[{}] MAPPING {} entries written to \"{}\"",
            Self::timestamp(),
            mappings.len(),
            mapping_file.display()
        );
        let _ = self.writer.flush();
    }

    /// Log the outcome of a single rename
    pub fn log_entry(&mut self, entry: &ReportEntry) {
        if entry.is_success() {
            let _ = writeln!(
                self.writer,
                "[{}] SUCCESS \"{}\" -> \"{}\"",
                Self::timestamp(),
                entry.original.display(),
                entry.new.display()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "[{}] FAILED  \"{}\" -> \"{}\" | {}",
                Self::timestamp(),
                entry.original.display(),
                entry.new.display(),
                entry.error_message
            );
        }
        let _ = self.writer.flush();
    }

    /// Log final results when the run finishes
    pub fn log_summary(&mut self, report_file: &Path, summary: &RenameSummary) {
        let _ = writeln!(
            self.writer,
            "[{}] DONE {} | report: \"{}\"",
            Self::timestamp(),
            summary,
            report_file.display()
        );
        let _ = self.writer.flush();
    }

    /// Log a usage error that stopped the run
    pub fn log_error(&mut self, message: &str) {
        let _ = writeln!(self.writer, "[{}] ERROR {message}", Self::timestamp());
        let _ = self.writer.flush();
    }
}
