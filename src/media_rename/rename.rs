//! Propose and commit runs for a target directory.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use crate::media_rename::{
    FileSystem, MAPPING_FILE_NAME, MappingBuilder, MediaRenameConfig, OsFileSystem, REPORT_FILE_NAME, RenameExecutor,
    RenameLogger, RenameMapping, RenameSummary, ReportEntry, RunMode, read_mapping_file, write_mapping_file,
    write_report_file,
};

/// Media rename handler for a single target directory.
#[derive(Debug)]
pub struct MediaRename {
    root: PathBuf,
    config: MediaRenameConfig,
    logger: Option<RenameLogger>,
}

impl MediaRename {
    /// Create a new instance for the given root directory.
    ///
    /// Opens the run log when logging is enabled in the config.
    ///
    /// # Errors
    /// Returns an error if the log file cannot be created.
    pub fn new(root: PathBuf, config: MediaRenameConfig) -> Result<Self> {
        let logger = if config.log { Some(RenameLogger::new()?) } else { None };
        Ok(Self { root, config, logger })
    }

    /// Use the given logger instead of the default log location.
    #[must_use]
    pub fn with_logger(mut self, logger: RenameLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the mapping file in the root directory.
    #[must_use]
    pub fn mapping_file_path(&self) -> PathBuf {
        self.root.join(MAPPING_FILE_NAME)
    }

    /// Path of the report file in the root directory.
    #[must_use]
    pub fn report_file_path(&self) -> PathBuf {
        self.root.join(REPORT_FILE_NAME)
    }

    /// Run the given mode against the real filesystem.
    ///
    /// # Errors
    /// Returns an error if the mapping or report file cannot be read or written.
    pub fn run(&mut self, mode: RunMode) -> Result<()> {
        if self.config.debug {
            println!("{self}");
        }
        if let Some(logger) = self.logger.as_mut() {
            logger.log_init(&self.root, mode, &self.config);
        }

        let mut fs = OsFileSystem;
        match mode {
            RunMode::Propose => self.propose(&fs).map(|_| ()),
            RunMode::Commit => self.commit(&mut fs).map(|_| ()),
        }
    }

    /// Build the proposed renames and write them to the mapping file.
    ///
    /// Nothing is renamed.
    ///
    /// # Errors
    /// Returns an error if the mapping file cannot be written.
    pub fn propose<F: FileSystem>(&mut self, fs: &F) -> Result<Vec<RenameMapping>> {
        if self.config.verbose {
            println!(
                "{}",
                format!("Proposing renames under {}", self.root.display()).bold()
            );
        }

        let mappings = MappingBuilder::new(fs, &self.config).build(&self.root);
        if self.config.print {
            for mapping in &mappings {
                crate::show_diff(&mapping.original_name(), &mapping.proposed_name());
            }
        }

        let mapping_file = self.mapping_file_path();
        write_mapping_file(&mapping_file, &mappings)?;
        if let Some(logger) = self.logger.as_mut() {
            logger.log_proposed(&mapping_file, &mappings);
        }

        if self.config.verbose {
            println!("Proposed {} renames", mappings.len());
        }
        println!("Mapping file generated at: {}", mapping_file.display());
        println!("Please review and edit the 'ProposedNewFullPath' in the mapping file if necessary.");
        Ok(mappings)
    }

    /// Apply the mapping file and write the report.
    ///
    /// Returns `None` without renaming anything if the mapping file does not exist.
    ///
    /// # Errors
    /// Returns an error if the mapping file cannot be read or the report cannot be written.
    pub fn commit<F: FileSystem>(&mut self, fs: &mut F) -> Result<Option<Vec<ReportEntry>>> {
        let mapping_file = self.mapping_file_path();
        if !mapping_file.is_file() {
            let message = format!("Mapping file not found: {}", mapping_file.display());
            crate::print_error!("{message}");
            if let Some(logger) = self.logger.as_mut() {
                logger.log_error(&message);
            }
            return Ok(None);
        }

        let mappings = read_mapping_file(&mapping_file)?;
        if self.config.verbose {
            println!(
                "{}",
                format!("Renaming {} entries from {}", mappings.len(), mapping_file.display()).bold()
            );
        }

        let entries = RenameExecutor::new(fs, self.config.print).execute(mappings);
        if let Some(logger) = self.logger.as_mut() {
            for entry in &entries {
                logger.log_entry(entry);
            }
        }

        let report_file = self.report_file_path();
        write_report_file(&report_file, &entries)?;

        let summary = RenameSummary::from_entries(&entries);
        if let Some(logger) = self.logger.as_mut() {
            logger.log_summary(&report_file, &summary);
        }

        if summary.failed == 0 {
            println!("{}", format!("Renaming completed successfully: {summary}").green());
        } else {
            println!("{}", format!("Renaming completed with errors: {summary}").yellow());
        }
        println!("Report generated at: {}", report_file.display());
        Ok(Some(entries))
    }
}

impl fmt::Display for MediaRename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root: {}", self.root.display())?;
        if let Some(logger) = &self.logger {
            writeln!(f, "Log:  {}", logger.path().display())?;
        }
        write!(f, "{}", self.config)
    }
}
