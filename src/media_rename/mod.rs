//! Media rename module for cleaning movie, TV and subtitle names.
//!
//! Renaming happens in two phases. Propose mode walks a directory, cleans every name
//! into the "Title (Year)" form and writes the changes to a mapping file for review.
//! Commit mode reads the reviewed mapping file back, performs the renames and writes
//! a report with the outcome of every entry.

mod builder;
mod clean;
mod config;
mod executor;
mod fs;
mod logger;
mod mapping;
mod rename;
mod report;

pub use builder::MappingBuilder;
pub use clean::{LANGUAGE_CODES, NameCleaner, UNWANTED_TERMS, clean_name};
pub use config::{MediaRenameConfig, MediaRenameUserConfig, RunMode};
pub use executor::RenameExecutor;
pub use fs::{EntryKind, FileSystem, MemoryFileSystem, OsFileSystem};
pub use logger::RenameLogger;
pub use mapping::{MAPPING_HEADER, RenameMapping, format_mappings, parse_mappings, read_mapping_file, write_mapping_file};
pub use rename::MediaRename;
pub use report::{
    REPORT_HEADER, RenameStatus, RenameSummary, ReportEntry, format_report, parse_report, read_report_file,
    write_report_file,
};

/// Name of the mapping file written to the target directory in propose mode.
pub const MAPPING_FILE_NAME: &str = "RenameMapping.txt";

/// Name of the report file written to the target directory in commit mode.
pub const REPORT_FILE_NAME: &str = "RenameReport.txt";
