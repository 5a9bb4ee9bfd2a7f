//! Configuration for media rename operations.

use std::{fmt, fs};

use anyhow::Context;
use clap::ValueEnum;
use itertools::Itertools;
use serde::Deserialize;

/// Whether to propose renames or apply a reviewed mapping file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Write the mapping file for review without renaming anything
    #[default]
    Propose,
    /// Apply the mapping file and write a report
    Commit,
}

/// Config from the user config file.
#[derive(Debug, Deserialize)]
pub struct MediaRenameUserConfig {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub log: bool,
    #[serde(default)]
    pub print: bool,
    #[serde(default = "default_true")]
    pub recursive: bool,
    #[serde(default)]
    pub unwanted_terms: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
}

/// Wrapper needed for parsing the config section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    media_rename: MediaRenameUserConfig,
}

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Clone)]
pub struct MediaRenameConfig {
    pub debug: bool,
    pub exclude: Vec<String>,
    pub language_codes: Vec<String>,
    pub log: bool,
    pub print: bool,
    pub recursive: bool,
    pub unwanted_terms: Vec<String>,
    pub verbose: bool,
}

impl Default for MediaRenameUserConfig {
    fn default() -> Self {
        Self {
            debug: false,
            exclude: Vec::new(),
            language_codes: Vec::new(),
            log: false,
            print: false,
            recursive: true,
            unwanted_terms: Vec::new(),
            verbose: false,
        }
    }
}

impl Default for MediaRenameConfig {
    fn default() -> Self {
        Self::from(MediaRenameUserConfig::default())
    }
}

impl MediaRenameUserConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = crate::config_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.media_rename)
            .with_context(|| "Failed to parse config TOML")
    }
}

impl From<MediaRenameUserConfig> for MediaRenameConfig {
    fn from(user_config: MediaRenameUserConfig) -> Self {
        Self {
            debug: user_config.debug,
            exclude: clean_list(user_config.exclude),
            language_codes: clean_list(user_config.language_codes),
            log: user_config.log,
            print: user_config.print,
            recursive: user_config.recursive,
            unwanted_terms: clean_list(user_config.unwanted_terms),
            verbose: user_config.verbose,
        }
    }
}

impl MediaRenameConfig {
    /// Create config from the user config file only.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_user_config() -> anyhow::Result<Self> {
        MediaRenameUserConfig::get_user_config().map(Self::from)
    }

    /// Add exclude patterns, skipping empty and duplicate values.
    pub fn extend_exclude(&mut self, patterns: impl IntoIterator<Item = String>) {
        let merged = self.exclude.drain(..).chain(patterns).collect();
        self.exclude = clean_list(merged);
    }
}

/// Trim values and drop empty and duplicate entries.
fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unique()
        .collect()
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propose => write!(f, "propose"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

impl fmt::Display for MediaRenameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exclude = if self.exclude.is_empty() {
            "exclude: []".to_string()
        } else {
            "exclude:\n".to_string() + &*self.exclude.iter().map(|name| format!("    {name}")).join("\n")
        };
        let unwanted_terms = if self.unwanted_terms.is_empty() {
            "unwanted_terms: []".to_string()
        } else {
            format!("unwanted_terms: [{}]", self.unwanted_terms.iter().join(", "))
        };
        let language_codes = if self.language_codes.is_empty() {
            "language_codes: []".to_string()
        } else {
            format!("language_codes: [{}]", self.language_codes.iter().join(", "))
        };
        writeln!(f, "Config:")?;
        writeln!(f, "  debug:     {}", crate::colorize_bool(self.debug))?;
        writeln!(f, "  log:       {}", crate::colorize_bool(self.log))?;
        writeln!(f, "  print:     {}", crate::colorize_bool(self.print))?;
        writeln!(f, "  recursive: {}", crate::colorize_bool(self.recursive))?;
        writeln!(f, "  verbose:   {}", crate::colorize_bool(self.verbose))?;
        writeln!(f, "  {exclude}")?;
        writeln!(f, "  {unwanted_terms}")?;
        writeln!(f, "  {language_codes}")
    }
}

const fn default_true() -> bool {
    true
}
