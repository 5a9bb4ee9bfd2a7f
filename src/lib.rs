pub mod config;
pub mod media_rename;

pub use config::config_path;

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Command;
use clap_complete::Shell;
use colored::{ColoredString, Colorize};
use difference::{Changeset, Difference};

/// Append an extension to `PathBuf`, which is missing from the standard lib :(
pub fn append_extension_to_path(path: PathBuf, extension: impl AsRef<OsStr>) -> PathBuf {
    let mut os_string: OsString = path.into();
    os_string.push(".");
    os_string.push(extension);
    os_string.into()
}

/// Format bool value as a coloured string.
#[must_use]
pub fn colorize_bool(value: bool) -> ColoredString {
    if value { "true".green() } else { "false".red() }
}

/// Resolve the given input directory to an absolute path.
///
/// Returns an error if the path does not exist or is not a directory.
///
/// ```rust
/// use std::path::Path;
/// use media_renamer::resolve_input_directory;
///
/// let absolute_path = resolve_input_directory(Path::new("src")).unwrap();
/// assert!(absolute_path.is_absolute());
///
/// assert!(resolve_input_directory(Path::new("Cargo.toml")).is_err());
/// ```
pub fn resolve_input_directory(path: &Path) -> Result<PathBuf> {
    let directory = path.to_path_buf();
    if !directory.is_dir() {
        anyhow::bail!("Directory not found: {}", directory.display());
    }

    let absolute_path = dunce::canonicalize(&directory)
        .with_context(|| format!("Failed to resolve directory: {}", directory.display()))?;

    // Canonicalize fails for network drives on Windows :(
    if path_to_string(&absolute_path).starts_with(r"\\?") && !path_to_string(&directory).starts_with(r"\\?") {
        Ok(directory)
    } else {
        Ok(absolute_path)
    }
}

/// Convert `OsStr` to String with invalid Unicode handling.
pub fn os_str_to_string(name: &OsStr) -> String {
    name.to_str().map_or_else(
        || name.to_string_lossy().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

/// Convert given path to string with invalid Unicode handling.
pub fn path_to_string(path: &Path) -> String {
    path.to_str().map_or_else(
        || path.to_string_lossy().to_string().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

/// Convert given path to filename string with invalid Unicode handling.
#[must_use]
pub fn path_to_filename_string(path: &Path) -> String {
    os_str_to_string(path.file_name().unwrap_or_default())
}

/// Compare two names ignoring case.
///
/// ```rust
/// use media_renamer::equals_ignore_case;
///
/// assert!(equals_ignore_case("The Matrix (1999).mkv", "the matrix (1999).MKV"));
/// assert!(!equals_ignore_case("The Matrix", "The Matrix (1999)"));
/// ```
#[must_use]
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[inline]
pub fn print_error(message: &str) {
    eprintln!("{}", format!("Error: {message}").red());
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        $crate::print_error(&format!($($arg)*))
    };
}

#[inline]
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        $crate::print_warning(&format!($($arg)*))
    };
}

/// Create a coloured diff for the given strings.
pub fn color_diff(old: &str, new: &str, stacked: bool) -> (String, String) {
    let changeset = Changeset::new(old, new, "");
    let mut old_diff = String::new();
    let mut new_diff = String::new();

    if stacked {
        // Find the starting index of the first matching sequence for a nicer visual alignment.
        // For example:
        //   [YTS] The.Matrix.1999.1080p.mkv
        //         The Matrix (1999).mkv
        for diff in &changeset.diffs {
            if let Difference::Same(x) = diff {
                if x.chars().all(char::is_whitespace) || x.chars().count() < 3 {
                    continue;
                }

                // Add leading whitespace so that the first matching sequence lines up.
                if let (Some(old_index), Some(new_index)) = (old.find(x), new.find(x)) {
                    match old_index.cmp(&new_index) {
                        Ordering::Greater => {
                            new_diff = " ".repeat(old_index.saturating_sub(new_index));
                        }
                        Ordering::Less => {
                            old_diff = " ".repeat(new_index.saturating_sub(old_index));
                        }
                        Ordering::Equal => {}
                    }
                    break;
                }
            }
        }
    }

    for diff in changeset.diffs {
        match diff {
            Difference::Same(ref x) => {
                old_diff.push_str(x);
                new_diff.push_str(x);
            }
            Difference::Add(ref x) => {
                if x.chars().all(char::is_whitespace) {
                    new_diff.push_str(&x.on_green().to_string());
                } else {
                    new_diff.push_str(&x.green().to_string());
                }
            }
            Difference::Rem(ref x) => {
                if x.chars().all(char::is_whitespace) {
                    old_diff.push_str(&x.on_red().to_string());
                } else {
                    old_diff.push_str(&x.red().to_string());
                }
            }
        }
    }

    (old_diff, new_diff)
}

/// Print a stacked diff of the changes.
pub fn show_diff(old: &str, new: &str) {
    let (old_diff, new_diff) = color_diff(old, new, true);
    println!("{old_diff}");
    if old_diff != new_diff {
        println!("{new_diff}");
    }
}

/// Generate a shell completion script for the given shell.
pub fn generate_shell_completion(shell: Shell, mut command: Command, install: bool, command_name: &str) -> Result<()> {
    if install {
        let out_dir = get_shell_completion_dir(shell, command_name)?;
        let path = clap_complete::generate_to(shell, &mut command, command_name, out_dir)?;
        println!("Completion file generated to: {}", path.display());
    } else {
        clap_complete::generate(shell, &mut command, command_name, &mut std::io::stdout());
    }
    Ok(())
}

/// Determine the appropriate directory for storing shell completions.
///
/// First checks if the user-specific directory exists,
/// then checks for the global directory.
/// If neither exist, creates and uses the user-specific dir.
fn get_shell_completion_dir(shell: Shell, name: &str) -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;

    // Special handling for oh-my-zsh.
    // Create custom "plugin", which will then have to be loaded in .zshrc
    if shell == Shell::Zsh {
        let omz_plugins = home.join(".oh-my-zsh/custom/plugins");
        if omz_plugins.exists() {
            let plugin_dir = omz_plugins.join(name);
            std::fs::create_dir_all(&plugin_dir)?;
            return Ok(plugin_dir);
        }
    }

    let user_dir = match shell {
        Shell::PowerShell => {
            if cfg!(windows) {
                home.join(r"Documents\PowerShell\completions")
            } else {
                home.join(".config/powershell/completions")
            }
        }
        Shell::Bash => home.join(".bash_completion.d"),
        Shell::Elvish => home.join(".elvish"),
        Shell::Fish => home.join(".config/fish/completions"),
        Shell::Zsh => home.join(".zsh/completions"),
        _ => anyhow::bail!("Unsupported shell"),
    };

    if user_dir.exists() {
        return Ok(user_dir);
    }

    let global_dir = match shell {
        Shell::PowerShell => {
            if cfg!(windows) {
                home.join(r"Documents\PowerShell\completions")
            } else {
                home.join(".config/powershell/completions")
            }
        }
        Shell::Bash => PathBuf::from("/etc/bash_completion.d"),
        Shell::Fish => PathBuf::from("/usr/share/fish/completions"),
        Shell::Zsh => PathBuf::from("/usr/share/zsh/site-functions"),
        _ => anyhow::bail!("Unsupported shell"),
    };

    if global_dir.exists() {
        return Ok(global_dir);
    }

    std::fs::create_dir_all(&user_dir)?;
    Ok(user_dir)
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    use std::fs::File;

    use tempfile::tempdir;

    #[test]
    fn test_resolve_input_directory_valid() {
        let dir = tempdir().unwrap();
        let resolved = resolve_input_directory(dir.path());
        assert!(resolved.is_ok());
        assert!(resolved.unwrap().is_dir());
    }

    #[test]
    fn test_resolve_input_directory_nonexistent() {
        let resolved = resolve_input_directory(Path::new("nonexistent"));
        assert!(resolved.is_err());
        assert!(resolved.unwrap_err().to_string().starts_with("Directory not found"));
    }

    #[test]
    fn test_resolve_input_directory_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("movie.mkv");
        File::create(&file).unwrap();
        assert!(resolve_input_directory(&file).is_err());
    }

    #[test]
    fn test_resolve_input_directory_keeps_trailing_space() {
        let dir = tempdir().unwrap();
        let with_space = dir.path().join("Movies ");
        std::fs::create_dir(&with_space).unwrap();
        std::fs::create_dir(dir.path().join("Movies")).unwrap();

        let resolved = resolve_input_directory(&with_space).unwrap();
        assert_eq!(path_to_filename_string(&resolved), "Movies ");
    }

    #[test]
    fn test_append_extension_to_path() {
        let path = append_extension_to_path(PathBuf::from("/media/Movie (1999).mkv"), "tmp");
        assert_eq!(path, PathBuf::from("/media/Movie (1999).mkv.tmp"));
    }

    #[test]
    fn test_path_to_filename_string() {
        assert_eq!(path_to_filename_string(Path::new("/media/Movie.mkv")), "Movie.mkv");
        assert_eq!(path_to_filename_string(Path::new("/")), "");
    }

    #[test]
    fn test_equals_ignore_case() {
        assert!(equals_ignore_case("Movie.MKV", "movie.mkv"));
        assert!(equals_ignore_case("Ärrä", "ärrä"));
        assert!(!equals_ignore_case("Movie", "Movie (2001)"));
    }

    #[test]
    fn test_color_diff_identical() {
        colored::control::set_override(false);
        let (old, new) = color_diff("Movie (1999).mkv", "Movie (1999).mkv", false);
        assert_eq!(old, new);
    }
}
