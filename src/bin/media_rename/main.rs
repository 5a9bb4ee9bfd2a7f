mod config;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use media_renamer::media_rename::{MediaRename, RunMode};

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Clean up media file names with a reviewable propose and commit step"
)]
pub(crate) struct Args {
    /// Target directory
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Write the mapping file for review, or apply it
    #[arg(value_enum, ignore_case = true)]
    mode: Option<RunMode>,

    /// Recurse into subdirectories (default)
    #[arg(short = 'r', long, conflicts_with = "non_recursive")]
    recursive: bool,

    /// Only process the top level of the target directory
    #[arg(short = 'n', long)]
    non_recursive: bool,

    /// Exclude paths that contain the given pattern
    #[arg(short = 'e', long, num_args = 1, action = clap::ArgAction::Append, name = "EXCLUDE")]
    exclude: Vec<String>,

    /// Print a diff of each proposed or applied rename
    #[arg(short = 'p', long)]
    print: bool,

    /// Write a run log to ~/logs
    #[arg(short = 'l', long)]
    log: bool,

    /// Enable debug prints
    #[arg(short = 'D', long)]
    debug: bool,

    /// Print verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Create shell completion
    #[arg(long, name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(shell) = args.completion {
        return media_renamer::generate_shell_completion(shell, Args::command(), true, env!("CARGO_BIN_NAME"));
    }

    let Some(path) = args.path.as_deref() else {
        Args::command().print_help()?;
        return Ok(());
    };

    let root = match media_renamer::resolve_input_directory(path) {
        Ok(root) => root,
        Err(error) => {
            media_renamer::print_error!("{error}");
            return Ok(());
        }
    };

    let mode = args.mode.unwrap_or_default();
    let config = config::from_args(args)?;
    MediaRename::new(root, config)?.run(mode)
}
