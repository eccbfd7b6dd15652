//! Command-line interface module for dirkeep.
//!
//! Parses the three subcommands, builds a [`DirectoryManager`] for the target
//! directory and renders each operation's outcome.

use crate::config::CategoryConfig;
use crate::logger::TracingLogger;
use crate::manager::DirectoryManager;
use crate::output::OutputFormatter;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// dirkeep - organize, back up and report on a directory.
#[derive(Parser, Debug)]
#[command(name = "dirkeep", version, about)]
pub struct Cli {
    /// Directory to operate on (defaults to the current directory).
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Category configuration file (TOML).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Represents a CLI command to execute.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move top-level files into category folders by extension.
    Organize,
    /// Write a zip archive of the directory into `_backups/`.
    Backup {
        /// Archive name prefix (defaults to "backup").
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Write a text report of file and folder counts.
    Report,
}

/// Runs one command against a directory.
///
/// # Examples
///
/// ```no_run
/// use dirkeep::cli::{run_cli, Command};
/// use std::path::Path;
///
/// let result = run_cli(&Command::Report, Some(Path::new("/path/to/directory")), None);
/// if let Err(e) = result {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(
    command: &Command,
    dir_path: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let categories = CategoryConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?
        .compile()
        .map_err(|e| format!("Error in category configuration: {}", e))?;

    let manager = DirectoryManager::with_parts(dir_path, categories, Box::new(TracingLogger))
        .map_err(|e| format!("Error opening directory: {}", e))?;

    match command {
        Command::Organize => organize(&manager),
        Command::Backup { name } => backup(&manager, name.as_deref()),
        Command::Report => report(&manager),
    }
}

fn organize(manager: &DirectoryManager) -> Result<(), String> {
    OutputFormatter::info(&format!(
        "Organizing contents of: {}",
        manager.base_dir().display()
    ));

    let report = manager
        .organize_by_extension()
        .map_err(|e| format!("Error organizing directory: {}", e))?;

    for operation in &report.operations {
        let name = operation
            .new_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        OutputFormatter::plain(&format!(" - {} → {}/", name, operation.category));
    }

    if report.moved() == 0 && report.failures.is_empty() {
        OutputFormatter::plain("No files found to organize.");
        return Ok(());
    }

    OutputFormatter::header("SUMMARY");
    OutputFormatter::count_table("Category", &report.category_counts(), report.moved());

    if !report.is_complete_success() {
        OutputFormatter::warning(&format!(
            "{} file(s) could not be organized:",
            report.failures.len()
        ));
        for failure in &report.failures {
            OutputFormatter::plain(&format!("   {}: {}", failure.file_name, failure.reason));
        }
    }

    Ok(())
}

fn backup(manager: &DirectoryManager, name: Option<&str>) -> Result<(), String> {
    OutputFormatter::info(&format!(
        "Backing up: {}",
        manager.base_dir().display()
    ));

    match manager.create_backup(name) {
        Some(path) => {
            OutputFormatter::success(&format!("Backup saved to {}", path.display()));
            Ok(())
        }
        None => Err("Failed to create backup".to_string()),
    }
}

fn report(manager: &DirectoryManager) -> Result<(), String> {
    let (path, summary) = manager
        .generate_report_with_summary()
        .map_err(|e| format!("Error generating report: {}", e))?;

    OutputFormatter::success(&format!("Report saved to {}", path.display()));
    OutputFormatter::plain(&format!(
        "Files: {}   Folders: {}",
        summary.total_files, summary.total_dirs
    ));
    if !summary.extensions.is_empty() {
        OutputFormatter::header("BY EXTENSION");
        OutputFormatter::count_table("Extension", &summary.extensions, summary.total_files);
    }

    Ok(())
}
