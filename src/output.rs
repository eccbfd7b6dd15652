//! Output formatting and styling module.
//!
//! Centralizes everything the CLI prints for the user, as opposed to the log
//! stream, which goes through [`Logger`](crate::logger::Logger).

use colored::*;
use std::collections::BTreeMap;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use dirkeep::output::OutputFormatter;
    /// OutputFormatter::success("Backup created");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a two-column table of counts with a total row.
    ///
    /// `label` names the first column (e.g. "Category" or "Extension").
    pub fn count_table(label: &str, counts: &BTreeMap<String, usize>, total: usize) {
        let width = counts
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            .max(label.chars().count())
            .max(5);

        println!("{:<width$} | {}", label.bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (name, count) in counts {
            println!(
                "{:<width$} | {} {}",
                name,
                count.to_string().green(),
                Self::file_word(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            Self::file_word(total),
            width = width
        );
    }

    fn file_word(count: usize) -> &'static str {
        if count == 1 { "file" } else { "files" }
    }
}
