//! Output formatting and styling module.
//!
//! Every user-facing line goes through [`OutputFormatter`] so that colors and
//! symbols stay consistent. All output is written to standard output, errors
//! included, which keeps a run's log in one stream.

use crate::file_organizer::OrganizeReport;
use colored::*;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - The end-of-run summary table
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fimov::output::OutputFormatter;
    /// OutputFormatter::success("Images organized successfully.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        println!("{} {}", "✗".red(), message);
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

    /// Prints a summary table of how many files were moved, left in place,
    /// and failed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fimov::file_organizer::OrganizeReport;
    /// use fimov::output::OutputFormatter;
    ///
    /// OutputFormatter::summary_table(&OrganizeReport::default());
    /// ```
    pub fn summary_table(report: &OrganizeReport) {
        Self::header("SUMMARY");

        let rows = [
            ("Moved", report.moved.len()),
            ("Out of range", report.out_of_range()),
            ("Failed", report.failed.len()),
        ];

        let width = rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max(7); // At least "Outcome" width

        println!(
            "{:<width$} | {}",
            "Outcome".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (label, count) in rows {
            let count_text = if label == "Failed" && count > 0 {
                count.to_string().red()
            } else {
                count.to_string().green()
            };
            println!(
                "{:<width$} | {} {}",
                label,
                count_text,
                file_word(count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            report.scanned.to_string().green().bold(),
            file_word(report.scanned),
            width = width
        );
    }
}

fn file_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
