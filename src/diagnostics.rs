//! Diagnostics on stderr. Stdout is reserved for the rendered report.

use colored::Colorize;

/// Print a non-fatal warning.
pub fn warn(message: impl std::fmt::Display) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Print an informational line.
pub fn note(message: impl std::fmt::Display) {
    eprintln!("  {} {}", "→".cyan(), message);
}
