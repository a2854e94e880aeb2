//! Color theme for consistent output

use crate::execute::Outcome;
use colored::*;

/// Color for success messages
pub fn success(msg: &str) -> ColoredString {
    msg.green()
}

/// Color for error messages
pub fn error(msg: &str) -> ColoredString {
    msg.red()
}

/// Color for warning messages
pub fn warning(msg: &str) -> ColoredString {
    msg.yellow()
}

/// Badge for an entry's outcome
pub fn outcome_badge(outcome: &Outcome) -> ColoredString {
    let label = outcome.label();
    match outcome {
        Outcome::Renamed => label.green().bold(),
        Outcome::WouldRename => label.cyan(),
        Outcome::NoOp => label.dimmed(),
        Outcome::Collision => label.yellow(),
        Outcome::Skipped(_) => label.magenta(),
        Outcome::Failed(_) => label.red().bold(),
    }
}

/// Symbol for an entry's outcome
pub fn outcome_symbol(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Renamed => success_symbol(),
        Outcome::WouldRename => info_symbol(),
        Outcome::NoOp => "=",
        Outcome::Collision | Outcome::Skipped(_) => warning_symbol(),
        Outcome::Failed(_) => error_symbol(),
    }
}

/// Symbol for success
pub fn success_symbol() -> &'static str {
    "✓"
}

/// Symbol for error
pub fn error_symbol() -> &'static str {
    "✗"
}

/// Symbol for warning
pub fn warning_symbol() -> &'static str {
    "⚠"
}

/// Symbol for info
pub fn info_symbol() -> &'static str {
    "→"
}
