//! Error types and error reporting utilities

use colored::*;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A check that refused an input before anything was touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Refusing to operate on symlink: {}", .0.display())]
    SymlinkRejected(PathBuf),

    #[error("Invalid extension filter '{filter}': {reason}")]
    InvalidExtensionFilter { filter: String, reason: String },

    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot read {}: {message}", .path.display())]
    Inaccessible { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum RenameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Target already taken: {}", .0.display())]
    CollisionDetected(PathBuf),

    #[error("Target now exists: {}", .0.display())]
    RaceLostOnExecution(PathBuf),

    #[error("Filesystem error on {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenameError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RenameError::Filesystem { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;

/// Print a formatted error message
pub fn print_error(context: &str, error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), context);
    eprintln!("  {}", error.to_string().red());

    // Show chain of causes
    let mut current = error.source();
    while let Some(cause) = current {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause.to_string().dimmed());
        current = std::error::Error::source(cause);
    }
}

/// Print an error with a suggestion
pub fn print_error_with_suggestion(context: &str, error: &anyhow::Error, suggestion: &str) {
    print_error(context, error);
    eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

/// Suggestion shown for fatal errors the user can fix from the command line
pub fn suggestion_for(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<RenameError>()? {
        RenameError::Validation(ValidationError::InvalidExtensionFilter { .. }) => {
            Some("Pass a plain extension such as 'txt' or '.txt'")
        }
        RenameError::Validation(ValidationError::NotADirectory(_)) => {
            Some("Create the target directory first or drop --target-dir")
        }
        RenameError::RootNotFound(_) => Some("Check the path, or run without one to use '.'"),
        _ => None,
    }
}
