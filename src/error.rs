//! Error handling for the iconsmith application.
//! Defines the error type and result alias used throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating icon components or the readme.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors that occur during configuration loading or validation
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Entry folder '{entry}' does not exist.")]
    EntryNotFound { entry: String },

    /// A mirrored output folder would land on the entry folder itself.
    #[error("Folder '{folder}' can't be the same as the entry folder '{entry}'.")]
    FolderCollision { folder: String, entry: String },

    /// The markup has no element the rewriter was asked to target.
    #[error("Element <{element}> not found in markup.")]
    ElementNotFound { element: String },

    #[error("Markup error: {0}.")]
    MarkupError(String),

    #[error("Failed to format '{file}': {message}.")]
    FormatError { file: String, message: String },

    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to parse JSON: {0}.")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}.")]
    YAMLParseError(#[from] serde_yaml::Error),

    /// Wraps a failure that only affects a single source file.
    #[error("Cannot process the source path: '{source_path}'. Original error: {e}")]
    ProcessError { source_path: PathBuf, e: Box<Error> },
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Configuration problems exit with 2, structural conflicts with 3,
    /// everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ConfigError(_)
            | Error::EntryNotFound { .. }
            | Error::JSONParseError(_)
            | Error::YAMLParseError(_) => 2,
            Error::FolderCollision { .. } => 3,
            _ => 1,
        }
    }

    /// Whether the error is limited to one file and the batch may continue.
    ///
    /// Only meaningful for errors raised while handling one source file.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ProcessError { .. }
                | Error::IoError(_)
                | Error::FormatError { .. }
                | Error::ElementNotFound { .. }
                | Error::MarkupError(_)
        )
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with [`Error::exit_code`]
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(err.exit_code());
}
