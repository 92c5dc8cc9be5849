//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use topodiff::diff::DiffError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid theme, region or flag value
    Config(String),
    /// Failed to build an HTTP client
    Client(String),
    /// Failed to prepare the output directory
    Init(DiffError),
    /// Failed to write the results index
    IndexWrite { path: PathBuf, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Config(_) = self {
            eprintln!();
            eprintln!("Run 'topodiff themes' or 'topodiff regions' to list valid names.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Client(msg) => write!(f, "Failed to build HTTP client: {}", msg),
            CliError::Init(e) => write!(f, "Failed to prepare output directory: {}", e),
            CliError::IndexWrite { path, error } => {
                write!(f, "Failed to write index '{}': {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Init(e) => Some(e),
            CliError::IndexWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}
