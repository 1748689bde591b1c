//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the analysis library
    #[error("Analysis error: {0}")]
    Core(#[from] foolang_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analyzed source has diagnostics
    #[error("{count} diagnostic(s) reported")]
    Diagnostics { count: usize },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Process exit code for this error
    ///
    /// Diagnostics in the input exit with 1 (the input is wrong); every
    /// other failure exits with 2 (the invocation or environment is wrong).
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Diagnostics { .. } => 1,
            _ => 2,
        }
    }

    /// Whether the user should be pointed at `--help`
    pub fn should_show_help(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Format an error for terminal display
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        format!("{} {}", "error:".red().bold(), error)
    } else {
        format!("error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Diagnostics { count: 3 }.exit_code(), 1);
        assert_eq!(Error::config("bad value").exit_code(), 2);
    }

    #[test]
    fn test_format_error_plain() {
        let err = Error::config("unknown charset");
        let formatted = format_error(&err, false);
        assert!(formatted.starts_with("error:"));
        assert!(formatted.contains("unknown charset"));
    }
}
