//! Error types for the foolang core library
//!
//! This module defines the error handling system for the analysis library,
//! using thiserror for ergonomic error definitions and anyhow for flexible
//! error sources.

use std::path::PathBuf;
use thiserror::Error;

use crate::node::NodeKind;

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum Error {
    /// Context configuration errors (bad charset, zero tab stop, ...)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Unsupported charset name
    #[error("Unknown charset: {name:?}")]
    UnknownCharset { name: String },

    /// IO errors, with the path that failed
    #[error("IO error on {}: {message}", path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A typed node accessor was used on the wrong kind of node
    #[error("Node kind mismatch: expected {expected:?}, got {actual:?}")]
    KindMismatch {
        expected: NodeKind,
        actual: NodeKind,
    },

    /// A node handle outlived the parse it was created from
    #[error("Stale node handle: id {id} is out of range for unit {unit}")]
    StaleNode { id: u32, unit: String },

    /// No unit with the given filename exists in the context
    #[error("No such unit: {filename:?}")]
    NoSuchUnit { filename: String },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error from a plain message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an IO error carrying the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        Self::Io {
            message: source.to_string(),
            path,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = Error::configuration("tab stop must be positive");
        assert!(err.to_string().contains("tab stop must be positive"));
    }

    #[test]
    fn test_kind_mismatch_display() {
        let err = Error::KindMismatch {
            expected: NodeKind::Example,
            actual: NodeKind::NullItem,
        };
        assert!(err.to_string().contains("Example"));
        assert!(err.to_string().contains("NullItem"));
    }
}
