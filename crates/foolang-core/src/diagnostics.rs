//! Diagnostics attached to analysis units
//!
//! Lexing and parsing never abort: everything unexpected in the input is
//! recorded as a `Diagnostic` on the unit being built, and analysis carries
//! on with whatever could be recovered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::text::SourceLocationRange;

/// One problem found while building an analysis unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Where the problem is, `SourceLocationRange::NONE` when it has no
    /// precise position (e.g. a file read failure)
    pub sloc_range: SourceLocationRange,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub fn new(sloc_range: SourceLocationRange, message: impl Into<String>) -> Self {
        Self {
            sloc_range,
            message: message.into(),
        }
    }

    /// Diagnostic with no source position
    pub fn without_location(message: impl Into<String>) -> Self {
        Self::new(SourceLocationRange::NONE, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sloc_range == SourceLocationRange::NONE {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.sloc_range, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::SourceLocation;

    #[test]
    fn test_display_with_location() {
        let d = Diagnostic::new(
            SourceLocationRange::new(SourceLocation::new(1, 3), SourceLocation::new(1, 6)),
            "Invalid token, ignored",
        );
        assert_eq!(d.to_string(), "1:3-1:6: Invalid token, ignored");
    }

    #[test]
    fn test_display_without_location() {
        let d = Diagnostic::without_location("Cannot read file");
        assert_eq!(d.to_string(), "Cannot read file");
    }

    #[test]
    fn test_serialization_round_trip() {
        let d = Diagnostic::new(
            SourceLocationRange::new(SourceLocation::new(2, 1), SourceLocation::new(2, 5)),
            "Expected 'example' or 'null'",
        );
        let json = serde_json::to_string(&d).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
