//! Foolang Core - Analysis library for the foolang language
//!
//! This crate provides the analysis front-end for foolang sources: contexts
//! that own analysis units, units that hold the token stream, parse tree and
//! diagnostics of one buffer or file, and borrowed node handles for walking
//! the tree.
//!
//! # Main Components
//!
//! - **Contexts**: [`AnalysisContext`] and its configuration builder
//! - **Units**: [`AnalysisUnit`], one per filename per context
//! - **Trees**: [`Node`] handles over the unit-owned arena
//! - **Diagnostics**: [`Diagnostic`] records; analysis never aborts
//!
//! # Example
//!
//! ```
//! use foolang_core::AnalysisContext;
//!
//! let mut ctx = AnalysisContext::default();
//! let unit = ctx.get_from_buffer("foo.txt", b"example null example");
//! assert!(!unit.has_diagnostics());
//!
//! let root = unit.root().unwrap();
//! assert_eq!(root.example_items().unwrap().len(), 2);
//! ```

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod text;
pub mod unit;

// Re-export main types for convenience
pub use context::{AnalysisContext, Charset, ContextConfig, ContextConfigBuilder};
pub use diagnostics::Diagnostic;
pub use error::{Error, Result};
pub use lexer::{Token, TokenKind};
pub use node::{count_examples, Node, NodeId, NodeKind};
pub use text::{SourceLocation, SourceLocationRange};
pub use unit::AnalysisUnit;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
