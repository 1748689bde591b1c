//! Analysis units
//!
//! An `AnalysisUnit` is the analysis of one source buffer or file under a
//! context: the decoded text, the token stream, the parse tree and every
//! diagnostic found along the way. Units are owned by their context, one per
//! filename, and are reparsed in place when the same filename is requested
//! again with new content.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::context::ContextConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token};
use crate::node::{Node, NodeData, NodeId};
use crate::parser::Parser;

/// The analysis of one source buffer or file
#[derive(Debug)]
pub struct AnalysisUnit {
    filename: String,
    text: String,
    tokens: Vec<Token>,
    arena: Vec<NodeData>,
    root: Option<NodeId>,
    diagnostics: Vec<Diagnostic>,
    config: ContextConfig,
}

impl AnalysisUnit {
    /// Build a unit from raw bytes
    pub(crate) fn from_bytes(filename: String, bytes: &[u8], config: ContextConfig) -> Self {
        let mut unit = Self {
            filename,
            text: String::new(),
            tokens: Vec::new(),
            arena: Vec::new(),
            root: None,
            diagnostics: Vec::new(),
            config,
        };
        unit.analyze_bytes(bytes);
        unit
    }

    /// Build a unit by reading a file; a read failure becomes a diagnostic,
    /// not an error, so the unit always exists
    pub(crate) fn from_file(filename: String, path: &Path, config: ContextConfig) -> Self {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(filename, &bytes, config),
            Err(err) => {
                let mut unit = Self {
                    filename,
                    text: String::new(),
                    tokens: Vec::new(),
                    arena: Vec::new(),
                    root: None,
                    diagnostics: Vec::new(),
                    config,
                };
                unit.diagnostics.push(Diagnostic::without_location(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    err
                )));
                unit
            }
        }
    }

    /// Decode, lex and parse, replacing any previous analysis
    fn analyze_bytes(&mut self, bytes: &[u8]) {
        let (text, mut diagnostics) = self.config.charset().decode(bytes);
        debug!(
            filename = %self.filename,
            bytes = bytes.len(),
            "analyzing unit"
        );

        let (tokens, lex_diagnostics) =
            Lexer::new(&text, self.config.tab_stop(), self.config.with_trivia()).lex();
        diagnostics.extend(lex_diagnostics);

        let outcome = Parser::new(&tokens).parse(&text);
        diagnostics.extend(outcome.diagnostics);

        self.text = text;
        self.tokens = tokens;
        self.arena = outcome.arena;
        self.root = outcome.root;
        self.diagnostics = diagnostics;
    }

    /// Reparse from a new in-memory buffer
    ///
    /// Outstanding `NodeId`s refer to the previous tree and will no longer
    /// resolve through [`AnalysisUnit::node`].
    pub fn reparse_from_buffer(&mut self, bytes: &[u8]) {
        self.analyze_bytes(bytes);
    }

    /// Reparse by re-reading a file
    pub fn reparse_from_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => self.analyze_bytes(&bytes),
            Err(err) => {
                self.text.clear();
                self.tokens.clear();
                self.arena.clear();
                self.root = None;
                self.diagnostics = vec![Diagnostic::without_location(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    err
                ))];
            }
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Decoded source text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Root of the parse tree; `None` when nothing parsed
    pub fn root(&self) -> Option<Node<'_>> {
        self.root.map(|id| Node::new(self, id))
    }

    /// Resolve a node id against the current tree
    pub fn node(&self, id: NodeId) -> Result<Node<'_>> {
        if id.index() < self.arena.len() {
            Ok(Node::new(self, id))
        } else {
            Err(Error::StaleNode {
                id: id.0,
                unit: self.filename.clone(),
            })
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub(crate) fn arena(&self) -> &[NodeData] {
        &self.arena
    }
}
