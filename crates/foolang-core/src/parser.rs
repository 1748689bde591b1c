//! Parser for foolang token streams
//!
//! Recursive descent over the token stream, building the node arena a unit
//! owns. Parsing recovers from errors: an unexpected token at item position
//! is reported and skipped, and the items that did parse still make it into
//! the tree.
//!
//! Copyright (c) 2025 Foolang Team
//! Licensed under the Apache-2.0 license

use crate::diagnostics::Diagnostic;
use crate::lexer::{Token, TokenKind};
use crate::node::{NodeData, NodeId, NodeKind};
use crate::text::SourceLocationRange;

/// Everything a parse run produces
#[derive(Debug)]
pub struct ParseOutcome {
    pub arena: Vec<NodeData>,
    pub root: Option<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parser state over one token stream
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    arena: Vec<NodeData>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            arena: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse a whole unit: `item+` where `item ::= "example" | "null"`
    pub fn parse(mut self, source: &str) -> ParseOutcome {
        let mut items = Vec::new();

        loop {
            let token = self.next_significant();
            match token.kind {
                TokenKind::Termination => break,
                TokenKind::Example => items.push(self.push_item(NodeKind::Example, token)),
                TokenKind::Null => items.push(self.push_item(NodeKind::NullItem, token)),
                TokenKind::Identifier => {
                    self.diagnostics.push(Diagnostic::new(
                        token.sloc_range,
                        format!(
                            "Expected 'example' or 'null', got {:?}",
                            token.text(source)
                        ),
                    ));
                }
                TokenKind::LexingFailure => {
                    // Already diagnosed by the lexer; just skip it
                }
                TokenKind::Whitespace | TokenKind::Comment => unreachable!("trivia is filtered"),
            }
        }

        let root = if items.is_empty() {
            if self.diagnostics.is_empty() {
                self.diagnostics.push(Diagnostic::new(
                    self.tokens
                        .last()
                        .map(|t| t.sloc_range)
                        .unwrap_or(SourceLocationRange::NONE),
                    "Expected 'example', got end of input",
                ));
            }
            None
        } else {
            let sloc_range = items
                .iter()
                .map(|&id| self.arena[id.index()].sloc_range)
                .fold(SourceLocationRange::NONE, SourceLocationRange::merge);
            let start = self.arena[items[0].index()].start;
            let end = self.arena[items[items.len() - 1].index()].end;
            let id = NodeId(self.arena.len() as u32);
            self.arena.push(NodeData {
                kind: NodeKind::ItemList,
                sloc_range,
                start,
                end,
                children: items,
            });
            Some(id)
        };

        ParseOutcome {
            arena: self.arena,
            root,
            diagnostics: self.diagnostics,
        }
    }

    /// Next non-trivia token; the stream always ends with `Termination`
    fn next_significant(&mut self) -> Token {
        loop {
            let token = self.tokens[self.position.min(self.tokens.len() - 1)];
            if token.kind != TokenKind::Termination {
                self.position += 1;
            }
            if !token.kind.is_trivia() {
                return token;
            }
        }
    }

    fn push_item(&mut self, kind: NodeKind, token: Token) -> NodeId {
        let id = NodeId(self.arena.len() as u32);
        self.arena.push(NodeData {
            kind,
            sloc_range: token.sloc_range,
            start: token.start,
            end: token.end,
            children: Vec::new(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::text::SourceLocation;

    fn parse(input: &str) -> ParseOutcome {
        let (tokens, _) = Lexer::new(input, 8, true).lex();
        Parser::new(&tokens).parse(input)
    }

    #[test]
    fn test_parse_items() {
        let outcome = parse("example null example");
        assert!(outcome.diagnostics.is_empty());
        let root = &outcome.arena[outcome.root.unwrap().index()];
        assert_eq!(root.kind, NodeKind::ItemList);
        let kinds: Vec<_> = root
            .children
            .iter()
            .map(|id| outcome.arena[id.index()].kind)
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Example, NodeKind::NullItem, NodeKind::Example]
        );
    }

    #[test]
    fn test_root_covers_all_items() {
        let outcome = parse("example\n  null");
        let root = &outcome.arena[outcome.root.unwrap().index()];
        assert_eq!(root.sloc_range.start, SourceLocation::new(1, 1));
        assert_eq!(root.sloc_range.end, SourceLocation::new(2, 7));
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let outcome = parse("");
        assert!(outcome.root.is_none());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0]
            .message
            .contains("Expected 'example'"));
    }

    #[test]
    fn test_trivia_only_input_has_no_root() {
        let outcome = parse("  # just a comment\n");
        assert!(outcome.root.is_none());
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn test_unexpected_identifier_recovers() {
        let outcome = parse("example frob null");
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].message.contains("\"frob\""));
        let root = &outcome.arena[outcome.root.unwrap().index()];
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_garbage_only_input() {
        let (tokens, lex_diags) = Lexer::new("$$$", 8, true).lex();
        let outcome = Parser::new(&tokens).parse("$$$");
        assert!(outcome.root.is_none());
        assert_eq!(lex_diags.len(), 1);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].message.contains("end of input"));
    }
}
