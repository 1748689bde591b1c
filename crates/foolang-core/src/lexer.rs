//! Lexer for foolang source text
//!
//! A hand-written scanner producing the foolang token stream. Lexing never
//! fails: unrecognized input degrades to `LexingFailure` tokens with a
//! diagnostic attached to the unit, so the parser always has a stream to
//! work with.
//!
//! Copyright (c) 2025 Foolang Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::diagnostics::Diagnostic;
use crate::text::{SourceLocation, SourceLocationRange};

/// Kinds of foolang tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// The `example` keyword
    Example,
    /// The `null` keyword
    Null,
    /// Any other word; always rejected by the parser, but lexing it as a
    /// unit gives better diagnostics than per-character failures
    Identifier,
    /// Whitespace trivia
    Whitespace,
    /// `#`-to-end-of-line comment trivia
    Comment,
    /// A run of characters no rule matches
    LexingFailure,
    /// Synthetic end-of-stream token
    Termination,
}

impl TokenKind {
    /// Whether this kind is trivia (whitespace or comments)
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Example => "Example",
            TokenKind::Null => "Null",
            TokenKind::Identifier => "Identifier",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::Comment => "Comment",
            TokenKind::LexingFailure => "LexingFailure",
            TokenKind::Termination => "Termination",
        };
        f.write_str(name)
    }
}

/// One token in a unit's token stream
///
/// Tokens do not own their text; `start`/`end` are byte offsets into the
/// unit's source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    pub sloc_range: SourceLocationRange,
}

impl Token {
    /// Slice this token's text out of the source buffer it was lexed from
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Scanner state for one lexing run
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<Chars<'a>>,
    /// Byte position in input
    position: usize,
    /// Current line number (1-based)
    line: u32,
    /// Current column number (1-based)
    column: u32,
    tab_stop: u32,
    keep_trivia: bool,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, tab_stop: u32, keep_trivia: bool) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            line: 1,
            column: 1,
            tab_stop,
            keep_trivia,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Lex the whole input, ending with a `Termination` token
    pub fn lex(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.lex_whitespace();
            } else if ch == '#' {
                self.lex_comment();
            } else if ch.is_alphabetic() || ch == '_' {
                self.lex_word();
            } else {
                self.lex_failure();
            }
        }

        let eof = self.location();
        self.tokens.push(Token {
            kind: TokenKind::Termination,
            start: self.position,
            end: self.position,
            sloc_range: SourceLocationRange::new(eof, eof),
        });

        (self.tokens, self.diagnostics)
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Consume one character, updating line/column bookkeeping
    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += ch.len_utf8();
        match ch {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {
                // CRLF counts as a single line break
                if self.chars.peek() == Some(&'\n') {
                    self.position += 1;
                    self.chars.next();
                }
                self.line += 1;
                self.column = 1;
            }
            '\t' => {
                self.column = ((self.column - 1) / self.tab_stop + 1) * self.tab_stop + 1;
            }
            _ => {
                self.column += 1;
            }
        }
        Some(ch)
    }

    fn push_token(&mut self, kind: TokenKind, start: usize, start_loc: SourceLocation) {
        if kind.is_trivia() && !self.keep_trivia {
            return;
        }
        self.tokens.push(Token {
            kind,
            start,
            end: self.position,
            sloc_range: SourceLocationRange::new(start_loc, self.location()),
        });
    }

    fn lex_whitespace(&mut self) {
        let start = self.position;
        let start_loc = self.location();
        while matches!(self.chars.peek(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
        self.push_token(TokenKind::Whitespace, start, start_loc);
    }

    fn lex_comment(&mut self) {
        let start = self.position;
        let start_loc = self.location();
        // Runs to end of line; a comment on the last line ends at EOF
        while matches!(self.chars.peek(), Some(&ch) if ch != '\n' && ch != '\r') {
            self.advance();
        }
        self.push_token(TokenKind::Comment, start, start_loc);
    }

    fn lex_word(&mut self) {
        let start = self.position;
        let start_loc = self.location();
        while matches!(self.chars.peek(), Some(&ch) if ch.is_alphanumeric() || ch == '_') {
            self.advance();
        }
        let kind = match &self.input[start..self.position] {
            "example" => TokenKind::Example,
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier,
        };
        self.push_token(kind, start, start_loc);
    }

    /// Group a run of unrecognized characters into one failure token
    fn lex_failure(&mut self) {
        let start = self.position;
        let start_loc = self.location();
        while matches!(
            self.chars.peek(),
            Some(&ch) if !ch.is_whitespace() && !ch.is_alphabetic() && ch != '_' && ch != '#'
        ) {
            self.advance();
        }
        let sloc_range = SourceLocationRange::new(start_loc, self.location());
        self.tokens.push(Token {
            kind: TokenKind::LexingFailure,
            start,
            end: self.position,
            sloc_range,
        });
        self.diagnostics
            .push(Diagnostic::new(sloc_range, "Invalid token, ignored"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        Lexer::new(input, 8, true).lex()
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let (tokens, diags) = lex("");
        assert_eq!(kinds(&tokens), vec![TokenKind::Termination]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_keywords_and_trivia() {
        let (tokens, diags) = lex("example null example");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Example,
                TokenKind::Whitespace,
                TokenKind::Null,
                TokenKind::Whitespace,
                TokenKind::Example,
                TokenKind::Termination,
            ]
        );
        assert!(diags.is_empty());
        assert_eq!(tokens[0].text("example null example"), "example");
        assert_eq!(tokens[2].text("example null example"), "null");
    }

    #[test]
    fn test_trivia_filtering() {
        let (tokens, _) = Lexer::new("example  null", 8, false).lex();
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Example, TokenKind::Null, TokenKind::Termination]
        );
    }

    #[test]
    fn test_identifier() {
        let (tokens, diags) = lex("examples");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_comment_without_trailing_newline() {
        let (tokens, _) = lex("example # trailing");
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].text("example # trailing"), "# trailing");
    }

    #[test]
    fn test_invalid_run_is_one_failure() {
        let (tokens, diags) = lex("example $$% null");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Example,
                TokenKind::Whitespace,
                TokenKind::LexingFailure,
                TokenKind::Whitespace,
                TokenKind::Null,
                TokenKind::Termination,
            ]
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Invalid token, ignored");
        assert_eq!(diags[0].sloc_range.start, SourceLocation::new(1, 9));
        assert_eq!(diags[0].sloc_range.end, SourceLocation::new(1, 12));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let (tokens, _) = lex("example\nnull");
        assert_eq!(tokens[2].sloc_range.start, SourceLocation::new(2, 1));
        assert_eq!(tokens[2].sloc_range.end, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_crlf_is_one_line_break() {
        let (tokens, _) = lex("example\r\nnull");
        assert_eq!(tokens[2].sloc_range.start, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_tab_stop_column_advance() {
        let (tokens, _) = Lexer::new("\texample", 8, true).lex();
        // TAB from column 1 lands on column 9 with the default tab stop
        assert_eq!(tokens[1].sloc_range.start, SourceLocation::new(1, 9));

        let (tokens, _) = Lexer::new("\texample", 4, true).lex();
        assert_eq!(tokens[1].sloc_range.start, SourceLocation::new(1, 5));
    }
}
