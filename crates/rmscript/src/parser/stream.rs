//! Token stream wrapper for the hand-written parser.

use crate::lexer::{Token, TokenKind};

/// Token stream with lookahead and position tracking.
///
/// The lexer guarantees a trailing `Eof` token; once the cursor runs past
/// the end the stream keeps answering with a synthetic `Eof` so parsers
/// never index out of bounds.
pub(super) struct TokenStream<'t> {
    tokens: &'t [Token],
    pos: usize,
    eof: Token,
}

impl<'t> TokenStream<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let eof_line = tokens.last().map_or(1, |t| t.line);
        Self {
            tokens,
            pos: 0,
            eof: Token {
                kind: TokenKind::Eof,
                text: String::new(),
                line: eof_line,
                column: 1,
            },
        }
    }

    /// Current token without consuming it.
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens consumed since `start`.
    pub fn tokens_since(&self, start: usize) -> &'t [Token] {
        &self.tokens[start.min(self.tokens.len())..self.pos.min(self.tokens.len())]
    }

    pub fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Error recovery: skips to just past the next newline (or to EOF).
    pub fn synchronize_to_newline(&mut self) {
        loop {
            match self.current().kind {
                TokenKind::Newline => {
                    self.advance();
                    return;
                }
                TokenKind::Eof => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Consumes a balanced `Indent`..`Dedent` region, used to discard the
    /// body of an unparseable block header.
    pub fn skip_block(&mut self) {
        if !self.at(TokenKind::Indent) {
            return;
        }
        self.advance();
        let mut depth = 1usize;
        while depth > 0 {
            match self.current().kind {
                TokenKind::Indent => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::Dedent => {
                    depth -= 1;
                    self.advance();
                }
                TokenKind::Eof => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
