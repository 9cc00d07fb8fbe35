//! Lexer for rmscript source text.
//!
//! Hand-written character loop with significant indentation. An indent
//! stack (initially `[0]`) turns changes in leading-whitespace width into
//! `Indent`/`Dedent` tokens, Python-style; a tab counts as 4 spaces. Blank
//! and comment-only lines produce no tokens at all.
//!
//! Keywords match ASCII-case-insensitively. Identifier and description
//! payloads keep their original spelling; the parser lowercases on demand.
//!
//! The lexer never fails: unrecognized characters become error diagnostics
//! and are skipped, so a token stream is always produced.

use crate::ast::{DurationLevel, QualLevel};
use crate::error::Diagnostic;

/// Token kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Action keywords
    Turn,
    Look,
    Head,
    Tilt,
    Antenna,
    // Control keywords
    Wait,
    Picture,
    Play,
    Loop,
    Repeat,
    Description,
    // Word classes
    Direction,
    DurationKeyword,
    Qualitative,
    ClockKeyword,
    SoundBlocking,
    And,
    Identifier,
    // Literals
    Number,
    Duration,
    DescriptionText,
    // Structure
    Newline,
    Indent,
    Dedent,
    Eof,
}

/// A lexical token with its original spelling and 1-indexed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Lowercased spelling, for case-insensitive matching.
    pub fn folded(&self) -> String {
        self.text.to_ascii_lowercase()
    }
}

fn keyword_kind(word: &str) -> Option<TokenKind> {
    Some(match word {
        "turn" => TokenKind::Turn,
        "look" => TokenKind::Look,
        "head" => TokenKind::Head,
        "tilt" => TokenKind::Tilt,
        "antenna" => TokenKind::Antenna,
        "wait" => TokenKind::Wait,
        "picture" => TokenKind::Picture,
        "play" => TokenKind::Play,
        "loop" => TokenKind::Loop,
        "repeat" => TokenKind::Repeat,
        "description" => TokenKind::Description,
        _ => return None,
    })
}

fn is_direction_word(word: &str) -> bool {
    matches!(
        word,
        "left"
            | "right"
            | "up"
            | "down"
            | "both"
            | "center"
            | "straight"
            | "forward"
            | "neutral"
            | "in"
            | "inside"
            | "inward"
            | "out"
            | "outside"
            | "outward"
            | "back"
            | "backward"
            | "backwards"
    )
}

fn is_clock_keyword(word: &str) -> bool {
    matches!(word, "high" | "low" | "ext" | "int")
}

// "wait" also blocks sound playback, but the keyword table wins; the
// parser accepts the Wait token in modifier position.
fn is_blocking_word(word: &str) -> bool {
    matches!(word, "pause" | "fully" | "block" | "complete")
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Tokenizes source text. Always returns a token stream ending in `Eof`;
/// problems are reported as diagnostics alongside it.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    indent_stack: Vec<usize>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            indent_stack: vec![0],
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn push_token(&mut self, kind: TokenKind, text: impl Into<String>, line: u32, column: u32) {
        self.tokens.push(Token::new(kind, text, line, column));
    }

    fn run(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut at_line_start = true;

        while self.pos < self.chars.len() {
            if at_line_start {
                let width = self.measure_indent();
                match self.peek() {
                    None => break,
                    Some('\n') => {
                        self.advance();
                        continue;
                    }
                    Some('#') => {
                        self.skip_to_line_end();
                        if self.peek() == Some('\n') {
                            self.advance();
                        }
                        continue;
                    }
                    Some(_) => {}
                }
                self.apply_indent(width);
                at_line_start = false;
                if self.at_description_keyword() {
                    self.lex_description_line();
                }
                continue;
            }

            self.skip_inline_whitespace();
            if self.peek() == Some('#') {
                self.skip_to_line_end();
            }

            match self.peek() {
                None => break,
                Some('\n') => {
                    let line = self.line;
                    let column = self.column;
                    self.advance();
                    self.push_token(TokenKind::Newline, "\n", line, column);
                    at_line_start = true;
                }
                Some(ch) if ch.is_ascii_digit() => self.lex_number(),
                Some(ch) if ch.is_alphabetic() || ch == '_' => self.lex_word(),
                Some(ch) => {
                    self.diagnostics.push(Diagnostic::error(
                        self.line,
                        self.column,
                        format!("Unexpected character: '{ch}'"),
                    ));
                    self.advance();
                }
            }
        }

        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push_token(TokenKind::Dedent, "", self.line, 1);
        }
        let line = self.line;
        let column = self.column;
        self.push_token(TokenKind::Eof, "", line, column);

        (self.tokens, self.diagnostics)
    }

    /// Consumes leading whitespace and returns its width (tab = 4 spaces).
    /// A tab after a space inside the run is ambiguous and reported once.
    fn measure_indent(&mut self) -> usize {
        let mut width = 0;
        let mut seen_space = false;
        let mut reported = false;
        while let Some(ch) = self.peek() {
            match ch {
                ' ' => {
                    seen_space = true;
                    width += 1;
                }
                '\t' => {
                    if seen_space && !reported {
                        self.diagnostics.push(Diagnostic::error(
                            self.line,
                            self.column,
                            "Inconsistent indentation (tab after space)",
                        ));
                        reported = true;
                    }
                    width += 4;
                }
                _ => break,
            }
            self.advance();
        }
        width
    }

    fn apply_indent(&mut self, width: usize) {
        let current = self.indent_stack.last().copied().unwrap_or(0);
        if width > current {
            self.indent_stack.push(width);
            self.push_token(TokenKind::Indent, "", self.line, 1);
        } else if width < current {
            while self.indent_stack.len() > 1
                && width < self.indent_stack.last().copied().unwrap_or(0)
            {
                self.indent_stack.pop();
                self.push_token(TokenKind::Dedent, "", self.line, 1);
            }
            if self.indent_stack.last().copied().unwrap_or(0) != width {
                self.diagnostics.push(Diagnostic::error(
                    self.line,
                    self.column,
                    format!("Inconsistent indentation (level {width})"),
                ));
            }
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.advance();
        }
    }

    fn skip_to_line_end(&mut self) {
        while matches!(self.peek(), Some(ch) if ch != '\n') {
            self.advance();
        }
    }

    /// True when the next word on the line is the `DESCRIPTION` header.
    fn at_description_keyword(&self) -> bool {
        let mut offset = 0;
        let mut word = String::new();
        while let Some(ch) = self.peek_at(offset) {
            if !is_ident_char(ch) {
                break;
            }
            word.push(ch);
            offset += 1;
        }
        word.eq_ignore_ascii_case("description")
    }

    /// Lexes a `DESCRIPTION` line: the keyword token, then the trimmed
    /// remainder of the line as one `DescriptionText` token. Stops before
    /// the terminating newline.
    fn lex_description_line(&mut self) {
        let line = self.line;
        let column = self.column;
        let mut word = String::new();
        while matches!(self.peek(), Some(ch) if is_ident_char(ch)) {
            if let Some(ch) = self.advance() {
                word.push(ch);
            }
        }
        self.push_token(TokenKind::Description, word, line, column);

        self.skip_inline_whitespace();
        let text_column = self.column;
        let mut text = String::new();
        while matches!(self.peek(), Some(ch) if ch != '\n' && ch != '#') {
            if let Some(ch) = self.advance() {
                text.push(ch);
            }
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.push_token(TokenKind::DescriptionText, trimmed, line, text_column);
        }
    }

    /// Lexes a number. A trailing `s` that does not continue an identifier
    /// makes it a duration literal (`2s` yes, `2sec` no).
    fn lex_number(&mut self) {
        let line = self.line;
        let column = self.column;
        let mut text = String::new();
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            if let Some(ch) = self.advance() {
                text.push(ch);
            }
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
            text.push('.');
            while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
                if let Some(ch) = self.advance() {
                    text.push(ch);
                }
            }
        }
        if matches!(self.peek(), Some('s') | Some('S'))
            && !self.peek_at(1).is_some_and(is_ident_char)
        {
            if let Some(ch) = self.advance() {
                text.push(ch);
            }
            self.push_token(TokenKind::Duration, text, line, column);
        } else {
            self.push_token(TokenKind::Number, text, line, column);
        }
    }

    fn lex_word(&mut self) {
        let line = self.line;
        let column = self.column;
        let mut word = String::new();
        while matches!(self.peek(), Some(ch) if is_ident_char(ch)) {
            if let Some(ch) = self.advance() {
                word.push(ch);
            }
        }

        let folded = word.to_ascii_lowercase();
        let kind = if let Some(kind) = keyword_kind(&folded) {
            kind
        } else if is_direction_word(&folded) {
            TokenKind::Direction
        } else if DurationLevel::from_word(&folded).is_some() {
            TokenKind::DurationKeyword
        } else if QualLevel::from_word(&folded).is_some() {
            TokenKind::Qualitative
        } else if is_clock_keyword(&folded) {
            TokenKind::ClockKeyword
        } else if is_blocking_word(&folded) {
            TokenKind::SoundBlocking
        } else if folded == "and" {
            TokenKind::And
        } else {
            TokenKind::Identifier
        };
        self.push_token(kind, word, line, column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, diagnostics) = tokenize(source);
        assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let (tokens, _) = tokenize("LOOK Left\nturn RIGHT");
        assert_eq!(tokens[0].kind, TokenKind::Look);
        assert_eq!(tokens[0].text, "LOOK");
        assert_eq!(tokens[1].kind, TokenKind::Direction);
        assert_eq!(tokens[1].folded(), "left");
        assert_eq!(tokens[3].kind, TokenKind::Turn);
    }

    #[test]
    fn test_positions_are_one_indexed() {
        let (tokens, _) = tokenize("look left");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 6));
    }

    #[test]
    fn test_number_and_duration() {
        let (tokens, _) = tokenize("turn left 30 2.5s");
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].text, "30");
        assert_eq!(tokens[3].kind, TokenKind::Duration);
        assert_eq!(tokens[3].text, "2.5s");
    }

    #[test]
    fn test_duration_suffix_must_end_word() {
        // "2sec" is a number followed by an identifier, not a duration.
        let (tokens, _) = tokenize("wait 2sec");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].text, "2");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].text, "sec");
    }

    #[test]
    fn test_word_classes() {
        let (tokens, _) = tokenize("look left tiny fast and high pause mysound");
        let got: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            got,
            vec![
                TokenKind::Look,
                TokenKind::Direction,
                TokenKind::Qualitative,
                TokenKind::DurationKeyword,
                TokenKind::And,
                TokenKind::ClockKeyword,
                TokenKind::SoundBlocking,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_preserves_case() {
        let (tokens, _) = tokenize("play MySound");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "MySound");
    }

    #[test]
    fn test_indent_dedent() {
        assert_eq!(
            kinds("repeat 2\n    look left\nwait 1s\n"),
            vec![
                TokenKind::Repeat,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Look,
                TokenKind::Direction,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Wait,
                TokenKind::Duration,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dedent_closed_at_eof() {
        let got = kinds("repeat 2\n    look left");
        assert_eq!(got.last(), Some(&TokenKind::Eof));
        assert_eq!(got[got.len() - 2], TokenKind::Dedent);
    }

    #[test]
    fn test_nested_blocks_emit_multiple_dedents() {
        let got = kinds("repeat 2\n    repeat 3\n        look left\n");
        let dedents = got.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(dedents, 2);
    }

    #[test]
    fn test_tab_counts_as_four_spaces() {
        // Tab-indented body dedents cleanly against a 4-space sibling.
        let got = kinds("repeat 2\n\tlook left\n    look right\n");
        let indents = got.iter().filter(|k| **k == TokenKind::Indent).count();
        assert_eq!(indents, 1);
    }

    #[test]
    fn test_inconsistent_dedent_is_error() {
        let (_, diagnostics) = tokenize("repeat 2\n        look left\n  look right\n");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("Inconsistent indentation"))
        );
    }

    #[test]
    fn test_tab_after_space_is_error() {
        let (_, diagnostics) = tokenize("repeat 2\n \tlook left\n");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("tab after space"))
        );
    }

    #[test]
    fn test_blank_and_comment_lines_produce_no_tokens() {
        assert_eq!(
            kinds("look left\n\n# a comment\n   \nlook right\n"),
            vec![
                TokenKind::Look,
                TokenKind::Direction,
                TokenKind::Newline,
                TokenKind::Look,
                TokenKind::Direction,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_trailing_comment_stripped() {
        assert_eq!(
            kinds("look left # to the window\n"),
            vec![
                TokenKind::Look,
                TokenKind::Direction,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_description_line() {
        let (tokens, _) = tokenize("DESCRIPTION   Waves hello, twice.\nlook left");
        assert_eq!(tokens[0].kind, TokenKind::Description);
        assert_eq!(tokens[1].kind, TokenKind::DescriptionText);
        assert_eq!(tokens[1].text, "Waves hello, twice.");
        assert_eq!(tokens[2].kind, TokenKind::Newline);
    }

    #[test]
    fn test_description_keyword_lowercase() {
        let (tokens, _) = tokenize("description greeting\n");
        assert_eq!(tokens[0].kind, TokenKind::Description);
        assert_eq!(tokens[1].text, "greeting");
    }

    #[test]
    fn test_unexpected_character_skipped() {
        let (tokens, diagnostics) = tokenize("look left $\nlook right");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("Unexpected character"))
        );
        // Lexing continues past the bad character.
        let looks = tokens.iter().filter(|t| t.kind == TokenKind::Look).count();
        assert_eq!(looks, 2);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }
}
