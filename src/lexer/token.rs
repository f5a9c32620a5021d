//! Token definitions

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Byte range of a lexeme in the comment-stripped text
pub type Span = Range<usize>;

/// Lexeme categories, listed in matching priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Number,
    String,
    Char,
    #[serde(rename = "SINGLEQUOTE")]
    SingleQuote,
    #[serde(rename = "LPAR")]
    LeftParen,
    #[serde(rename = "RPAR")]
    RightParen,
    Bool,
    Name,
}

impl TokenKind {
    /// Upper-case label used when printing and serializing
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Char => "CHAR",
            TokenKind::SingleQuote => "SINGLEQUOTE",
            TokenKind::LeftParen => "LPAR",
            TokenKind::RightParen => "RPAR",
            TokenKind::Bool => "BOOL",
            TokenKind::Name => "NAME",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme. `value` is the exact source text, undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.value)
    }
}

/// Line and column (both 1-based, columns counted in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Advance over every character of `text`
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.advance(ch);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token together with where it was found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenWithPosition {
    #[serde(flatten)]
    pub token: Token,
    pub position: Position,
    pub span: Span,
}

/// A run of non-whitespace characters that no pattern matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSpan {
    pub text: String,
    pub position: Position,
    pub span: Span,
}
