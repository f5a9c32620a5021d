//! The scanner

use std::borrow::Cow;

use super::comment::strip_comments;
use super::patterns::match_at;
use super::token::{Position, SkippedSpan, Token, TokenWithPosition};

/// Lexer over one source text.
///
/// Comments are stripped up front; the iterator then walks the stripped text
/// once, yielding a token per pattern match and stepping over any character
/// no pattern accepts. Spans and positions refer to the stripped text.
pub struct Lexer<'a> {
    source: Cow<'a, str>,
    cursor: usize,
    position: Position,
    report_skipped: bool,
    skipped: Vec<SkippedSpan>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let source = strip_comments(input);
        log::debug!(
            "lexing {} bytes ({} after comment removal)",
            input.len(),
            source.len()
        );

        Self {
            source,
            cursor: 0,
            position: Position::new(),
            report_skipped: false,
            skipped: Vec::new(),
        }
    }

    /// Record runs of skipped non-whitespace characters.
    /// Off by default: unmatched input is dropped silently.
    pub fn report_skipped(mut self, enabled: bool) -> Self {
        self.report_skipped = enabled;
        self
    }

    /// The comment-stripped text being scanned
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Skipped runs found so far (empty unless reporting is enabled)
    pub fn skipped(&self) -> &[SkippedSpan] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<SkippedSpan> {
        self.skipped
    }

    /// Collect the remaining tokens
    pub fn collect_tokens(&mut self) -> Vec<TokenWithPosition> {
        self.by_ref().collect()
    }

    fn skip_char(&mut self, ch: char) {
        let start = self.cursor;
        let end = start + ch.len_utf8();

        if self.report_skipped && !ch.is_whitespace() {
            match self.skipped.last_mut() {
                Some(last) if last.span.end == start => {
                    last.text.push(ch);
                    last.span.end = end;
                }
                _ => {
                    log::trace!("skipping unmatched input at {}", self.position);
                    self.skipped.push(SkippedSpan {
                        text: ch.to_string(),
                        position: self.position,
                        span: start..end,
                    });
                }
            }
        }

        self.position.advance(ch);
        self.cursor = end;
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.source[self.cursor..];
            let ch = rest.chars().next()?;

            if let Some((kind, lexeme)) = match_at(rest) {
                let start = self.cursor;
                let token = Token::new(kind, lexeme);
                let position = self.position;

                self.position.advance_str(lexeme);
                self.cursor += lexeme.len();

                return Some(TokenWithPosition {
                    token,
                    position,
                    span: start..self.cursor,
                });
            }

            self.skip_char(ch);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // every token consumes at least one byte
        (0, Some(self.source.len() - self.cursor))
    }
}

/// Lex `input` into plain tokens
pub fn lex(input: &str) -> impl Iterator<Item = Token> + '_ {
    Lexer::new(input).map(|t| t.token)
}
