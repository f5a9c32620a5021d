//! Lexing sessions.
//!
//! A session owns one source text, lexes it eagerly with skipped-input
//! reporting turned on and offers the renderings the command line needs.

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{line_starts, SimpleFiles};
use codespan_reporting::term::termcolor::WriteColor;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

use crate::error::{LexError, LexResult};
use crate::lexer::{Lexer, SkippedSpan, Span, TokenKind, TokenWithPosition};

/// State for lexing a single source
pub struct LexSession {
    source_name: String,
    source: String,
    stripped: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
    tokens: Vec<TokenWithPosition>,
    skipped: Vec<SkippedSpan>,
    source_line_starts: Vec<usize>,
    stripped_line_starts: Vec<usize>,
}

impl LexSession {
    /// Read and lex a file
    pub fn load<P: AsRef<Path>>(path: P) -> LexResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LexError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_string(path.display().to_string(), source))
    }

    /// Lex an in-memory source registered under `name`
    pub fn from_string(name: impl Into<String>, source: String) -> Self {
        let source_name = name.into();
        log::debug!("lexing {}", source_name);

        let mut lexer = Lexer::new(&source).report_skipped(true);
        let tokens = lexer.collect_tokens();
        let stripped = lexer.source().to_owned();
        let skipped = lexer.into_skipped();

        log::debug!(
            "{}: {} token(s), {} skipped span(s)",
            source_name,
            tokens.len(),
            skipped.len()
        );

        let source_line_starts = line_starts(&source).collect();
        let stripped_line_starts = line_starts(&stripped).collect();

        let mut files = SimpleFiles::new();
        let file_id = files.add(source_name.clone(), source.clone());

        Self {
            source_name,
            source,
            stripped,
            files,
            file_id,
            tokens,
            skipped,
            source_line_starts,
            stripped_line_starts,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The source with comments removed
    pub fn stripped(&self) -> &str {
        &self.stripped
    }

    pub fn tokens(&self) -> &[TokenWithPosition] {
        &self.tokens
    }

    pub fn skipped(&self) -> &[SkippedSpan] {
        &self.skipped
    }

    /// Token count per kind, in order of first appearance
    pub fn kind_counts(&self) -> IndexMap<TokenKind, usize> {
        let mut counts = IndexMap::new();
        for t in &self.tokens {
            *counts.entry(t.token.kind).or_insert(0) += 1;
        }
        counts
    }

    /// One token per line, optionally with its line and column
    pub fn render_text(&self, positions: bool) -> String {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if positions {
                    format!("{:4}: {} @ {}", i, t.token, t.position)
                } else {
                    format!("{:4}: {}", i, t.token)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_json(&self) -> LexResult<String> {
        Ok(serde_json::to_string_pretty(&self.tokens)?)
    }

    /// Map a span of the stripped text back onto the raw source.
    ///
    /// Stripping only drops line tails, so the line and the offset within it
    /// are unchanged.
    fn source_span(&self, span: &Span) -> Span {
        let line = match self.stripped_line_starts.binary_search(&span.start) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let offset = span.start - self.stripped_line_starts[line];
        let start = self.source_line_starts[line] + offset;
        start..start + span.len()
    }

    /// A warning per skipped span
    pub fn diagnostics(&self) -> Vec<Diagnostic<usize>> {
        self.skipped
            .iter()
            .map(|s| {
                Diagnostic::warning()
                    .with_message(format!("unrecognized input '{}'", s.text))
                    .with_labels(vec![Label::primary(self.file_id, self.source_span(&s.span))
                        .with_message("no token matches here; skipped")])
            })
            .collect()
    }

    pub fn emit_diagnostics(&self, writer: &mut dyn WriteColor) -> LexResult<()> {
        let config = codespan_reporting::term::Config::default();
        for diagnostic in self.diagnostics() {
            codespan_reporting::term::emit(writer, &config, &self.files, &diagnostic)?;
        }
        Ok(())
    }

    /// Fail when `strict` is set and anything was skipped
    pub fn check(&self, strict: bool) -> LexResult<()> {
        if strict && !self.skipped.is_empty() {
            return Err(LexError::SkippedInput {
                count: self.skipped.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codespan_reporting::term::termcolor::NoColor;
    use pretty_assertions::assert_eq;

    fn session(source: &str) -> LexSession {
        LexSession::from_string("test.scm", source.to_string())
    }

    #[test]
    fn test_kind_counts_in_first_seen_order() {
        let counts = session("(a 1 b)").kind_counts();
        let pairs: Vec<_> = counts.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                (TokenKind::LeftParen, 1),
                (TokenKind::Name, 2),
                (TokenKind::Number, 1),
                (TokenKind::RightParen, 1),
            ]
        );
    }

    #[test]
    fn test_render_text() {
        let s = session("(x)");
        assert_eq!(
            s.render_text(false),
            "   0: LPAR \"(\"\n   1: NAME \"x\"\n   2: RPAR \")\""
        );
        assert!(s.render_text(true).starts_with("   0: LPAR \"(\" @ 1:1"));
    }

    #[test]
    fn test_source_span_skips_comments() {
        let s = session(";; c\n  @ x ;; tail\n[");
        assert_eq!(s.stripped(), "\n  @ x \n[");

        let spans: Vec<_> = s.skipped().iter().map(|k| s.source_span(&k.span)).collect();
        assert_eq!(spans, vec![7..8, 19..20]);
        assert_eq!(&s.source()[7..8], "@");
        assert_eq!(&s.source()[19..20], "[");
    }

    #[test]
    fn test_source_span_on_many_lines() {
        let source: String = (0..200)
            .map(|i| format!("(x{}) ;; note {}\n  @\n", i, i))
            .collect();
        let s = session(&source);

        assert_eq!(s.stripped_line_starts.len(), s.source_line_starts.len());
        assert_eq!(s.skipped().len(), 200);
        for k in s.skipped() {
            assert_eq!(&s.source()[s.source_span(&k.span)], "@");
        }
    }

    #[test]
    fn test_emit_diagnostics() {
        let s = session("(a @)");
        let mut out = NoColor::new(Vec::new());
        s.emit_diagnostics(&mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("warning: unrecognized input '@'"));
        assert!(text.contains("test.scm"));
    }

    #[test]
    fn test_check() {
        assert!(session("(ok)").check(true).is_ok());
        assert!(session("(a @)").check(false).is_ok());
        assert!(matches!(
            session("@ ~").check(true),
            Err(LexError::SkippedInput { count: 2 })
        ));
    }
}
