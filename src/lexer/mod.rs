//! Lexical analysis.
//!
//! Source text goes through two stages: `;;` line comments are removed, then
//! the remaining text is scanned left to right against an ordered pattern
//! table. Anything no pattern accepts (whitespace included) is skipped.
//!
//! ```
//! use lisplex::lexer::{lex, Token, TokenKind};
//!
//! let tokens: Vec<Token> = lex("(+ 1 #t) ;; done").collect();
//! assert_eq!(tokens[1], Token::new(TokenKind::Name, "+"));
//! assert_eq!(tokens[3], Token::new(TokenKind::Bool, "#t"));
//! ```

mod comment;
#[allow(clippy::module_inception)]
mod lexer;
mod patterns;
mod token;

pub use comment::strip_comments;
pub use lexer::{lex, Lexer};
pub use patterns::{match_at, Matcher, PATTERNS};
pub use token::{Position, SkippedSpan, Span, Token, TokenKind, TokenWithPosition};
