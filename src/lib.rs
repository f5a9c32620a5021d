//! Lisplex
//!
//! Lexical analysis for a small Lisp/Scheme-like language: comment removal
//! and a priority-ordered pattern scanner producing classified tokens.

pub mod driver;
pub mod error;
pub mod lexer;

// Re-export commonly used types
pub use error::{LexError, LexResult};
pub use lexer::{lex, Lexer, Token, TokenKind, TokenWithPosition};
