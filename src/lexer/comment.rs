//! Line comment removal
//!
//! A comment runs from `;;` to the end of its line. The line terminator is
//! kept so line numbers survive stripping. String literals are not
//! recognized here: a `;;` inside quotes still starts a comment.

use logos::Logos;
use std::borrow::Cow;

/// Pieces of raw source as seen by the comment remover
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Piece {
    // Everything up to, not including, the next '\n'
    #[regex(r";;[^\n]*")]
    Comment,

    #[regex(r"[^;]+")]
    Text,

    // A lone ';' is ordinary text
    #[token(";")]
    Semicolon,
}

/// Remove every `;;` comment from `source`.
///
/// Returns the input unchanged (borrowed) when it contains no comment marker.
pub fn strip_comments(source: &str) -> Cow<'_, str> {
    if !source.contains(";;") {
        return Cow::Borrowed(source);
    }

    let mut stripped = String::with_capacity(source.len());
    let mut pieces = Piece::lexer(source);

    while let Some(piece) = pieces.next() {
        match piece {
            Ok(Piece::Comment) => {
                log::trace!("stripped comment at {:?}", pieces.span());
            }
            Ok(Piece::Text) | Ok(Piece::Semicolon) | Err(_) => {
                stripped.push_str(pieces.slice());
            }
        }
    }

    Cow::Owned(stripped)
}
