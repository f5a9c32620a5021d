//! Error types for the driver and command-line front end.
//!
//! The lexer itself never fails; these cover reading input, strict checking
//! and rendering output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised by strict checking when any input was skipped
    #[error("{count} unrecognized input span(s)")]
    SkippedInput { count: usize },

    #[error("failed to render output: {0}")]
    Render(String),
}

pub type LexResult<T> = Result<T, LexError>;

impl From<serde_json::Error> for LexError {
    fn from(e: serde_json::Error) -> Self {
        LexError::Render(e.to_string())
    }
}

impl From<codespan_reporting::files::Error> for LexError {
    fn from(e: codespan_reporting::files::Error) -> Self {
        LexError::Render(e.to_string())
    }
}
