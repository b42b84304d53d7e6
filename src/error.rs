//! Error taxonomy for the parser and compiled-pattern APIs.

use std::fmt;

/// Errors surfaced while turning a pattern into a compiled matcher.
#[derive(Clone, Debug)]
pub enum Error {
    /// The pattern text could not be parsed: offending text, the byte offset
    /// the parser had reached, and a human-readable reason.
    InvalidPattern { pattern: String, offset: usize, reason: String },
    /// Reserved for AST node kinds the parser can never itself produce.
    /// The safe, statically-typed public API makes this unreachable in
    /// practice, but it is kept so `Compilable` impls stay total.
    UnsupportedPatternType(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPattern { pattern, offset, reason } => {
                write!(f, "invalid pattern at byte {offset} in `{pattern}`: {reason}")
            }
            Error::UnsupportedPatternType(kind) => {
                write!(f, "unsupported pattern node type: {kind}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
