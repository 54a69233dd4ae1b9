//! A minimal spanned error for failures that occur below the diagnostic
//! layer (e.g. while building a [`crate::source::SourceSet`]).
//!
//! User-facing compiler diagnostics are a richer type owned by the HIR
//! layer; this type exists only for the handful of structural operations in
//! this crate that can themselves fail.

use crate::span::Span;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedError {
    pub message: String,
    pub span: Span,
}

impl SpannedError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SpannedError {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for SpannedError {}

pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message_and_range() {
        let err = SpannedError::new("bad byte", Span::new(3, 4));
        assert_eq!(err.to_string(), "bad byte at 3..4");
    }
}
