//! Lexer errors.
//!
//! Errors follow the kind + span shape used across the workspace:
//! - `span` locates the offending text
//! - `kind` says what went wrong
//! - `location` is the one-based line and column of `span.start`, computed
//!   when the error is raised so it can be shown without the source.

use lumen_ir::{Location, Span};

/// A lexical error. Lexing stops at the first one.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}, at {location}.")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub location: Location,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// A quoted string reached a raw newline or the end of input.
    #[error("String literal not closed")]
    UnterminatedString,
    /// A `/*` comment reached the end of input.
    #[error("Comment not closed")]
    UnterminatedComment,
    /// No token starts with this character.
    #[error("Unexpected character: {0:?}")]
    UnexpectedCharacter(char),
}

impl LexError {
    #[cold]
    pub fn unterminated_string(span: Span, location: Location) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            span,
            location,
        }
    }

    #[cold]
    pub fn unterminated_comment(span: Span, location: Location) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedComment,
            span,
            location,
        }
    }

    #[cold]
    pub fn unexpected_character(found: char, span: Span, location: Location) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedCharacter(found),
            span,
            location,
        }
    }
}
