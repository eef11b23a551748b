//! Parse errors.
//!
//! A [`ParseError`] pairs a [`ParseErrorKind`] with the text that was found
//! where something else was expected, its span, and its line and column.
//! Lexical failures met while parsing are wrapped as
//! [`ParseErrorKind::Lexical`] so callers handle one error type.

use lumen_ir::{Location, Span};
use lumen_lexer::{LexError, LexErrorKind};

/// A positioned parse failure. Parsing stops at the first one.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}, at {location}.")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Source text of the offending token; empty at end of input.
    pub found: String,
    pub span: Span,
    pub location: Location,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// Something other than `expected` came next.
    #[error("Expected {expected} but was {}", display_found(.found))]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    /// The left side of `=` is neither a name nor a member access.
    #[error("Trying to assign to a non l-value: '{target}'")]
    InvalidAssignmentTarget { target: String },
    /// An object literal key that is not a name, string, number or `[expr]`.
    #[error("Invalid key: '{key}'")]
    InvalidObjectKey { key: String },
    /// A complete expression was followed by more input.
    #[error("Unexpected input: `{rest}`")]
    UnexpectedTrailingInput { rest: String },
    #[error(transparent)]
    Lexical(LexErrorKind),
}

fn display_found(found: &str) -> &str {
    if found.is_empty() {
        "end of input"
    } else {
        found
    }
}

impl ParseError {
    #[cold]
    pub fn unexpected_token(
        expected: &'static str,
        found: &str,
        span: Span,
        location: Location,
    ) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                expected,
                found: found.to_owned(),
            },
            found: found.to_owned(),
            span,
            location,
        }
    }

    #[cold]
    pub fn invalid_assignment_target(target: String, span: Span, location: Location) -> Self {
        ParseError {
            found: target.clone(),
            kind: ParseErrorKind::InvalidAssignmentTarget { target },
            span,
            location,
        }
    }

    #[cold]
    pub fn invalid_object_key(key: &str, span: Span, location: Location) -> Self {
        ParseError {
            kind: ParseErrorKind::InvalidObjectKey {
                key: key.to_owned(),
            },
            found: key.to_owned(),
            span,
            location,
        }
    }

    /// `rest` is a short excerpt of the unconsumed input.
    #[cold]
    pub fn unexpected_trailing_input(rest: &str, span: Span, location: Location) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedTrailingInput {
                rest: rest.to_owned(),
            },
            found: rest.to_owned(),
            span,
            location,
        }
    }

    /// The offending text, or `"end of input"`.
    pub fn found_display(&self) -> &str {
        display_found(&self.found)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let found = match err.kind {
            LexErrorKind::UnexpectedCharacter(c) => c.to_string(),
            LexErrorKind::UnterminatedString | LexErrorKind::UnterminatedComment => String::new(),
        };
        ParseError {
            kind: ParseErrorKind::Lexical(err.kind),
            found,
            span: err.span,
            location: err.location,
        }
    }
}
