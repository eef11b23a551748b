//! Lexer output.

use std::fmt;

use crate::{Name, Span};

/// Token classification.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Numeric literal text, undecoded (`0x1F`, `.5e2`).
    Number,
    /// String literal text including its quotes, undecoded.
    String,
    /// Identifier or keyword.
    Identifier,
    /// Operator or punctuation.
    Symbol,
}

impl TokenKind {
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token borrowing its text from the source.
///
/// Identifier and symbol tokens also carry the interned [`Name`] for their
/// text, shared by every occurrence within one lex.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
    pub name: Option<Name>,
}

impl<'src> Token<'src> {
    /// A token that is not interned (numbers and strings).
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Token {
            kind,
            text,
            span,
            name: None,
        }
    }

    /// An interned token (identifiers and symbols).
    pub fn interned(kind: TokenKind, text: &'src str, span: Span, name: Name) -> Self {
        Token {
            kind,
            text,
            span,
            name: Some(name),
        }
    }
}
