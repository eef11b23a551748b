//! Lumen parser.
//!
//! Recursive descent over the precedence cascade
//!
//! ```text
//! expr           := comma
//! comma          := assignment (',' ternary)*
//! assignment     := ternary ('=' assignment)?
//! ternary        := logicalOR ('?' expr ':' expr)?
//! logicalOR      := logicalAND ('||' logicalAND)*
//! logicalAND     := equality ('&&' equality)*
//! equality       := relational (EQUALITY relational)*
//! relational     := additive (RELATIONAL additive)*
//! additive       := multiplicative (ADDITIVE multiplicative)*
//! multiplicative := unary (MULTIPLICATIVE unary)*
//! unary          := UNARY unary | postfix
//! postfix        := primary ( '(' args ')' | '[' expr ']' | '.' identifier )*
//! primary        := '(' expr ')' | '[' array ']' | '{' object '}'
//!                 | identifier | keyword | string | number
//! ```
//!
//! The upper-case groups are whatever the [`SymbolTable`] in use defines for
//! them, so configured operators slot into an existing level without any
//! change to the grammar.
//!
//! The parser pulls from a [`Lexer`] and never backtracks. A parse succeeds
//! only when the whole input was consumed.

mod error;
mod grammar;

use lumen_ir::{Expr, Span};
use lumen_lexer::{Lexer, SymbolTable};
use tracing::debug;

pub use error::{ParseError, ParseErrorKind};

/// How much unconsumed input a trailing-input error quotes.
const TRAILING_EXCERPT_CHARS: usize = 20;

/// Parser state: just the lexer it pulls from.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Parser<'src> {
    /// Parser over `source` with the built-in operators.
    pub fn new(source: &'src str) -> Self {
        Parser {
            lexer: Lexer::new(source),
        }
    }

    /// Parser over `source` with a custom operator table.
    pub fn with_symbols(source: &'src str, symbols: &'src SymbolTable) -> Self {
        Parser {
            lexer: Lexer::with_symbols(source, symbols),
        }
    }

    /// Parse one complete expression.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        debug!(source = self.lexer.source(), "parse");
        let expr = self.parse_expr()?;
        if self.lexer.has_remaining()? {
            return Err(self.trailing_input());
        }
        debug!("parse complete");
        Ok(expr)
    }

    // === Error helpers ===

    /// Consume punctuation `b` or fail naming `expected`.
    fn expect(&mut self, b: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.lexer.consume(b)? {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Error for whatever comes next, which is not `expected`.
    #[cold]
    fn unexpected(&mut self, expected: &'static str) -> ParseError {
        let start = self.lexer.position();
        let found = self.lexer.found_text();
        let span = Span::from_range(start..start + found.len());
        ParseError::unexpected_token(expected, found, span, self.lexer.location(start))
    }

    /// Error for a token that was already consumed.
    #[cold]
    fn unexpected_at(&self, expected: &'static str, found: &str, span: Span) -> ParseError {
        let location = self.lexer.location(span.start as usize);
        ParseError::unexpected_token(expected, found, span, location)
    }

    #[cold]
    fn trailing_input(&mut self) -> ParseError {
        let start = self.lexer.position();
        let rest = &self.lexer.source()[start..];
        let excerpt_len = rest
            .char_indices()
            .nth(TRAILING_EXCERPT_CHARS)
            .map_or(rest.len(), |(i, _)| i);
        let span = Span::from_range(start..self.lexer.source().len());
        ParseError::unexpected_trailing_input(
            &rest[..excerpt_len],
            span,
            self.lexer.location(start),
        )
    }
}

/// Parse `source` with the built-in operators.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(source).parse()
}

/// Parse `source` with a custom operator table.
pub fn parse_with_symbols(source: &str, symbols: &SymbolTable) -> Result<Expr, ParseError> {
    Parser::with_symbols(source, symbols).parse()
}

#[cfg(test)]
mod tests;
