//! Lumen lexer.
//!
//! A pull lexer: the parser asks for exactly what it expects next
//! (a punctuation byte, an operator from one precedence group, any token)
//! and the lexer scans just that much. Whitespace and comments are skipped
//! lazily before each request.
//!
//! Operators are recognized by the compiled matchers of a
//! [`SymbolTable`](lumen_lexer_core::SymbolTable). [`default_symbols`]
//! returns the built-in table, compiled once per process.
//!
//! Numeric and string tokens are only delimited here. Their text is decoded
//! when the expression is evaluated.

mod groups;
mod lex_error;
mod lexer;

pub use groups::{default_symbols, OperatorGroup};
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{tokenize, Lexer};
pub use lumen_lexer_core::{Matcher, SymbolTable};
