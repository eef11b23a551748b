//! Lumen lexer core: character tables and the operator symbol compiler.
//!
//! This crate has no `lumen_*` dependencies. It provides the three leaf
//! pieces the lexer is built on:
//!
//! - [`classes`]: static classification of ASCII code units (digits,
//!   identifier characters, quotes, whitespace).
//! - [`symbol_table`]: compiles named groups of operator strings into
//!   longest-match [`Matcher`]s.
//! - [`scan`]: memchr-accelerated helpers for skipping comment bodies.
//!
//! Everything here works on UTF-8 code units (`u8`). Operator strings may
//! contain non-ASCII characters; a match always ends on a character boundary
//! because every matched byte sequence is a complete operator string.

pub mod classes;
pub mod scan;
pub mod symbol_table;

pub use symbol_table::{Matcher, SymbolTable, ALL_GROUP};
