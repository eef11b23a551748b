//! Keyword literals.
//!
//! `true`, `false`, `null` and `undefined` each have exactly one node,
//! stored in a static. Every parse of every source points at the same four
//! addresses, so `std::ptr::eq` identifies them.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    True,
    False,
    Null,
    Undefined,
}

pub static TRUE: Literal = Literal::True;
pub static FALSE: Literal = Literal::False;
pub static NULL: Literal = Literal::Null;
pub static UNDEFINED: Literal = Literal::Undefined;

impl Literal {
    /// The shared node for a keyword, or `None` if `word` is not a literal.
    pub fn from_keyword(word: &str) -> Option<&'static Literal> {
        match word {
            "true" => Some(&TRUE),
            "false" => Some(&FALSE),
            "null" => Some(&NULL),
            "undefined" => Some(&UNDEFINED),
            _ => None,
        }
    }

    /// The shared `undefined` node, used for elided array elements.
    #[inline]
    pub fn undefined() -> &'static Literal {
        &UNDEFINED
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Literal::True => "true",
            Literal::False => "false",
            Literal::Null => "null",
            Literal::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
