//! Static character classification.
//!
//! One byte of class bits per code unit, built at compile time. Non-ASCII
//! bytes carry no class: the lexer decodes the full character when it needs
//! to know more (Unicode whitespace, error messages).

use bitflags::bitflags;

bitflags! {
    /// Classes a code unit belongs to.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct CharClass: u8 {
        /// `0`-`9`.
        const DIGIT = 1 << 0;
        /// `0`-`7`.
        const OCTAL = 1 << 1;
        /// `0`-`9`, `a`-`f`, `A`-`F`.
        const HEX = 1 << 2;
        /// `a`-`z`, `A`-`Z`, `_`, `$`.
        const IDENT_START = 1 << 3;
        /// `IDENT_START` plus digits.
        const IDENT_CONTINUE = 1 << 4;
        /// `'` and `"`.
        const QUOTE = 1 << 5;
        /// Control characters, space and DEL.
        const SPACE = 1 << 6;
    }
}

/// Width of a tab when computing columns.
pub const TAB_WIDTH: u32 = 4;

static TABLE: [CharClass; 256] = build_table();

const fn build_table() -> [CharClass; 256] {
    let mut table = [CharClass::empty(); 256];
    let mut b = 0usize;
    while b < 256 {
        #[allow(clippy::cast_possible_truncation, reason = "b < 256")]
        let c = b as u8;
        let mut class = CharClass::empty();
        if c.is_ascii_digit() {
            class = class
                .union(CharClass::DIGIT)
                .union(CharClass::HEX)
                .union(CharClass::IDENT_CONTINUE);
            if c <= b'7' {
                class = class.union(CharClass::OCTAL);
            }
        }
        if matches!(c, b'a'..=b'f' | b'A'..=b'F') {
            class = class.union(CharClass::HEX);
        }
        if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
            class = class
                .union(CharClass::IDENT_START)
                .union(CharClass::IDENT_CONTINUE);
        }
        if c == b'\'' || c == b'"' {
            class = class.union(CharClass::QUOTE);
        }
        if c <= b' ' || c == 0x7F {
            class = class.union(CharClass::SPACE);
        }
        table[b] = class;
        b += 1;
    }
    table
}

/// Classes of a code unit.
#[inline]
pub fn class_of(b: u8) -> CharClass {
    TABLE[b as usize]
}

#[inline]
fn has(b: u8, class: CharClass) -> bool {
    class_of(b).intersects(class)
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    has(b, CharClass::DIGIT)
}

#[inline]
pub fn is_octal_digit(b: u8) -> bool {
    has(b, CharClass::OCTAL)
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    has(b, CharClass::HEX)
}

#[inline]
pub fn is_binary_digit(b: u8) -> bool {
    b == b'0' || b == b'1'
}

#[inline]
pub fn is_ident_start(b: u8) -> bool {
    has(b, CharClass::IDENT_START)
}

#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    has(b, CharClass::IDENT_CONTINUE)
}

#[inline]
pub fn is_quote(b: u8) -> bool {
    has(b, CharClass::QUOTE)
}

/// ASCII whitespace and control characters.
///
/// Unicode whitespace (NBSP, line separators, ...) is multi-byte and is
/// handled by the lexer after decoding.
#[inline]
pub fn is_space(b: u8) -> bool {
    has(b, CharClass::SPACE)
}
