//! The pull lexer.
//!
//! Every pull primitive first skips whitespace and comments, so the lexer is
//! always positioned either at the end of input or at the first byte of a
//! token. Nothing is buffered: [`Lexer::peek_token`] rescans.
//!
//! # Line tracking
//!
//! Skipping and string scanning record the line number and start offset
//! of the most recent line seen. [`Lexer::location`] counts forward from there, so reporting an
//! error near the current position costs a scan of one line rather than of
//! the whole source. [`Lexer::locate`] always scans from the start and gives
//! the same answer.

use lumen_ir::{Interner, Location, Name, Span, Token, TokenKind};
use lumen_lexer_core::classes::{
    is_binary_digit, is_digit, is_hex_digit, is_ident_continue, is_ident_start, is_octal_digit,
    is_quote, is_space, TAB_WIDTH,
};
use lumen_lexer_core::scan;
use lumen_lexer_core::SymbolTable;
use tracing::trace;

use crate::{default_symbols, LexError, OperatorGroup};

/// Scanner over one source string.
pub struct Lexer<'src> {
    source: &'src str,
    /// Offset of the next unread byte.
    position: usize,
    /// Byte at `position` after the last skip, `None` at end of input.
    peek: Option<u8>,
    /// One-based line number of `line_start`.
    line: u32,
    /// Offset of the first byte of line `line`.
    line_start: usize,
    symbols: &'src SymbolTable,
    interner: Interner,
}

impl<'src> Lexer<'src> {
    /// Lex `source` with the built-in operator set.
    pub fn new(source: &'src str) -> Self {
        Self::with_symbols(source, default_symbols())
    }

    /// Lex `source` with a custom operator set.
    pub fn with_symbols(source: &'src str, symbols: &'src SymbolTable) -> Self {
        Lexer {
            source,
            position: 0,
            peek: source.as_bytes().first().copied(),
            line: 1,
            line_start: 0,
            symbols,
            interner: Interner::new(),
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    fn bytes(&self) -> &'src [u8] {
        self.source.as_bytes()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes().get(pos).copied()
    }

    // === Skipping ===

    /// Skip whitespace and comments.
    ///
    /// Returns the first significant byte, or `None` at end of input.
    pub fn advance(&mut self) -> Result<Option<u8>, LexError> {
        let bytes = self.bytes();
        let mut pos = self.position;

        while let Some(b) = bytes.get(pos).copied() {
            if b == b'\n' {
                pos += 1;
                self.note_line_start(pos);
            } else if is_space(b) {
                pos += 1;
            } else if b == b'/' && bytes.get(pos + 1) == Some(&b'/') {
                pos = scan::line_end(bytes, pos + 2);
            } else if b == b'/' && bytes.get(pos + 1) == Some(&b'*') {
                let Some(comment) = scan::block_comment_end(bytes, pos + 2) else {
                    self.position = pos;
                    let span = Span::from_range(pos..bytes.len());
                    return Err(LexError::unterminated_comment(span, self.location(pos)));
                };
                #[allow(clippy::cast_possible_truncation, reason = "line counts fit in u32")]
                let newlines = comment.newlines as u32;
                self.line += newlines;
                if let Some(start) = comment.last_line_start {
                    self.line_start = start;
                }
                pos = comment.end;
            } else if b >= 0x80 {
                match self.unicode_space_len(pos) {
                    Some(len) => pos += len,
                    None => break,
                }
            } else {
                break;
            }
        }

        self.position = pos;
        self.peek = bytes.get(pos).copied();
        Ok(self.peek)
    }

    /// Record that a line starts at `pos`.
    ///
    /// Rescanning a token that was already seen (see [`Lexer::peek_token`])
    /// passes the same newlines again; those are not counted twice.
    fn note_line_start(&mut self, pos: usize) {
        if pos > self.line_start {
            self.line += 1;
            self.line_start = pos;
        }
    }

    /// Byte length of the whitespace character at `pos`, if it is one.
    ///
    /// Covers the C1 control block as well as Unicode white space.
    fn unicode_space_len(&self, pos: usize) -> Option<usize> {
        let c = self.source.get(pos..)?.chars().next()?;
        (c.is_whitespace() || ('\u{80}'..='\u{9F}').contains(&c)).then(|| c.len_utf8())
    }

    /// The next significant byte, without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Result<Option<u8>, LexError> {
        self.advance()
    }

    /// Whether any token remains.
    pub fn has_remaining(&mut self) -> Result<bool, LexError> {
        Ok(self.advance()?.is_some())
    }

    // === Pull primitives ===

    /// Consume the punctuation byte `b` if it comes next.
    ///
    /// Fails to match when `b` is only the start of a longer operator, so
    /// `consume(b'=')` does not split `==`.
    pub fn consume(&mut self, b: u8) -> Result<bool, LexError> {
        if self.advance()? != Some(b) {
            return Ok(false);
        }
        let longest = self.symbols.all().longest_match(&self.bytes()[self.position..]);
        if longest.is_some_and(|s| s.len() > 1) {
            return Ok(false);
        }
        self.position += 1;
        Ok(true)
    }

    /// Consume the longest operator of `group` if it comes next.
    ///
    /// The operator must also be the longest match over every group, so a
    /// group never steals the prefix of another group's operator.
    pub fn consume_symbol(&mut self, group: OperatorGroup) -> Result<Option<Name>, LexError> {
        if self.advance()?.is_none() {
            return Ok(None);
        }
        let Some(matcher) = self.symbols.group(group.name()) else {
            return Ok(None);
        };
        let rest = &self.bytes()[self.position..];
        let Some(symbol) = matcher.longest_match(rest) else {
            return Ok(None);
        };
        if self.symbols.all().longest_match(rest) != Some(symbol) {
            return Ok(None);
        }
        let name = self.interner.intern(symbol);
        trace!(group = group.name(), symbol, at = self.position, "symbol");
        self.position += symbol.len();
        Ok(Some(name))
    }

    /// Consume the operator `text` if it is the longest operator next.
    pub fn consume_text(&mut self, text: &str) -> Result<bool, LexError> {
        if self.advance()?.is_none() {
            return Ok(false);
        }
        let rest = &self.bytes()[self.position..];
        if self.symbols.all().longest_match(rest) != Some(text) {
            return Ok(false);
        }
        self.position += text.len();
        Ok(true)
    }

    /// Consume an identifier or keyword if one comes next.
    pub fn next_identifier(&mut self) -> Result<Option<Token<'src>>, LexError> {
        match self.advance()? {
            Some(b) if is_ident_start(b) => Ok(Some(self.scan_identifier())),
            _ => Ok(None),
        }
    }

    /// Consume the next token, or return `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        let Some(b) = self.advance()? else {
            return Ok(None);
        };
        let start = self.position;

        let token = if b == b'0' {
            self.scan_number()
        } else if is_digit(b) || (b == b'.' && self.byte_at(start + 1).is_some_and(is_digit)) {
            self.scan_decimal()
        } else if is_ident_start(b) {
            self.scan_identifier()
        } else if is_quote(b) {
            self.scan_string(b)?
        } else {
            self.scan_symbol()?
        };

        trace!(kind = %token.kind, text = token.text, at = start, "token");
        Ok(Some(token))
    }

    /// The next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        self.advance()?;
        let saved = self.position;
        let token = self.next_token();
        self.position = saved;
        self.peek = self.byte_at(saved);
        token
    }

    /// Text of whatever comes next, for error messages.
    ///
    /// Falls back to the single character at the cursor when no token can
    /// be scanned there.
    pub fn found_text(&mut self) -> &'src str {
        match self.peek_token() {
            Ok(Some(token)) => token.text,
            Ok(None) => "",
            Err(_) => {
                let rest = self.source.get(self.position..).unwrap_or("");
                let len = rest.chars().next().map_or(0, char::len_utf8);
                &rest[..len]
            }
        }
    }

    // === Scanning ===
    //
    // Each scanner starts at `self.position`, which holds the first byte of
    // its token, and leaves `self.position` just past the token.

    fn finish(&mut self, kind: TokenKind, end: usize) -> Token<'src> {
        let start = self.position;
        let text = &self.source[start..end];
        let span = Span::from_range(start..end);
        self.position = end;
        match kind {
            TokenKind::Identifier | TokenKind::Symbol => {
                let name = self.interner.intern(text);
                Token::interned(kind, text, span, name)
            }
            TokenKind::Number | TokenKind::String => Token::new(kind, text, span),
        }
    }

    fn skip_bytes(&self, mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
        while self.byte_at(pos).is_some_and(&pred) {
            pos += 1;
        }
        pos
    }

    /// A number starting with `0`: hex, binary, legacy octal or decimal.
    fn scan_number(&mut self) -> Token<'src> {
        let start = self.position;
        let end = match self.byte_at(start + 1) {
            Some(b'x' | b'X') => self.skip_bytes(start + 2, is_hex_digit),
            Some(b'b' | b'B') => self.skip_bytes(start + 2, is_binary_digit),
            Some(b) if is_octal_digit(b) => self.skip_bytes(start + 1, is_octal_digit),
            _ => return self.scan_decimal(),
        };
        self.finish(TokenKind::Number, end)
    }

    /// Integer part, optional fraction, optional exponent.
    ///
    /// Any part may be empty; `.5`, `5.` and `1e` all scan as one token.
    fn scan_decimal(&mut self) -> Token<'src> {
        let mut pos = self.skip_bytes(self.position, is_digit);
        if self.byte_at(pos) == Some(b'.') {
            pos = self.skip_bytes(pos + 1, is_digit);
        }
        if matches!(self.byte_at(pos), Some(b'e' | b'E')) {
            pos += 1;
            if matches!(self.byte_at(pos), Some(b'+' | b'-')) {
                pos += 1;
            }
            pos = self.skip_bytes(pos, is_digit);
        }
        self.finish(TokenKind::Number, pos)
    }

    fn scan_identifier(&mut self) -> Token<'src> {
        let end = self.skip_bytes(self.position + 1, is_ident_continue);
        self.finish(TokenKind::Identifier, end)
    }

    /// A quoted string. Backslash escapes any byte, including the quote and
    /// a newline; an unescaped newline ends the literal with an error.
    fn scan_string(&mut self, quote: u8) -> Result<Token<'src>, LexError> {
        let start = self.position;
        let mut pos = start + 1;
        let mut escape = false;

        while let Some(b) = self.byte_at(pos) {
            if escape {
                escape = false;
                if b == b'\n' {
                    self.note_line_start(pos + 1);
                }
            } else if b == b'\\' {
                escape = true;
            } else if b == quote {
                return Ok(self.finish(TokenKind::String, pos + 1));
            } else if b == b'\n' {
                break;
            }
            pos += 1;
        }

        let span = Span::from_range(start..pos);
        Err(LexError::unterminated_string(span, self.location(pos)))
    }

    fn scan_symbol(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.position;
        let rest = &self.bytes()[start..];
        if let Some(symbol) = self.symbols.all().longest_match(rest) {
            return Ok(self.finish(TokenKind::Symbol, start + symbol.len()));
        }
        let found = self.source[start..].chars().next().unwrap_or('\0');
        let span = Span::from_range(start..start + found.len_utf8());
        Err(LexError::unexpected_character(found, span, self.location(start)))
    }

    // === Locations ===

    /// Line and column of `position`.
    ///
    /// Starts from the last line start seen while skipping when `position`
    /// lies at or after it.
    pub fn location(&self, position: usize) -> Location {
        if position >= self.line_start {
            count_from(self.bytes(), self.line_start, self.line, position)
        } else {
            Self::locate(self.source, position)
        }
    }

    /// Line and column of `position`, scanning `source` from the start.
    pub fn locate(source: &str, position: usize) -> Location {
        count_from(source.as_bytes(), 0, 1, position)
    }
}

/// Count lines and columns over `bytes[from..to]`, starting at column 1 of
/// `line`. Columns count characters, not bytes; a tab counts as four.
fn count_from(bytes: &[u8], from: usize, line: u32, to: usize) -> Location {
    let to = to.min(bytes.len());
    let mut location = Location { line, column: 1 };
    for &b in bytes.get(from..to).unwrap_or(&[]) {
        match b {
            b'\n' => {
                location.line += 1;
                location.column = 1;
            }
            b'\t' => location.column += TAB_WIDTH,
            // UTF-8 continuation bytes belong to the previous character.
            _ if b & 0xC0 == 0x80 => {}
            _ => location.column += 1,
        }
    }
    location
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Lex all of `source` with the built-in operator set.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests;
