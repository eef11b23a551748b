//! Comment body scanning.
//!
//! Comment bodies are skipped with `memchr` instead of a byte-at-a-time
//! loop. Both helpers return absolute offsets into `buf`.

use memchr::{memchr, memchr_iter, memmem};

/// Offset of the next `\n` at or after `from`, or `buf.len()` when the line
/// runs to the end of input.
#[inline]
pub fn line_end(buf: &[u8], from: usize) -> usize {
    let from = from.min(buf.len());
    memchr(b'\n', &buf[from..]).map_or(buf.len(), |i| from + i)
}

/// Where a block comment whose body starts at `from` closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockComment {
    /// Offset just past the closing `*/`.
    pub end: usize,
    /// Number of `\n` inside the comment body.
    pub newlines: usize,
    /// Offset just past the last `\n` inside the body, if any.
    pub last_line_start: Option<usize>,
}

/// Find the closing `*/` of a block comment whose body starts at `from`.
///
/// Returns `None` when the input ends before the comment is closed.
pub fn block_comment_end(buf: &[u8], from: usize) -> Option<BlockComment> {
    let from = from.min(buf.len());
    let close = from + memmem::find(&buf[from..], b"*/")?;
    let body = &buf[from..close];
    let mut newlines = 0;
    let mut last_line_start = None;
    for i in memchr_iter(b'\n', body) {
        newlines += 1;
        last_line_start = Some(from + i + 1);
    }
    Some(BlockComment {
        end: close + 2,
        newlines,
        last_line_start,
    })
}
