//! Code-point streams the scanners read from.
//!
//! Positions are code-point indices, not byte offsets.
//! `None` from [`Input::next`] or [`Input::peek`] is the end-of-input sentinel.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INPUT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a stream, used to key the name-lookahead cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputId(u64);

impl InputId {
    pub fn fresh() -> Self {
        InputId(NEXT_INPUT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A cursor over source code points, borrowed by a scanner for one token decision.
pub trait Input {
    /// The code point under the cursor.
    fn next(&self) -> Option<char> {
        self.peek(0)
    }

    /// The code point `offset` positions away from the cursor.
    fn peek(&self, offset: isize) -> Option<char>;

    fn advance(&mut self);

    /// Absolute position of the cursor.
    fn pos(&self) -> usize;

    fn id(&self) -> InputId;
}

pub struct StrInput<'s> {
    source: &'s str,
    chars: Vec<char>,
    /// Byte offset of every code point, followed by `source.len()`.
    offsets: Vec<usize>,
    pos: usize,
    id: InputId,
}

impl<'s> StrInput<'s> {
    pub fn new(source: &'s str) -> Self {
        let (offsets, chars): (Vec<_>, Vec<_>) = source.char_indices().unzip();
        let mut offsets = offsets;
        offsets.push(source.len());
        Self {
            source,
            chars,
            offsets,
            pos: 0,
            id: InputId::fresh(),
        }
    }

    /// Number of code points.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Move the cursor to an absolute position, clamped to the end.
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.chars.len());
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.source[self.offsets[self.pos]..].starts_with(s)
    }

    /// Source text between two code-point positions.
    pub fn slice(&self, start: usize, end: usize) -> &'s str {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        &self.source[self.offsets[start]..self.offsets[end]]
    }

    /// Position of the next occurrence of an ASCII byte at or after the cursor.
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        let from = self.offsets[self.pos];
        memchr::memchr(byte, &self.source.as_bytes()[from..]).map(|found| self.char_pos(from + found))
    }

    /// Position of the next occurrence of either ASCII byte at or after the cursor.
    pub fn find_any2(&self, a: u8, b: u8) -> Option<usize> {
        let from = self.offsets[self.pos];
        memchr::memchr2(a, b, &self.source.as_bytes()[from..])
            .map(|found| self.char_pos(from + found))
    }

    /// Position of the next occurrence of `needle` at or after the cursor.
    pub fn find(&self, needle: &str) -> Option<usize> {
        let from = self.offsets[self.pos];
        memchr::memmem::find(&self.source.as_bytes()[from..], needle.as_bytes())
            .map(|found| self.char_pos(from + found))
    }

    fn char_pos(&self, byte: usize) -> usize {
        self.offsets
            .binary_search(&byte)
            .unwrap_or_else(|insert_at| insert_at)
    }
}

impl Input for StrInput<'_> {
    fn peek(&self, offset: isize) -> Option<char> {
        let index = self.pos.checked_add_signed(offset)?;
        self.chars.get(index).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn id(&self) -> InputId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_and_advance() {
        let mut input = StrInput::new("aé<");
        assert_eq!(input.next(), Some('a'));
        assert_eq!(input.peek(1), Some('é'));
        assert_eq!(input.peek(-1), None);
        input.advance();
        assert_eq!(input.peek(-1), Some('a'));
        input.advance();
        input.advance();
        assert_eq!(input.next(), None);
        input.advance();
        assert_eq!(input.pos(), 3);
    }

    #[test]
    fn slices_by_code_point() {
        let input = StrInput::new("héllo<b>");
        assert_eq!(input.slice(1, 5), "éllo");
        assert_eq!(input.find_any2(b'<', b'{'), Some(5));
        assert_eq!(input.find("b>"), Some(6));
    }

    #[test]
    fn every_stream_has_its_own_id() {
        assert_ne!(StrInput::new("a").id(), StrInput::new("a").id());
    }
}
