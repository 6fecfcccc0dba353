//! Text buffer implementation using ropey.

use ropey::Rope;
use std::fs;
use std::io::{self, BufReader};
use std::path::Path;

/// Structural placeholder a block container holds while it has no content.
///
/// A zero width joiner: it keeps the block one character long so the caret
/// can sit inside it.
pub const EMPTY_BLOCK_MARKER: char = '\u{200D}';

/// A text buffer backed by a rope data structure.
///
/// All offsets are character indices, never bytes.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a text buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Loads a text buffer from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let rope = Rope::from_reader(reader)?;
        Ok(Self { rope })
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Inserts a string at the given character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Removes text in the given character range.
    pub fn remove(&mut self, start: usize, end: usize) {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Replaces the given character range with `text`.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) {
        self.remove(start, end);
        self.insert(start, text);
    }

    /// Returns the text in `[start, end)`, or None if the range is invalid.
    pub fn slice(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end > self.len_chars() {
            return None;
        }
        Some(self.rope.slice(start..end).to_string())
    }

    /// Returns the character at the given index, if it exists.
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        if char_idx < self.len_chars() {
            Some(self.rope.char(char_idx))
        } else {
            None
        }
    }

    /// Returns the entire buffer as a string.
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
    }

    #[test]
    fn test_insert_string() {
        let mut buf = TextBuffer::new();
        buf.insert(0, "hello");
        buf.insert(5, " world");
        assert_eq!(buf.to_string(), "hello world");
    }

    #[test]
    fn test_insert_past_end_clamps() {
        let mut buf = TextBuffer::from_str("ab");
        buf.insert(10, "c");
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn test_remove() {
        let mut buf = TextBuffer::from_str("hello world");
        buf.remove(5, 11);
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_replace() {
        let mut buf = TextBuffer::from_str("hello world");
        buf.replace(6, 11, "rust");
        assert_eq!(buf.to_string(), "hello rust");
    }

    #[test]
    fn test_slice_counts_chars_not_bytes() {
        let buf = TextBuffer::from_str("caf\u{e9} au lait");
        assert_eq!(buf.slice(0, 4).as_deref(), Some("caf\u{e9}"));
        assert_eq!(buf.slice(5, 7).as_deref(), Some("au"));
        assert_eq!(buf.slice(0, 100), None);
        assert_eq!(buf.slice(3, 2), None);
    }

    #[test]
    fn test_char_at() {
        let buf = TextBuffer::from_str("a\u{200D}b");
        assert_eq!(buf.char_at(0), Some('a'));
        assert_eq!(buf.char_at(1), Some(EMPTY_BLOCK_MARKER));
        assert_eq!(buf.char_at(3), None);
    }
}
