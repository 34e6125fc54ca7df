/// Live editable text backed by `ropey::Rope`, addressed by char index.
use std::fmt;

use anyhow::Result;
use ropey::Rope;

/// The host-side editable buffer that search and replace operate on.
///
/// Offsets are char (Unicode scalar value) indices throughout.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl TextBuffer {
    /// Creates an empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the buffer.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Iterates over every char in the buffer.
    pub fn chars(&self) -> ropey::iter::Chars<'_> {
        self.rope.chars()
    }

    /// Returns the line index for a given char index.
    ///
    /// # Errors
    ///
    /// Returns an error if the char index is out of bounds.
    pub fn char_to_line(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char_to_line(char_idx))
    }

    /// Returns the char index of the start of a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line_to_char(&self, line_idx: usize) -> Result<usize> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(self.rope.line_to_char(line_idx))
    }

    /// Returns the content of a line, including its line break.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line(&self, line_idx: usize) -> Result<ropey::RopeSlice<'_>> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(self.rope.line(line_idx))
    }

    /// Inserts text at the given char index.
    ///
    /// # Errors
    ///
    /// Returns an error if the char index is out of bounds.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> Result<()> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "insert position {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        self.rope.insert(char_idx, text);
        Ok(())
    }

    /// Removes the character range [start..end) from the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn remove(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        self.rope.remove(start..end);
        Ok(())
    }

    /// Replaces text in the given char range with new text.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        self.remove(start, end)?;
        self.insert(start, text)?;
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end {
            anyhow::bail!("invalid range: start ({}) > end ({})", start, end);
        }
        if end > self.rope.len_chars() {
            anyhow::bail!(
                "range end {} out of bounds (buffer has {} chars)",
                end,
                self.rope.len_chars()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
    }

    #[test]
    fn test_from_str_counts_chars_and_lines() {
        let buf = TextBuffer::from("hello\nworld");
        assert_eq!(buf.len_chars(), 11);
        assert_eq!(buf.len_lines(), 2);
    }

    #[test]
    fn test_replace_shrinks_and_grows() {
        let mut buf = TextBuffer::from("hello world");
        buf.replace(0, 5, "hi").unwrap();
        assert_eq!(buf.to_string(), "hi world");
        buf.replace(3, 8, "everyone").unwrap();
        assert_eq!(buf.to_string(), "hi everyone");
    }

    #[test]
    fn test_offsets_are_chars_not_bytes() {
        let mut buf = TextBuffer::from("héllo wörld");
        assert_eq!(buf.len_chars(), 11);
        buf.replace(6, 11, "earth").unwrap();
        assert_eq!(buf.to_string(), "héllo earth");
        buf.remove(1, 2).unwrap();
        assert_eq!(buf.to_string(), "hllo earth");
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut buf = TextBuffer::from("abc");
        assert!(buf.insert(4, "x").is_err());
        assert!(buf.remove(2, 1).is_err());
        assert!(buf.replace(1, 9, "x").is_err());
        assert!(buf.char_to_line(4).is_err());
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn test_char_to_line() {
        let buf = TextBuffer::from("ab\ncd\nef");
        assert_eq!(buf.char_to_line(0).unwrap(), 0);
        assert_eq!(buf.char_to_line(3).unwrap(), 1);
        assert_eq!(buf.char_to_line(8).unwrap(), 2);
    }

    #[test]
    fn test_line_access() {
        let buf = TextBuffer::from("ab\ncd\nef");
        assert_eq!(buf.line_to_char(1).unwrap(), 3);
        assert_eq!(buf.line(1).unwrap().to_string(), "cd\n");
        assert_eq!(buf.line(2).unwrap().to_string(), "ef");
        assert!(buf.line(3).is_err());
        assert!(buf.line_to_char(3).is_err());
    }

    #[test]
    fn test_chars_iterates_whole_buffer() {
        let buf = TextBuffer::from("a\nβ");
        let chars: Vec<char> = buf.chars().collect();
        assert_eq!(chars, vec!['a', '\n', 'β']);
    }
}
