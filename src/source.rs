//! Source buffers and byte ranges.
//!
//! The lexer never converts offsets itself; everything it reports is a
//! [`Range`] of byte offsets into a [`Buffer`].  Line/column conversion is
//! only done when a diagnostic or a token dump is rendered for humans.

use serde::Serialize;
use std::fmt;

/// A half-open `[begin, end)` span of byte offsets into a [`Buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Range {
    pub begin: usize,
    pub end: usize,
}

impl Range {
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "range begins after it ends");
        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

/// An immutable, named piece of source text.
///
/// A buffer may back any number of lexers at once, e.g. to re-lex the same
/// text under a different grammar version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    name: String,
    source: String,
    /// Byte offset where each line starts.  `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
}

impl Buffer {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = line_starts(&source);
        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// The text covered by `range`.
    pub fn slice(&self, range: Range) -> &str {
        &self.source[range.begin..range.end]
    }

    /// Convert a byte offset into (line, col), both 1-indexed.  Columns count
    /// characters, not bytes.  `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let index = self.line_index(offset);
        let start = self.line_starts[index];
        let col = self.source[start..offset].chars().count() + 1;
        (index + 1, col)
    }

    /// Text of the 1-indexed `line`, without its terminator.  Lines past the
    /// end of the buffer are empty.
    pub fn line_text(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.source.len());
        self.source[start..end].trim_end_matches(['\r', '\n'])
    }

    /// Number of lines, counting a trailing empty one after a final break.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 0-indexed line containing `offset`.
    fn line_index(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }
}

fn line_starts(source: &str) -> Vec<usize> {
    let bytes = source.as_bytes();
    let mut starts = vec![0];
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\n' => starts.push(i + 1),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
            _ => {}
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_1_for_start() {
        let buf = Buffer::new("<test>", "import os\n");
        assert_eq!(buf.line_col(0), (1, 1));
    }

    #[test]
    fn test_second_line() {
        let buf = Buffer::new("<test>", "import os\nimport sys\n");
        assert_eq!(buf.line_col(10), (2, 1));
    }

    #[test]
    fn test_column_within_line() {
        let buf = Buffer::new("<test>", "x = 1\n");
        assert_eq!(buf.line_col(4), (1, 5));
    }

    #[test]
    fn test_column_counts_characters() {
        let buf = Buffer::new("<test>", "é = 1\n");
        // 'é' is two bytes but one column.
        assert_eq!(buf.line_col(3), (1, 3));
    }

    #[test]
    fn test_empty_source() {
        let buf = Buffer::new("<test>", "");
        assert_eq!(buf.line_col(0), (1, 1));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_slice_and_line_text() {
        let buf = Buffer::new("<test>", "a = 1\r\nbcd\n");
        assert_eq!(buf.slice(Range::new(7, 10)), "bcd");
        assert_eq!(buf.line_text(1), "a = 1");
        assert_eq!(buf.line_text(2), "bcd");
        assert_eq!(buf.line_text(9), "");
    }

    #[test]
    fn test_lone_carriage_return_ends_a_line() {
        let buf = Buffer::new("<test>", "a\rb\rc\r");
        assert_eq!(buf.line_col(0), (1, 1));
        assert_eq!(buf.line_col(1), (1, 2));
        assert_eq!(buf.line_col(2), (2, 1));
        assert_eq!(buf.line_col(4), (3, 1));
        assert_eq!(buf.line_text(2), "b");
        assert_eq!(buf.line_count(), 4);
    }

    #[test]
    fn test_mixed_line_endings() {
        let buf = Buffer::new("<test>", "a\r\nb\rc\nd");
        assert_eq!(buf.line_col(1), (1, 2));
        assert_eq!(buf.line_col(3), (2, 1));
        assert_eq!(buf.line_col(5), (3, 1));
        assert_eq!(buf.line_col(7), (4, 1));
        assert_eq!(buf.line_text(1), "a");
        assert_eq!(buf.line_text(3), "c");
        assert_eq!(buf.line_text(4), "d");
    }

    #[test]
    fn test_offset_at_end_of_buffer() {
        let buf = Buffer::new("<test>", "ab\n");
        assert_eq!(buf.line_col(3), (2, 1));
        assert_eq!(buf.line_col(99), (2, 1));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(Range::new(3, 5).to_string(), "3..5");
        assert_eq!(Range::new(3, 5).len(), 2);
    }
}
