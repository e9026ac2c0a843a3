//! Text range types and line lookup for source location tracking.
//!
//! These types are used throughout the front end to track where tokens and
//! diagnostics originate in the source code. Offsets are char indices into
//! the source buffer, since the scanner indexes the text char by char.

use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a char offset from the start.
pub type TextPos = u32;

/// A text range with start and end positions, half-open.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextRange {
    /// The offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    /// Create a new text range.
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= pos);
        Self { pos, end }
    }

    /// Create an empty range at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    /// The length of this range in chars.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    /// Whether this range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Whether this range contains a position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos < self.end
    }

    /// Convert to a usize range, for indexing.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.pos, self.end)
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column in chars.
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A map from char offsets to line numbers, built once from source text.
///
/// Replaces re-scanning backward/forward from arbitrary offsets: every
/// line-boundary query is a binary search over the precomputed starts.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Char offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, ch) in text.chars().enumerate() {
            if ch == '\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Get the line number (0-based) for a char offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the line and column for a char offset.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }

    /// Get the char offset of the start of a line.
    pub fn line_start(&self, line: u32) -> TextPos {
        self.line_starts[line as usize]
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get all line starts.
    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_range() {
        let range = TextRange::new(5, 15);
        assert_eq!(range.pos, 5);
        assert_eq!(range.end, 15);
        assert_eq!(range.len(), 10);
        assert!(range.contains(5));
        assert!(range.contains(14));
        assert!(!range.contains(15));
    }

    #[test]
    fn test_empty_range() {
        let range = TextRange::empty(7);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert!(!range.contains(7));
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0); // newline char
        assert_eq!(map.line_of(6), 1); // start of line2
        assert_eq!(map.line_of(12), 2);

        let lc = map.line_and_column_of(8);
        assert_eq!(lc.line, 1);
        assert_eq!(lc.character, 2);
    }

    #[test]
    fn test_line_map_trailing_newline() {
        let map = LineMap::new("a\n");
        assert_eq!(map.line_count(), 2);
        assert_eq!(map.line_of(2), 1);
        assert_eq!(map.line_start(1), 2);
    }

    #[test]
    fn test_line_map_empty() {
        let map = LineMap::new("");
        assert_eq!(map.line_count(), 1);
        assert_eq!(map.line_of(0), 0);
    }
}
