//! The shared, immutable source buffer.
//!
//! A `SourceFile` owns the text of one source unit together with its
//! identifying path and a precomputed line map. It is created once per
//! tokenization job and shared by reference (`Arc`) across every token
//! produced from it; the text never mutates after construction.

use crate::text::{LineAndColumn, LineMap, TextPos, TextRange};

/// An immutable source unit: text, identifying path, line boundaries.
///
/// All offsets into the text are char indices in `[0, len]`.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Identifying path or label, used in diagnostics.
    path: String,
    /// The source text, indexed by char offset.
    text: Vec<char>,
    /// Precomputed line-start offsets.
    line_map: LineMap,
}

impl SourceFile {
    /// Create a source file from raw text and an identifying path.
    pub fn new(text: &str, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.chars().collect(),
            line_map: LineMap::new(text),
        }
    }

    /// The identifying path or label.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Length of the text in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The character at `offset`, or `None` past the end.
    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(offset).copied()
    }

    /// The text covered by `range`, as an owned string.
    pub fn slice(&self, range: TextRange) -> String {
        let s = (range.pos as usize).min(self.text.len());
        let e = (range.end as usize).min(self.text.len());
        self.text[s..e].iter().collect()
    }

    /// The full source text, as an owned string.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Offset of the first character of the line containing `offset`.
    pub fn beginning_of_line(&self, offset: TextPos) -> TextPos {
        self.line_map.line_start(self.line_map.line_of(offset))
    }

    /// One past the last character of the line containing `offset`,
    /// exclusive of the line's terminating newline.
    pub fn end_of_line(&self, offset: TextPos) -> TextPos {
        let line = self.line_map.line_of(offset);
        if (line as usize) + 1 < self.line_map.line_count() {
            self.line_map.line_start(line + 1) - 1
        } else {
            self.text.len() as TextPos
        }
    }

    /// Line and column (0-based) of `offset`.
    pub fn line_and_column_of(&self, offset: TextPos) -> LineAndColumn {
        self.line_map.line_and_column_of(offset)
    }

    /// The line map for this source.
    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// Render a human-readable excerpt of `region`, with the part of each
    /// line falling inside `highlight` underlined.
    ///
    /// `region` is expected to be line-aligned (the caller widens it to
    /// whole lines); `highlight` is the exact erroring sub-range. Lines
    /// are printed with a 1-based gutter:
    ///
    /// ```text
    ///   3 | foo = 0x1G;
    ///     |       ^^^^
    /// ```
    pub fn context(&self, highlight: TextRange, region: TextRange) -> String {
        let first = self.line_map.line_of(region.pos);
        let last = self.line_map.line_of(region.end);
        let width = (last + 1).to_string().len();

        let mut out = String::new();
        for line in first..=last {
            let start = self.line_map.line_start(line);
            let end = self.end_of_line(start);
            let text = self.slice(TextRange::new(start, end));
            out.push_str(&format!("{:>width$} | {}\n", line + 1, text, width = width));

            let hl_start = highlight.pos.max(start);
            let hl_end = highlight.end.min(end);
            if hl_start < hl_end {
                let pad = " ".repeat((hl_start - start) as usize);
                let carets = "^".repeat((hl_end - hl_start) as usize);
                out.push_str(&format!("{:>width$} | {}{}\n", "", pad, carets, width = width));
            }
        }
        // Drop the trailing newline so callers control final spacing.
        out.pop();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_boundaries() {
        let source = SourceFile::new("abc\ndef\nghi", "test.nasl");
        assert_eq!(source.beginning_of_line(0), 0);
        assert_eq!(source.beginning_of_line(2), 0);
        assert_eq!(source.end_of_line(0), 3);
        assert_eq!(source.beginning_of_line(4), 4);
        assert_eq!(source.end_of_line(5), 7);
        // Last line has no trailing newline.
        assert_eq!(source.end_of_line(9), 11);
    }

    #[test]
    fn test_slice_clamps() {
        let source = SourceFile::new("abc", "test.nasl");
        assert_eq!(source.slice(TextRange::new(1, 3)), "bc");
        assert_eq!(source.slice(TextRange::new(2, 9)), "c");
    }

    #[test]
    fn test_context_single_line() {
        let source = SourceFile::new("foo = 0x1G;", "test.nasl");
        let rendered = source.context(TextRange::new(6, 10), TextRange::new(0, 11));
        assert_eq!(rendered, "1 | foo = 0x1G;\n  |       ^^^^");
    }

    #[test]
    fn test_context_multi_line() {
        let source = SourceFile::new("a = 1;\nb = 'open\nc = 2;", "test.nasl");
        // Highlight the opening quote on line 2; region covers lines 2-3.
        let rendered = source.context(TextRange::new(11, 12), TextRange::new(7, 23));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "2 | b = 'open");
        assert_eq!(lines[1], "  |     ^");
        assert_eq!(lines[2], "3 | c = 2;");
    }
}
