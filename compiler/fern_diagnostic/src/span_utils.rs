//! Span-to-position conversion.
//!
//! A [`LineIndex`] is built once per unit from the original source bytes and
//! converts byte offsets to 1-based line/column positions. Spans themselves
//! stay byte-offset based and immutable; positions are derived only against
//! the source the spans were assigned from, never against re-parsed text.

use fern_ir::Span;

/// 1-based line/column position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Byte-offset to line/column index for one source buffer.
pub struct LineIndex {
    /// Byte offset of the start of each line. First entry is always 0.
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Build the index from source bytes.
    pub fn new(source: &[u8]) -> Self {
        let mut line_starts = vec![0];
        for (i, &b) in source.iter().enumerate() {
            if b == b'\n' {
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex {
            line_starts,
            len: u32::try_from(source.len()).unwrap_or(u32::MAX),
        }
    }

    /// Convert a byte offset to a 1-based position.
    ///
    /// Offsets past the end of the source clamp to the end position.
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line];
        Position {
            line: u32::try_from(line + 1).unwrap_or(u32::MAX),
            column: offset - line_start + 1,
        }
    }

    /// Byte range of the given 1-based line, excluding the newline.
    pub fn line_range(&self, line: u32) -> Option<std::ops::Range<usize>> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)? as usize;
        let end = match self.line_starts.get(idx + 1) {
            Some(&next) => (next as usize).saturating_sub(1),
            None => self.len as usize,
        };
        Some(start..end)
    }

    /// Render a span as `sl:sc-el:ec` (TOKENS section form).
    pub fn render_colon(&self, span: Span) -> String {
        let s = self.position(span.start);
        let e = self.position(span.end);
        format!("{}:{}-{}:{}", s.line, s.column, e.line, e.column)
    }

    /// Render a span as `sl.sc-el.ec` (s-expression `@span` form).
    pub fn render_dot(&self, span: Span) -> String {
        let s = self.position(span.start);
        let e = self.position(span.end);
        format!("{}.{}-{}.{}", s.line, s.column, e.line, e.column)
    }
}
