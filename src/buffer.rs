//! # Line Buffer
//!
//! Immutable, line-addressable snapshot of a source document. Every scan in the
//! engine reads through this type; nothing mutates it during a query.

use serde::{Deserialize, Serialize};

/// Absolute byte offset into the buffer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition(pub usize);

impl SourcePosition {
    pub fn offset(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct LineBuffer {
    text: String,
    line_starts: Vec<usize>,
}

impl LineBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(idx, _)| idx + 1),
        );

        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.line_starts.get(index).copied()
    }

    /// Exclusive end of the line's content, before any `\n` or `\r\n`.
    pub fn line_end(&self, index: usize) -> Option<usize> {
        let start = self.line_start(index)?;
        let mut end = match self.line_starts.get(index + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Some(end)
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        let start = self.line_start(index)?;
        let end = self.line_end(index)?;
        Some(&self.text[start..end])
    }

    /// Line containing `position`. Positions past the end clamp to the last line.
    pub fn line_number_at(&self, position: SourcePosition) -> usize {
        let offset = position.0.min(self.text.len());
        self.line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1)
    }

    /// Converts a 0-based line and character column into a position.
    ///
    /// A column past the end of the line is rejected.
    pub fn position_of(&self, line: usize, column: usize) -> Option<SourcePosition> {
        let start = self.line_start(line)?;
        let text = self.line(line)?;
        if column == text.chars().count() {
            return Some(SourcePosition(start + text.len()));
        }
        text.char_indices()
            .nth(column)
            .map(|(offset, _)| SourcePosition(start + offset))
    }

    /// Position at the end of `line`'s content.
    pub fn end_of_line(&self, line: usize) -> Option<SourcePosition> {
        self.line_end(line).map(SourcePosition)
    }

    /// Leading whitespace of the given line.
    pub fn indentation(&self, line: usize) -> &str {
        let text = self.line(line).unwrap_or_default();
        let trimmed = text.trim_start();
        &text[..text.len() - trimmed.len()]
    }

    /// The newline sequence the document already uses.
    pub fn newline(&self) -> &'static str {
        if self.text.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }
}
