//! Position tracking for diagnostics
//!
//! Converts byte offsets produced by the lexer into line/column positions
//! for error reporting.

use text_size::TextSize;

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Line start table for one source text
///
/// Columns are byte columns; the exports this crate reads are single-byte
/// encoded, so byte and character columns agree for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Line starts of undecoded source bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (idx, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(idx as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a 0-indexed line/column position
    pub fn position(&self, offset: TextSize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = u32::from(offset) - u32::from(self.line_starts[line]);
        Position::new(line, column as usize)
    }
}
