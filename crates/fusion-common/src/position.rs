//! Line/column positions for diagnostics.
//!
//! Parse errors are reported to authors as 1-based line and column numbers.
//! `LineMap` converts byte offsets into those coordinates.

use serde::{Deserialize, Serialize};

/// A 1-based line/column location in source text.
///
/// Columns count bytes from the start of the line, matching how PHP tooling
/// reports error columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of the start of every line in a source text.
#[derive(Clone, Debug)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for newline in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[newline] == b'\r' && bytes.get(newline + 1) == Some(&b'\n') {
                // \r\n - the \n will create the line start
                continue;
            }
            line_starts.push((newline + 1) as u32);
        }

        LineMap { line_starts }
    }

    /// Number of lines in the mapped text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a 1-based `Position`.
    pub fn position_of(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);

        Position {
            line: line as u32 + 1,
            column: offset.saturating_sub(line_start) + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_byte_is_line_one_column_one() {
        let map = LineMap::build("abc");
        assert_eq!(map.position_of(0), Position::new(1, 1));
        assert_eq!(map.position_of(2), Position::new(1, 3));
    }

    #[test]
    fn offsets_after_newlines() {
        let map = LineMap::build("<?php\n$a = 1;\r\n$b");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.position_of(6), Position::new(2, 1));
        assert_eq!(map.position_of(9), Position::new(2, 4));
        assert_eq!(map.position_of(15), Position::new(3, 1));
    }

    #[test]
    fn offset_past_end_clamps_to_last_line() {
        let map = LineMap::build("a\nb");
        assert_eq!(map.position_of(10).line, 2);
    }
}
