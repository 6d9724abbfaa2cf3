//! Offset <-> position conversion.
//!
//! The resolver works in byte offsets; editor hosts speak 0-indexed
//! line/character positions with characters counted in UTF-16 code units.

use memchr::memchr_iter;
use serde::{Deserialize, Serialize};

/// A position in a document (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (UTF-16 code units)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A range in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// Byte offsets where each line starts; `line_starts[0]` is always 0.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from document text. `\n`, `\r\n`, and lone `\r`
    /// all end a line.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        for i in memchr_iter(b'\n', bytes) {
            line_starts.push((i + 1) as u32);
        }
        for i in memchr_iter(b'\r', bytes) {
            if bytes.get(i + 1) != Some(&b'\n') {
                line_starts.push((i + 1) as u32);
            }
        }
        line_starts.sort_unstable();
        LineMap { line_starts }
    }

    /// Convert a byte offset to a line/character position.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let character = source
            .get(line_start.min(end)..end)
            .unwrap_or("")
            .chars()
            .map(|ch| ch.len_utf16() as u32)
            .sum();
        Position::new(line as u32, character)
    }

    /// Convert a line/character position to a byte offset. Returns `None`
    /// when the line does not exist; a character count past the end of the
    /// line resolves to the line end.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line_start = *self.line_starts.get(position.line as usize)? as usize;
        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .map(|s| *s as usize)
            .unwrap_or(source.len());
        let line = source.get(line_start..line_end).unwrap_or("");

        let mut units = 0u32;
        let mut bytes = 0usize;
        for ch in line.chars() {
            if ch == '\n' || ch == '\r' || units >= position.character {
                break;
            }
            units += ch.len_utf16() as u32;
            bytes += ch.len_utf8();
        }
        Some((line_start + bytes) as u32)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset at which `line` starts.
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_line_map_simple() {
        let source = "{\n  \"a\": 1\n}";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
        assert_eq!(map.offset_to_position(2, source), Position::new(1, 0));
        assert_eq!(map.offset_to_position(9, source), Position::new(1, 7));
        assert_eq!(map.offset_to_position(11, source), Position::new(2, 0));
    }

    #[test]
    fn test_line_map_crlf() {
        let source = "{\r\n\"a\": 1\r\n}";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(3, source), Position::new(1, 0));
        assert_eq!(map.line_start(1), Some(3));
    }

    #[test]
    fn test_line_map_lone_cr() {
        let source = "a\rb";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 2);
        assert_eq!(map.offset_to_position(2, source), Position::new(1, 0));
    }

    #[test]
    fn test_roundtrip() {
        let source = "{\"a\": [1, 2],\n \"b\": null}";
        let map = LineMap::build(source);
        for offset in 0..=source.len() as u32 {
            if !source.is_char_boundary(offset as usize) {
                continue;
            }
            let pos = map.offset_to_position(offset, source);
            if source.as_bytes().get(offset as usize) == Some(&b'\n') {
                continue; // position of a line break maps back to line end
            }
            assert_eq!(
                map.position_to_offset(pos, source),
                Some(offset),
                "roundtrip failed at offset {offset}"
            );
        }
    }

    #[test]
    fn test_utf16_columns() {
        let source = "\"\u{1F600}x\"";
        let map = LineMap::build(source);

        // The emoji is one char, two UTF-16 units, four UTF-8 bytes.
        assert_eq!(map.offset_to_position(5, source), Position::new(0, 3));
        assert_eq!(
            map.position_to_offset(Position::new(0, 3), source),
            Some(5)
        );
    }

    #[test]
    fn test_position_past_line_end_clamps() {
        let source = "ab\ncd";
        let map = LineMap::build(source);
        assert_eq!(
            map.position_to_offset(Position::new(0, 99), source),
            Some(2)
        );
        assert_eq!(map.position_to_offset(Position::new(9, 0), source), None);
    }
}
