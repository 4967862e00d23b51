//! Source location tracking for the lexer
//!
//! Positions count characters, not bytes: the scanner walks the source one
//! `char` at a time, so offsets here are character indices. Lines are 1-based
//! and columns are 0-based, resetting after every line separator.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and character offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Character offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (0-based)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 1, column 0)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Zero-width span at a position
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line lookup over a source text, used to render diagnostics
#[derive(Debug, Clone)]
pub struct SourceMap<'a> {
    source: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> SourceMap<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: source.split('\n').collect(),
        }
    }

    /// The original source text
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get a line of text by line number (1-based), without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&'a str> {
        if line_num == 0 {
            return None;
        }
        self.lines
            .get((line_num - 1) as usize)
            .map(|line| line.trim_end_matches('\r'))
    }

    /// Format an error message with a caret under the offending column
    pub fn format_error(&self, line: u32, column: u32, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!("  --> {}:{}\n", line, column));

        if let Some(text) = self.get_line(line) {
            let line_num_str = line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!(" {} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, text));

            let indent: String = text
                .chars()
                .take(column as usize)
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            result.push_str(&format!(" {} | {}^\n", padding, indent));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let pos = Position::start();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.to_string(), "1:0");
    }

    #[test]
    fn test_span_len_and_display() {
        let span = Span::new(Position::new(2, 1, 2), Position::new(5, 1, 5));
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
        assert_eq!(span.to_string(), "1:2-5");
        assert!(Span::point(Position::start()).is_empty());
    }

    #[test]
    fn test_source_map_lines() {
        let map = SourceMap::new("first\r\nsecond\nthird");
        assert_eq!(map.get_line(1), Some("first"));
        assert_eq!(map.get_line(2), Some("second"));
        assert_eq!(map.get_line(3), Some("third"));
        assert_eq!(map.get_line(0), None);
        assert_eq!(map.get_line(4), None);
    }

    #[test]
    fn test_format_error_points_at_column() {
        let map = SourceMap::new("let x = ?;");
        let rendered = map.format_error(1, 8, "unexpected character '?'");
        assert!(rendered.contains("error: unexpected character '?'"));
        assert!(rendered.contains("  --> 1:8"));
        assert!(rendered.contains("1 | let x = ?;"));
        assert!(rendered.ends_with("  |         ^\n"));
    }
}
