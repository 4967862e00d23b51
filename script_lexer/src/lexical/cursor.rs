//! Per-scan read position over the source characters

use crate::registry::TokenCharacter;
use crate::utils::Position;

/// Scan state: `start` marks the first character of the token being
/// scanned, `current` the next character to read.
///
/// `column` is the number of characters already consumed on the current
/// line, so a token's column is the column captured when its first
/// character is marked.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: u32,
    column: u32,
    start_line: u32,
    start_column: u32,
}

impl Cursor {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            column: 0,
            start_line: 1,
            start_column: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    /// Begin a new token at the current position
    pub(crate) fn mark_start(&mut self) {
        self.start = self.current;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn start_line(&self) -> u32 {
        self.start_line
    }

    pub(crate) fn start_column(&self) -> u32 {
        self.start_column
    }

    pub(crate) fn start_position(&self) -> Position {
        Position::new(self.start, self.start_line, self.start_column)
    }

    pub(crate) fn position(&self) -> Position {
        Position::new(self.current, self.line, self.column)
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    pub(crate) fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    /// Consume one character, tracking line separators
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += 1;
        if TokenCharacter::from_char(ch) == TokenCharacter::Newline {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume the next character only if it equals `expected`
    pub(crate) fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Give back the last `count` characters; they must all be on the current line
    pub(crate) fn rewind(&mut self, count: usize) {
        debug_assert!(count <= self.current - self.start);
        debug_assert!(self.chars[self.current - count..self.current]
            .iter()
            .all(|&c| TokenCharacter::from_char(c) != TokenCharacter::Newline));

        self.current -= count;
        self.column = self.column.saturating_sub(count as u32);
    }

    /// Whether the upcoming characters spell `sequence`, without consuming them
    pub(crate) fn matches_ahead(&self, sequence: &[TokenCharacter]) -> bool {
        if sequence.is_empty() || self.current + sequence.len() > self.chars.len() {
            return false;
        }
        self.chars[self.current..self.current + sequence.len()]
            .iter()
            .zip(sequence)
            .all(|(&c, &expected)| TokenCharacter::from_char(c) == expected)
    }

    /// Text from the token start to the current position
    pub(crate) fn lexeme(&self) -> String {
        self.slice(self.start, self.current)
    }

    pub(crate) fn slice(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position(), Position::new(2, 1, 2));

        assert_eq!(cursor.advance(), Some('\n'));
        assert_eq!(cursor.position(), Position::new(3, 2, 0));

        cursor.mark_start();
        assert_eq!(cursor.start_position(), Position::new(3, 2, 0));
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.lexeme(), "cd");
    }

    #[test]
    fn test_rewind_restores_column() {
        let mut cursor = Cursor::new("->x");
        cursor.mark_start();
        cursor.advance();
        cursor.advance();
        cursor.rewind(1);
        assert_eq!(cursor.current(), 1);
        assert_eq!(cursor.position().column, 1);
        assert_eq!(cursor.peek(), Some('>'));
    }

    #[test]
    fn test_matches_ahead() {
        let cursor = Cursor::new("*/ rest");
        let close = [TokenCharacter::Char('*'), TokenCharacter::Char('/')];
        assert!(cursor.matches_ahead(&close));
        assert!(!cursor.matches_ahead(&[TokenCharacter::Char('/')]));
        assert!(!Cursor::new("*").matches_ahead(&close));
    }

    #[test]
    fn test_characters_not_bytes() {
        let mut cursor = Cursor::new("é=");
        cursor.advance();
        assert_eq!(cursor.current(), 1);
        assert_eq!(cursor.peek(), Some('='));
        assert_eq!(cursor.len(), 2);
    }
}
