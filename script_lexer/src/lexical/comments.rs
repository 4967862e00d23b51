//! Line and block comment scanning

use super::analyzer::ScanSession;
use super::error::{LexError, LexErrorKind};
use crate::config::compile_time::lexical::MAX_COMMENT_LENGTH;
use crate::registry::TokenType;

impl ScanSession<'_> {
    /// Scan to the end of the line; the separator is left for the main loop
    pub(super) fn scan_line_comment(&mut self) -> Result<(), LexError> {
        let classifier = self.registry.classifier();
        let text_start = self.cursor.current();

        while let Some(c) = self.cursor.peek() {
            if classifier.is_line_separator(c) {
                break;
            }
            self.cursor.advance();
            self.check_comment_length(text_start)?;
        }

        let text = self.cursor.slice(text_start, self.cursor.current());
        self.add_comment(text);
        Ok(())
    }

    /// Scan up to and including `close`
    ///
    /// Input that ends before the closer still yields a comment holding
    /// everything read so far.
    pub(super) fn scan_block_comment(&mut self, close: &TokenType) -> Result<(), LexError> {
        let text_start = self.cursor.current();
        let closer = close.characters();

        let text = loop {
            if self.cursor.is_at_end() {
                break self.cursor.slice(text_start, self.cursor.current());
            }
            if self.cursor.matches_ahead(closer) {
                let text = self.cursor.slice(text_start, self.cursor.current());
                for _ in closer {
                    self.cursor.advance();
                }
                break text;
            }

            self.cursor.advance();
            self.check_comment_length(text_start)?;
        };

        self.add_comment(text);
        Ok(())
    }

    fn check_comment_length(&self, text_start: usize) -> Result<(), LexError> {
        // SECURITY: comment length limit
        let length = self.cursor.current() - text_start;
        if length > MAX_COMMENT_LENGTH {
            return Err(self.error(LexErrorKind::CommentTooLong { length }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::lexical::Scanner;
    use crate::registry::RegistryBuilder;
    use crate::tokens::Comment;
    use std::sync::Arc;

    fn scanner() -> Scanner {
        let registry = RegistryBuilder::new()
            .symbol("SLASH", "/")
            .symbol("SLASH_SLASH", "//")
            .symbol("SLASH_STAR", "/*")
            .symbol("STAR_SLASH", "*/")
            .symbol("STAR", "*")
            .symbol("HASH", "#")
            .line_comment("SLASH_SLASH")
            .block_comment("SLASH_STAR", Some("STAR_SLASH"))
            .block_comment("HASH", None)
            .build()
            .unwrap();
        Scanner::new(Arc::new(registry))
    }

    #[test]
    fn test_line_comment_excluded_from_tokens() {
        let output = scanner().scan("a // hello\nb").unwrap();
        let lexemes: Vec<&str> = output.tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["a", "b", ""]);
        assert_eq!(output.comments, vec![Comment::new(1, 2, " hello")]);
        assert_eq!(output.tokens[1].line, 2);
        assert_eq!(output.tokens[1].column, 0);
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let output = scanner().scan("x //").unwrap();
        assert_eq!(output.comments, vec![Comment::new(1, 2, "")]);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let output = scanner().scan("a /* one\ntwo */ b").unwrap();
        assert_eq!(output.comments, vec![Comment::new(1, 2, " one\ntwo ")]);
        let b = &output.tokens[1];
        assert_eq!((b.line, b.column), (2, 7));
    }

    #[test]
    fn test_block_comment_stops_at_first_closer() {
        let output = scanner().scan("/* a */ * /* b */").unwrap();
        assert_eq!(output.comments.len(), 2);
        assert_eq!(output.tokens[0].kind(), "STAR");
    }

    #[test]
    fn test_unterminated_block_comment_is_kept() {
        let output = scanner().scan("x /* never closed\nstill").unwrap();
        assert_eq!(output.comments, vec![Comment::new(1, 2, " never closed\nstill")]);
        assert_eq!(output.tokens.len(), 2);
        assert_eq!(output.tokens[1].line, 2);
    }

    #[test]
    fn test_eof_column_is_input_offset_after_comments() {
        let output = scanner().scan("a/*x*/b//y\nc").unwrap();
        let c = &output.tokens[2];
        assert_eq!((c.line, c.column), (2, 0));
        let eof = output.tokens.last().unwrap();
        assert_eq!((eof.lexeme.as_str(), eof.line, eof.column), ("", 2, 12));
        assert_eq!(output.comments[1], Comment::new(1, 7, "y"));
    }

    #[test]
    fn test_block_opener_without_closer_ends_at_line() {
        let output = scanner().scan("# note\ny").unwrap();
        assert_eq!(output.comments, vec![Comment::new(1, 0, " note")]);
        assert_eq!(output.tokens[0].lexeme, "y");
    }
}
