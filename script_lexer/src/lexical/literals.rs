//! String, char and number literal scanning

use super::analyzer::ScanSession;
use super::error::{LexError, LexErrorKind};
use crate::config::compile_time::lexical::MAX_STRING_SIZE;
use crate::tokens::Literal;
use std::sync::Arc;

impl ScanSession<'_> {
    /// Scan a string; the opening quote has been consumed
    ///
    /// Strings may span lines and have no escape sequences. Errors point at
    /// the opening quote.
    pub(super) fn scan_string(&mut self) -> Result<(), LexError> {
        let quote = self.registry.quote();
        let content_start = self.cursor.current();

        loop {
            match self.cursor.peek() {
                None => return Err(self.error(LexErrorKind::UnterminatedString)),
                Some(c) if c == quote => break,
                Some(_) => {
                    self.cursor.advance();

                    // SECURITY: fail fast on oversized literals
                    let size = self.cursor.current() - content_start;
                    if size > MAX_STRING_SIZE {
                        return Err(self.error(LexErrorKind::StringTooLarge { size }));
                    }
                }
            }
        }

        let content = self.cursor.slice(content_start, self.cursor.current());
        self.cursor.advance();

        self.metrics
            .record_string_length(content.chars().count(), self.preferences);
        let string_type = Arc::clone(self.registry.string_type());
        self.add_token(string_type, Some(Literal::Str(content)))
    }

    /// Scan a char literal: exactly one character, then the closing delimiter
    pub(super) fn scan_char(&mut self) -> Result<(), LexError> {
        let delimiter = self.registry.char_delimiter();

        let Some(content) = self.cursor.advance() else {
            return Err(self.error(LexErrorKind::UnterminatedChar));
        };
        if !self.cursor.advance_if(delimiter) {
            return Err(self.error(LexErrorKind::UnterminatedChar));
        }

        let char_type = Arc::clone(self.registry.char_type());
        self.add_token(char_type, Some(Literal::Char(content)))
    }

    /// Scan `digits[_digits]*[.digits[_digits]*]`; the first digit has been consumed
    pub(super) fn scan_number(&mut self) -> Result<(), LexError> {
        let separator = self.registry.number_separator();
        let delimiter = self.registry.number_delimiter();

        self.scan_digit_run()?;

        let fraction_follows = self
            .cursor
            .peek_next()
            .is_some_and(|c| self.registry.classifier().is_digit(c));
        if self.cursor.peek() == Some(delimiter) && fraction_follows {
            self.cursor.advance();
            self.scan_digit_run()?;
        }

        let text = self.cursor.lexeme();
        let digits: String = text.chars().filter(|&c| c != separator).collect();
        // Values beyond f64 range parse to infinity
        let value = match digits.parse::<f64>() {
            Ok(value) => value,
            Err(_) => return Err(self.error(LexErrorKind::MalformedNumber { text })),
        };

        let number_type = Arc::clone(self.registry.number_type());
        self.add_token(number_type, Some(Literal::Number(value)))
    }

    /// Consume digits and separators; every separator must be followed by a digit
    fn scan_digit_run(&mut self) -> Result<(), LexError> {
        let classifier = self.registry.classifier();
        let separator = self.registry.number_separator();

        while let Some(c) = self.cursor.peek() {
            if classifier.is_digit(c) {
                self.cursor.advance();
            } else if c == separator {
                self.cursor.advance();
                if !self.cursor.peek().is_some_and(|next| classifier.is_digit(next)) {
                    // Take the rest of the malformed run so the error shows it
                    while self
                        .cursor
                        .peek()
                        .is_some_and(|next| next == separator || classifier.is_digit(next))
                    {
                        self.cursor.advance();
                    }
                    return Err(self.error(LexErrorKind::MalformedNumber {
                        text: self.cursor.lexeme(),
                    }));
                }
            } else {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::lexical::{LexErrorKind, Scanner};
    use crate::registry::RegistryBuilder;
    use crate::tokens::Literal;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    fn scanner() -> Scanner {
        let registry = RegistryBuilder::new()
            .symbol("DOT", ".")
            .symbol("SEMICOLON", ";")
            .build()
            .unwrap();
        Scanner::new(Arc::new(registry))
    }

    #[test]
    fn test_string_literal() {
        let output = scanner().scan("\"hello world\";").unwrap();
        let token = &output.tokens[0];
        assert_eq!(token.kind(), "STRING");
        assert_eq!(token.lexeme, "\"hello world\"");
        assert_eq!(token.literal, Some(Literal::Str("hello world".into())));
        assert_eq!(output.tokens[1].column, 13);
    }

    #[test]
    fn test_multiline_string_advances_lines() {
        let output = scanner().scan("\"a\nb\" x").unwrap();
        assert_eq!(output.tokens[0].line, 1);
        assert_eq!(output.tokens[0].literal, Some(Literal::Str("a\nb".into())));
        assert_eq!(output.tokens[1].line, 2);
        assert_eq!(output.tokens[1].column, 3);
    }

    #[test]
    fn test_unterminated_string_reports_opening_quote() {
        let error = scanner().scan("\"abc").unwrap_err();
        assert_matches!(error.kind, LexErrorKind::UnterminatedString);
        assert_eq!(error.line, 1);

        let error = scanner().scan("x;\n  \"abc\ndef").unwrap_err();
        assert_matches!(error.kind, LexErrorKind::UnterminatedString);
        assert_eq!((error.line, error.column), (2, 2));
    }

    #[test]
    fn test_char_literal() {
        let output = scanner().scan("'x' '\"'").unwrap();
        assert_eq!(output.tokens[0].literal, Some(Literal::Char('x')));
        assert_eq!(output.tokens[1].literal, Some(Literal::Char('"')));

        assert_matches!(
            scanner().scan("'xy'").unwrap_err().kind,
            LexErrorKind::UnterminatedChar
        );
        assert_matches!(
            scanner().scan("'x").unwrap_err().kind,
            LexErrorKind::UnterminatedChar
        );
        assert_matches!(
            scanner().scan("'").unwrap_err().kind,
            LexErrorKind::UnterminatedChar
        );
    }

    #[test]
    fn test_numbers() {
        let output = scanner().scan("42 1_000.5 3.25").unwrap();
        let values: Vec<f64> = output
            .significant_tokens()
            .iter()
            .filter_map(|t| t.literal.as_ref().and_then(Literal::as_number))
            .collect();
        assert_eq!(values, vec![42.0, 1000.5, 3.25]);
        assert_eq!(output.tokens[1].lexeme, "1_000.5");
    }

    #[test]
    fn test_number_beyond_float_range_is_infinite() {
        let source = "9".repeat(400);
        let output = scanner().scan(&source).unwrap();
        assert_eq!(output.tokens[0].kind(), "NUMBER");
        assert_eq!(output.tokens[0].lexeme, source);
        assert_eq!(output.tokens[0].literal, Some(Literal::Number(f64::INFINITY)));
    }

    #[test]
    fn test_delimiter_without_fraction_is_not_consumed() {
        let output = scanner().scan("7.x").unwrap();
        let kinds: Vec<&str> = output.tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, vec!["NUMBER", "DOT", "IDENTIFIER", "EOF"]);

        let output = scanner().scan("1.2.3").unwrap();
        let lexemes: Vec<&str> = output.tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["1.2", ".", "3", ""]);
    }

    #[test]
    fn test_bad_separators_rejected() {
        for (source, text) in [("1__0", "1__0"), ("1_", "1_"), ("1_.5", "1_"), ("2.5_", "2.5_")] {
            let error = scanner().scan(source).unwrap_err();
            assert_matches!(
                &error.kind,
                LexErrorKind::MalformedNumber { text: found } if found == text,
                "source {:?}", source
            );
            assert_eq!(error.column, 0);
        }
    }
}
