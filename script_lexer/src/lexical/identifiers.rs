//! Identifier and keyword scanning

use super::analyzer::ScanSession;
use super::error::{LexError, LexErrorKind};
use crate::config::compile_time::lexical::MAX_IDENTIFIER_LENGTH;
use std::sync::Arc;

impl ScanSession<'_> {
    /// Scan a word; the first letter has been consumed
    ///
    /// Keywords win over fixed-spelling literals, which win over plain
    /// identifiers. Matching is exact, so case matters.
    pub(super) fn scan_identifier(&mut self) -> Result<(), LexError> {
        let classifier = self.registry.classifier();

        while self
            .cursor
            .peek()
            .is_some_and(|c| classifier.continues_identifier(c))
        {
            self.cursor.advance();
        }

        // SECURITY: identifier length limit
        let length = self.cursor.current() - self.cursor.start();
        if length > MAX_IDENTIFIER_LENGTH {
            return Err(self.error(LexErrorKind::IdentifierTooLong { length }));
        }

        let text = self.cursor.lexeme();
        let token_type = self
            .keywords
            .keyword(&text)
            .or_else(|| self.keywords.literal(&text))
            .unwrap_or_else(|| self.registry.identifier_type());

        self.add_token(Arc::clone(token_type), None)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::compile_time::lexical::MAX_IDENTIFIER_LENGTH;
    use crate::lexical::{LexErrorKind, Scanner};
    use crate::registry::RegistryBuilder;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    fn scanner() -> Scanner {
        let registry = RegistryBuilder::new()
            .identifier_char('_')
            .keyword("WHILE")
            .keyword_spelled("FUNC", "fn")
            .literal_word("TRUE", "true")
            .literal_word("NIL", "nil")
            .build()
            .unwrap();
        Scanner::new(Arc::new(registry))
    }

    fn kinds(source: &str) -> Vec<String> {
        scanner()
            .scan(source)
            .unwrap()
            .tokens
            .iter()
            .map(|t| t.kind().to_string())
            .collect()
    }

    #[test]
    fn test_keywords_and_literal_words() {
        assert_eq!(
            kinds("while fn true nil whilst"),
            vec!["WHILE", "FUNC", "TRUE", "NIL", "IDENTIFIER", "EOF"]
        );
    }

    #[test]
    fn test_case_only_collision_is_identifier() {
        assert_eq!(
            kinds("While WHILE True"),
            vec!["IDENTIFIER", "IDENTIFIER", "IDENTIFIER", "EOF"]
        );
    }

    #[test]
    fn test_literal_words_carry_no_value() {
        let output = scanner().scan("true").unwrap();
        assert_eq!(output.tokens[0].lexeme, "true");
        assert!(output.tokens[0].literal.is_none());
    }

    #[test]
    fn test_identifier_continuation_characters() {
        let output = scanner().scan("snake_case2 été").unwrap();
        assert_eq!(output.tokens[0].lexeme, "snake_case2");
        assert_eq!(output.tokens[1].lexeme, "été");
        assert_eq!(output.tokens[1].column, 12);
    }

    #[test]
    fn test_identifier_length_limit() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let error = scanner().scan(&long).unwrap_err();
        assert_matches!(
            error.kind,
            LexErrorKind::IdentifierTooLong { length } if length == MAX_IDENTIFIER_LENGTH + 1
        );

        let exact = "b".repeat(MAX_IDENTIFIER_LENGTH);
        assert!(scanner().scan(&exact).is_ok());
    }
}
