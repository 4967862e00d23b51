//! Lexical errors with compile-time security boundaries

use crate::config::compile_time::lexical::*;
use crate::logging::codes;
use crate::utils::SourceMap;

/// What went wrong during a scan
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("Unexpected character '{character}'")]
    UnexpectedCharacter { character: char },

    #[error("Unterminated string")]
    UnterminatedString,

    #[error("Unterminated char variable")]
    UnterminatedChar,

    #[error("Number separator '{separator}' used outside of a number")]
    DanglingNumberSeparator { separator: char },

    #[error("Malformed number '{text}'")]
    MalformedNumber { text: String },

    #[error("Null character in source")]
    NullCharacter,

    #[error(
        "Unexpected end of token '{text}', valid continuations: {}",
        .continuations.join(", ")
    )]
    UnexpectedEndOfToken {
        text: String,
        continuations: Vec<String>,
    },

    #[error("Identifier too long: {length} characters (max {MAX_IDENTIFIER_LENGTH})")]
    IdentifierTooLong { length: usize },

    #[error("String too large: {size} characters (max {MAX_STRING_SIZE})")]
    StringTooLarge { size: usize },

    #[error("Comment too long: {length} characters (max {MAX_COMMENT_LENGTH})")]
    CommentTooLong { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexErrorKind {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexErrorKind::UnexpectedCharacter { .. } => codes::lexical::UNEXPECTED_CHARACTER,
            LexErrorKind::UnterminatedString => codes::lexical::UNTERMINATED_STRING,
            LexErrorKind::UnterminatedChar => codes::lexical::UNTERMINATED_CHAR,
            LexErrorKind::DanglingNumberSeparator { .. } => {
                codes::lexical::DANGLING_NUMBER_SEPARATOR
            }
            LexErrorKind::MalformedNumber { .. } => codes::lexical::MALFORMED_NUMBER,
            LexErrorKind::NullCharacter => codes::lexical::NULL_CHARACTER,
            LexErrorKind::UnexpectedEndOfToken { .. } => codes::lexical::UNEXPECTED_END_OF_TOKEN,
            LexErrorKind::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexErrorKind::StringTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            LexErrorKind::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
            LexErrorKind::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }
}

/// A scan failure and where it happened
///
/// Scans are fail-fast: the first error aborts the scan and no partial
/// token list is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Error while tokenizing at line {line}, column {column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    pub const PHASE: &'static str = "tokenizing";

    pub fn new(kind: LexErrorKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }

    /// Always "tokenizing"
    pub fn phase(&self) -> &'static str {
        Self::PHASE
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn error_code(&self) -> crate::logging::Code {
        self.kind.error_code()
    }

    /// Render the error against its source with a caret under the column
    pub fn render(&self, source: &str) -> String {
        SourceMap::new(source).format_error(self.line, self.column, &self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_surface() {
        let error = LexError::new(LexErrorKind::UnterminatedString, 3, 7);
        assert_eq!(error.phase(), "tokenizing");
        assert_eq!(error.message(), "Unterminated string");
        assert_eq!(error.error_code(), codes::lexical::UNTERMINATED_STRING);
        assert_eq!(
            error.to_string(),
            "Error while tokenizing at line 3, column 7: Unterminated string"
        );
    }

    #[test]
    fn test_continuations_are_listed() {
        let kind = LexErrorKind::UnexpectedEndOfToken {
            text: "->".into(),
            continuations: vec!["LONG_ARROW '->>'".into(), "ARROW_EQ '->='".into()],
        };
        assert_eq!(
            kind.to_string(),
            "Unexpected end of token '->', valid continuations: LONG_ARROW '->>', ARROW_EQ '->='"
        );
    }

    #[test]
    fn test_render_points_at_error() {
        let source = "a = 1\nb = \"open";
        let error = LexError::new(LexErrorKind::UnterminatedString, 2, 4);
        let rendered = error.render(source);
        assert!(rendered.starts_with("error: Unterminated string\n"));
        assert!(rendered.contains("2 | b = \"open"));
        assert!(rendered.ends_with("  |     ^\n"));
    }

    #[test]
    fn test_limit_messages_include_limits() {
        let kind = LexErrorKind::TooManyTokens { count: 5 };
        assert!(kind.to_string().contains(&MAX_TOKEN_COUNT.to_string()));
    }
}
