//! Scanner output values: tokens and comments
use crate::registry::TokenType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Value carried by a literal token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    Char(char),
    Str(String),
}

impl Literal {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Char(value) => write!(f, "{}", value),
            Self::Str(value) => write!(f, "{}", value),
        }
    }
}

/// A scanned token
///
/// `lexeme` is the exact source text matched, delimiters included for string
/// and char literals. `line` is 1-based, `column` is 0-based and counts
/// characters from the start of the line.
///
/// The end-of-file token is the exception: its `column` is the character
/// offset of the end of input, not a position within the last line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: Arc<TokenType>,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(
        token_type: Arc<TokenType>,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            literal,
            line,
            column,
        }
    }

    /// Name of this token's type
    pub fn kind(&self) -> &str {
        self.token_type.name()
    }

    pub fn is(&self, type_name: &str) -> bool {
        self.token_type.name() == type_name
    }

    pub fn is_eof(&self) -> bool {
        self.token_type.is_eof()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            return write!(f, "{} at {}:{}", self.kind(), self.line, self.column);
        }
        write!(
            f,
            "{} '{}' at {}:{}",
            self.kind(),
            self.lexeme,
            self.line,
            self.column
        )?;
        if let Some(literal) = &self.literal {
            write!(f, " = {}", literal)?;
        }
        Ok(())
    }
}

/// Comment text with its delimiters stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Line the comment opener is on
    pub line: u32,
    /// Column of the opener's first character
    pub column: u32,
    pub text: String,
}

impl Comment {
    pub fn new(line: u32, column: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;

    #[test]
    fn test_token_display() {
        let registry = RegistryBuilder::new().build().unwrap();

        let number = Token::new(
            Arc::clone(registry.number_type()),
            "1_000",
            Some(Literal::Number(1000.0)),
            2,
            4,
        );
        assert_eq!(number.to_string(), "NUMBER '1_000' at 2:4 = 1000");
        assert!(number.is("NUMBER"));

        let eof = Token::new(Arc::clone(registry.eof_type()), "", None, 3, 9);
        assert!(eof.is_eof());
        assert_eq!(eof.to_string(), "EOF at 3:9");
    }

    #[test]
    fn test_literal_accessors() {
        assert_eq!(Literal::Number(1.5).as_number(), Some(1.5));
        assert_eq!(Literal::Char('x').as_char(), Some('x'));
        assert_eq!(Literal::Str("hi".into()).as_str(), Some("hi"));
        assert_eq!(Literal::Str("hi".into()).as_number(), None);
    }

    #[test]
    fn test_token_serializes_type_name() {
        let registry = RegistryBuilder::new().build().unwrap();
        let token = Token::new(Arc::clone(registry.identifier_type()), "abc", None, 1, 0);
        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains("\"name\":\"IDENTIFIER\""));
        assert!(json.contains("\"lexeme\":\"abc\""));
    }
}
