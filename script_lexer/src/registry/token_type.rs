//! Token type definitions owned by a registry

use super::character::TokenCharacter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the token types every registry carries
pub mod builtin {
    pub const IDENTIFIER: &str = "IDENTIFIER";
    pub const STRING: &str = "STRING";
    pub const CHAR: &str = "CHAR";
    pub const NUMBER: &str = "NUMBER";
    pub const EOF: &str = "EOF";

    pub const ALL: [&str; 5] = [IDENTIFIER, STRING, CHAR, NUMBER, EOF];
}

/// Kind of value a literal token type produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    String,
    Char,
    Number,
    /// Fixed spelling such as `true` or `null`, scanned like an identifier
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenCategory {
    Keyword,
    Literal(LiteralKind),
    Symbol,
    Identifier,
    EndOfFile,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Literal(LiteralKind::String) => "string literal",
            Self::Literal(LiteralKind::Char) => "char literal",
            Self::Literal(LiteralKind::Number) => "number literal",
            Self::Literal(LiteralKind::Word) => "literal",
            Self::Symbol => "symbol",
            Self::Identifier => "identifier",
            Self::EndOfFile => "end of file",
        }
    }
}

/// A registered token type
///
/// Symbol types carry the character sequence that spells them; the token
/// graph is built from those sequences. Two types are equal when their names
/// are equal, since names are unique within a registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenType {
    name: String,
    lexeme: Option<String>,
    characters: Vec<TokenCharacter>,
    reserved: bool,
    category: TokenCategory,
}

impl TokenType {
    pub(crate) fn new(
        name: impl Into<String>,
        lexeme: Option<String>,
        reserved: bool,
        category: TokenCategory,
    ) -> Self {
        let characters = match (&lexeme, category) {
            (Some(text), TokenCategory::Symbol) => {
                text.chars().map(TokenCharacter::from_char).collect()
            }
            _ => Vec::new(),
        };

        Self {
            name: name.into(),
            lexeme,
            characters,
            reserved,
            category,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed spelling, if the type has one
    pub fn lexeme(&self) -> Option<&str> {
        self.lexeme.as_deref()
    }

    pub fn characters(&self) -> &[TokenCharacter] {
        &self.characters
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    pub fn category(&self) -> TokenCategory {
        self.category
    }

    pub fn is_keyword(&self) -> bool {
        self.category == TokenCategory::Keyword
    }

    pub fn is_symbol(&self) -> bool {
        self.category == TokenCategory::Symbol
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.category, TokenCategory::Literal(_))
    }

    pub fn is_identifier(&self) -> bool {
        self.category == TokenCategory::Identifier
    }

    pub fn is_eof(&self) -> bool {
        self.category == TokenCategory::EndOfFile
    }

    /// Spelling a keyword must match exactly: its lexeme, else its lowercased name
    pub fn keyword_spelling(&self) -> String {
        self.lexeme
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }
}

impl PartialEq for TokenType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TokenType {}

impl std::hash::Hash for TokenType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{} '{}'", self.name, lexeme),
            None => write!(f, "{}", self.name),
        }
    }
}
