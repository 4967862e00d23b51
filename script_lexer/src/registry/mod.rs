//! Token registry: the runtime grammar a scanner is configured with
//!
//! A [`TokenRegistry`] bundles the character classifier, the literal and
//! comment rules, every registered [`TokenType`] and the [`TokenGraph`] built
//! from the symbol types. It is immutable once built and is shared between
//! scanners through an `Arc`.
//!
//! ```ignore
//! let registry = RegistryBuilder::new()
//!     .standalone(['(', ')'])
//!     .symbol("EQUAL", "=")
//!     .symbol("EQUAL_EQUAL", "==")
//!     .symbol("SLASH_SLASH", "//")
//!     .line_comment("SLASH_SLASH")
//!     .keyword("WHILE")
//!     .literal_word("TRUE", "true")
//!     .build()?;
//! ```

pub mod builder;
pub mod character;
pub mod graph;
pub mod token_type;

pub use builder::{RegistryBuilder, RegistryError};
pub use character::{CharacterClassifier, TokenCharacter};
pub use graph::{NodeId, TokenGraph, TokenNode};
pub use token_type::{builtin, LiteralKind, TokenCategory, TokenType};

use std::collections::HashMap;
use std::sync::Arc;

/// How a comment opened by a symbol is terminated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStyle {
    /// Runs to the next line separator, which is left in the input
    Line,
    /// Runs to the closing symbol; with none, to the next line separator
    Block { close: Option<Arc<TokenType>> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRule {
    pub opener: Arc<TokenType>,
    pub style: CommentStyle,
}

/// Read-only grammar consumed by the scanner
#[derive(Debug)]
pub struct TokenRegistry {
    classifier: CharacterClassifier,
    quote: char,
    char_delimiter: char,
    number_separator: char,
    number_delimiter: char,
    types: Vec<Arc<TokenType>>,
    by_name: HashMap<String, Arc<TokenType>>,
    graph: TokenGraph,
    comments: Vec<CommentRule>,
    identifier: Arc<TokenType>,
    string: Arc<TokenType>,
    character: Arc<TokenType>,
    number: Arc<TokenType>,
    eof: Arc<TokenType>,
}

impl TokenRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn classifier(&self) -> &CharacterClassifier {
        &self.classifier
    }

    pub fn quote(&self) -> char {
        self.quote
    }

    pub fn char_delimiter(&self) -> char {
        self.char_delimiter
    }

    pub fn number_separator(&self) -> char {
        self.number_separator
    }

    pub fn number_delimiter(&self) -> char {
        self.number_delimiter
    }

    pub fn graph(&self) -> &TokenGraph {
        &self.graph
    }

    /// Every type in registration order, built-ins first
    pub fn token_types(&self) -> &[Arc<TokenType>] {
        &self.types
    }

    pub fn token_type(&self, name: &str) -> Option<&Arc<TokenType>> {
        self.by_name.get(name)
    }

    pub fn keyword_types(&self) -> impl Iterator<Item = &Arc<TokenType>> {
        self.types.iter().filter(|t| t.is_keyword())
    }

    /// Literal types with a fixed spelling
    pub fn literal_types(&self) -> impl Iterator<Item = &Arc<TokenType>> {
        self.types
            .iter()
            .filter(|t| t.is_literal() && t.lexeme().is_some())
    }

    pub fn comment_rules(&self) -> &[CommentRule] {
        &self.comments
    }

    /// Comment rule opened by `token_type`, if it opens one
    pub fn comment_rule_for(&self, token_type: &TokenType) -> Option<&CommentRule> {
        self.comments
            .iter()
            .find(|rule| rule.opener.as_ref() == token_type)
    }

    pub fn identifier_type(&self) -> &Arc<TokenType> {
        &self.identifier
    }

    pub fn string_type(&self) -> &Arc<TokenType> {
        &self.string
    }

    pub fn char_type(&self) -> &Arc<TokenType> {
        &self.character
    }

    pub fn number_type(&self) -> &Arc<TokenType> {
        &self.number
    }

    pub fn eof_type(&self) -> &Arc<TokenType> {
        &self.eof
    }
}
