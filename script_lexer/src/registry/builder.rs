//! Registry construction and validation

use super::character::{CharacterClassifier, TokenCharacter};
use super::graph::TokenGraph;
use super::token_type::{builtin, LiteralKind, TokenCategory, TokenType};
use super::{CommentRule, CommentStyle, TokenRegistry};
use crate::logging::codes;
use crate::{log_debug, log_success};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Registry configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate token type name: '{name}'")]
    DuplicateTokenType { name: String },

    #[error("Token types '{first}' and '{second}' share the spelling '{text}'")]
    DuplicateTokenShape {
        first: String,
        second: String,
        text: String,
    },

    #[error("Invalid symbol '{name}': {reason}")]
    InvalidSymbol { name: String, reason: String },

    #[error("Comment rule references unknown symbol '{name}'")]
    UnknownCommentToken { name: String },

    #[error("Character {character:?} cannot be both {first} and {second}")]
    ConflictingSpecialCharacter {
        character: char,
        first: String,
        second: String,
    },

    #[error("Keyword '{name}' has spelling '{spelling}', which is not a valid identifier")]
    InvalidKeyword { name: String, spelling: String },
}

impl RegistryError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            RegistryError::DuplicateTokenType { .. } => codes::registry::DUPLICATE_TOKEN_TYPE,
            RegistryError::DuplicateTokenShape { .. } => codes::registry::DUPLICATE_TOKEN_SHAPE,
            RegistryError::InvalidSymbol { .. } => codes::registry::INVALID_SYMBOL,
            RegistryError::UnknownCommentToken { .. } => codes::registry::UNKNOWN_COMMENT_TOKEN,
            RegistryError::ConflictingSpecialCharacter { .. } => {
                codes::registry::CONFLICTING_SPECIAL_CHARACTER
            }
            RegistryError::InvalidKeyword { .. } => codes::registry::INVALID_KEYWORD,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingType {
    name: String,
    lexeme: Option<String>,
    reserved: bool,
    category: TokenCategory,
}

#[derive(Debug, Clone)]
enum PendingComment {
    Line { open: String },
    Block { open: String, close: Option<String> },
}

/// Builder for [`TokenRegistry`]
///
/// Definitions are collected as given and checked together in [`build`],
/// which is also where the token graph is assembled.
///
/// [`build`]: RegistryBuilder::build
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    quote: char,
    char_delimiter: char,
    number_separator: char,
    number_delimiter: char,
    standalone: BTreeSet<char>,
    identifier_extras: BTreeSet<char>,
    types: Vec<PendingType>,
    comments: Vec<PendingComment>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            quote: '"',
            char_delimiter: '\'',
            number_separator: '_',
            number_delimiter: '.',
            standalone: BTreeSet::new(),
            identifier_extras: BTreeSet::new(),
            types: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn char_delimiter(mut self, delimiter: char) -> Self {
        self.char_delimiter = delimiter;
        self
    }

    pub fn number_separator(mut self, separator: char) -> Self {
        self.number_separator = separator;
        self
    }

    pub fn number_delimiter(mut self, delimiter: char) -> Self {
        self.number_delimiter = delimiter;
        self
    }

    pub fn standalone(mut self, characters: impl IntoIterator<Item = char>) -> Self {
        self.standalone.extend(characters);
        self
    }

    /// Allow `ch` to continue (not start) an identifier
    pub fn identifier_char(mut self, ch: char) -> Self {
        self.identifier_extras.insert(ch);
        self
    }

    pub fn symbol(self, name: &str, text: &str) -> Self {
        self.push(name, Some(text), false, TokenCategory::Symbol)
    }

    pub fn reserved_symbol(self, name: &str, text: &str) -> Self {
        self.push(name, Some(text), true, TokenCategory::Symbol)
    }

    /// Keyword spelled as its lowercased name
    pub fn keyword(self, name: &str) -> Self {
        self.push(name, None, false, TokenCategory::Keyword)
    }

    /// Keyword with an explicit spelling
    pub fn keyword_spelled(self, name: &str, spelling: &str) -> Self {
        self.push(name, Some(spelling), false, TokenCategory::Keyword)
    }

    pub fn reserved_keyword(self, name: &str) -> Self {
        self.push(name, None, true, TokenCategory::Keyword)
    }

    /// Literal with a fixed spelling, e.g. `true`
    pub fn literal_word(self, name: &str, spelling: &str) -> Self {
        self.push(
            name,
            Some(spelling),
            false,
            TokenCategory::Literal(LiteralKind::Word),
        )
    }

    /// Mark a registered symbol as opening a comment that runs to end of line
    pub fn line_comment(mut self, open: &str) -> Self {
        self.comments.push(PendingComment::Line {
            open: open.to_string(),
        });
        self
    }

    /// Mark a registered symbol as opening a block comment closed by `close`;
    /// without a closer the comment ends at the next line separator
    pub fn block_comment(mut self, open: &str, close: Option<&str>) -> Self {
        self.comments.push(PendingComment::Block {
            open: open.to_string(),
            close: close.map(str::to_string),
        });
        self
    }

    fn push(mut self, name: &str, lexeme: Option<&str>, reserved: bool, category: TokenCategory) -> Self {
        self.types.push(PendingType {
            name: name.to_string(),
            lexeme: lexeme.map(str::to_string),
            reserved,
            category,
        });
        self
    }

    /// Validate the definitions and build the registry
    pub fn build(self) -> Result<TokenRegistry, RegistryError> {
        self.check_special_characters()?;

        let classifier = CharacterClassifier::new(self.standalone.clone(), self.identifier_extras.clone());

        let mut by_name: HashMap<String, Arc<TokenType>> = HashMap::new();
        let mut types: Vec<Arc<TokenType>> = Vec::new();

        let builtins = [
            (builtin::IDENTIFIER, TokenCategory::Identifier),
            (builtin::STRING, TokenCategory::Literal(LiteralKind::String)),
            (builtin::CHAR, TokenCategory::Literal(LiteralKind::Char)),
            (builtin::NUMBER, TokenCategory::Literal(LiteralKind::Number)),
            (builtin::EOF, TokenCategory::EndOfFile),
        ];
        for (name, category) in builtins {
            let token_type = Arc::new(TokenType::new(name, None, false, category));
            by_name.insert(name.to_string(), Arc::clone(&token_type));
            types.push(token_type);
        }

        // Spelling -> owner, per namespace: symbols and words never collide
        let mut symbol_spellings: HashMap<String, String> = HashMap::new();
        let mut word_spellings: HashMap<String, String> = HashMap::new();

        for pending in &self.types {
            if by_name.contains_key(&pending.name) {
                return Err(RegistryError::DuplicateTokenType {
                    name: pending.name.clone(),
                });
            }

            let token_type = Arc::new(TokenType::new(
                pending.name.clone(),
                pending.lexeme.clone(),
                pending.reserved,
                pending.category,
            ));

            match pending.category {
                TokenCategory::Symbol => {
                    let text = pending.lexeme.clone().unwrap_or_default();
                    self.check_symbol(&pending.name, &text, &classifier)?;
                    claim_spelling(&mut symbol_spellings, &pending.name, text)?;
                }
                _ => {
                    let spelling = token_type.keyword_spelling();
                    check_word(&pending.name, &spelling, &classifier)?;
                    claim_spelling(&mut word_spellings, &pending.name, spelling)?;
                }
            }

            by_name.insert(pending.name.clone(), Arc::clone(&token_type));
            types.push(token_type);
        }

        let comments = self.resolve_comments(&by_name)?;
        let graph = TokenGraph::build(types.iter().filter(|t| t.is_symbol()));

        let registry = TokenRegistry {
            classifier,
            quote: self.quote,
            char_delimiter: self.char_delimiter,
            number_separator: self.number_separator,
            number_delimiter: self.number_delimiter,
            identifier: Arc::clone(&by_name[builtin::IDENTIFIER]),
            string: Arc::clone(&by_name[builtin::STRING]),
            character: Arc::clone(&by_name[builtin::CHAR]),
            number: Arc::clone(&by_name[builtin::NUMBER]),
            eof: Arc::clone(&by_name[builtin::EOF]),
            types,
            by_name,
            graph,
            comments,
        };

        log_success!(codes::success::REGISTRY_BUILT, "Token registry built",
            "token_types" => registry.types.len(),
            "graph_nodes" => registry.graph.len(),
            "comment_rules" => registry.comments.len()
        );

        Ok(registry)
    }

    fn check_special_characters(&self) -> Result<(), RegistryError> {
        let roles = [
            (self.quote, "the string quote"),
            (self.char_delimiter, "the char delimiter"),
            (self.number_separator, "the number separator"),
            (self.number_delimiter, "the number delimiter"),
        ];

        for (i, &(ch, role)) in roles.iter().enumerate() {
            if ch.is_alphanumeric() || TokenCharacter::from_char(ch).is_shared() {
                return Err(RegistryError::ConflictingSpecialCharacter {
                    character: ch,
                    first: role.to_string(),
                    second: "an alphanumeric or whitespace character".to_string(),
                });
            }
            if let Some(&(_, other)) = roles[i + 1..].iter().find(|(c, _)| *c == ch) {
                return Err(RegistryError::ConflictingSpecialCharacter {
                    character: ch,
                    first: role.to_string(),
                    second: other.to_string(),
                });
            }
        }

        Ok(())
    }

    fn check_symbol(
        &self,
        name: &str,
        text: &str,
        classifier: &CharacterClassifier,
    ) -> Result<(), RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidSymbol {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let chars: Vec<char> = text.chars().collect();
        let Some(&first) = chars.first() else {
            return Err(invalid("symbol text is empty"));
        };

        if chars.iter().any(|&c| TokenCharacter::from_char(c).is_shared()) {
            return Err(invalid("symbol contains whitespace or a null character"));
        }
        if classifier.is_alphanumeric(first) && !classifier.is_standalone(first) {
            return Err(invalid("symbol starts with an alphanumeric character"));
        }
        if chars[..chars.len() - 1]
            .iter()
            .any(|&c| classifier.is_standalone(c))
        {
            return Err(invalid("a standalone character cannot be followed by more characters"));
        }

        // Main-loop dispatch claims these before the graph is consulted
        for (ch, role) in [
            (self.quote, "the string quote"),
            (self.char_delimiter, "the char delimiter"),
            (self.number_separator, "the number separator"),
        ] {
            if first == ch {
                return Err(RegistryError::ConflictingSpecialCharacter {
                    character: ch,
                    first: role.to_string(),
                    second: format!("the first character of symbol '{}'", name),
                });
            }
        }

        Ok(())
    }

    fn resolve_comments(
        &self,
        by_name: &HashMap<String, Arc<TokenType>>,
    ) -> Result<Vec<CommentRule>, RegistryError> {
        let lookup = |name: &str| {
            by_name
                .get(name)
                .filter(|t| t.is_symbol())
                .cloned()
                .ok_or_else(|| RegistryError::UnknownCommentToken {
                    name: name.to_string(),
                })
        };

        let mut rules = Vec::with_capacity(self.comments.len());
        for pending in &self.comments {
            let rule = match pending {
                PendingComment::Line { open } => CommentRule {
                    opener: lookup(open)?,
                    style: CommentStyle::Line,
                },
                PendingComment::Block { open, close } => CommentRule {
                    opener: lookup(open)?,
                    style: CommentStyle::Block {
                        close: close.as_deref().map(lookup).transpose()?,
                    },
                },
            };
            log_debug!("Comment rule registered", "opener" => rule.opener.name());
            rules.push(rule);
        }

        Ok(rules)
    }
}

fn claim_spelling(
    owners: &mut HashMap<String, String>,
    name: &str,
    text: String,
) -> Result<(), RegistryError> {
    if let Some(first) = owners.get(&text) {
        return Err(RegistryError::DuplicateTokenShape {
            first: first.clone(),
            second: name.to_string(),
            text,
        });
    }
    owners.insert(text, name.to_string());
    Ok(())
}

fn check_word(name: &str, spelling: &str, classifier: &CharacterClassifier) -> Result<(), RegistryError> {
    let mut chars = spelling.chars();
    let valid = match chars.next() {
        Some(first) => classifier.is_alpha(first) && chars.all(|c| classifier.continues_identifier(c)),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidKeyword {
            name: name.to_string(),
            spelling: spelling.to_string(),
        })
    }
}
