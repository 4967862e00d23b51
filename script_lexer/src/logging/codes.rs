//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes the lexer emits, their metadata, and
//! the classification functions used by log events.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const MALFORMED_NUMBER: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const STRING_TOO_LARGE: Code = Code::new("E024");
    pub const RESERVED_TOKEN: Code = Code::new("E025");
    pub const COMMENT_TOO_LONG: Code = Code::new("E026");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
    pub const UNTERMINATED_CHAR: Code = Code::new("E028");
    pub const DANGLING_NUMBER_SEPARATOR: Code = Code::new("E029");
    pub const UNEXPECTED_END_OF_TOKEN: Code = Code::new("E030");
    pub const NULL_CHARACTER: Code = Code::new("E032");
}

/// Token registry construction codes
pub mod registry {
    use super::Code;

    pub const DUPLICATE_TOKEN_TYPE: Code = Code::new("E060");
    pub const DUPLICATE_TOKEN_SHAPE: Code = Code::new("E061");
    pub const INVALID_SYMBOL: Code = Code::new("E062");
    pub const UNKNOWN_COMMENT_TOKEN: Code = Code::new("E063");
    pub const CONFLICTING_SPECIAL_CHARACTER: Code = Code::new("E064");
    pub const INVALID_KEYWORD: Code = Code::new("E065");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const REGISTRY_BUILT: Code = Code::new("I030");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const ERROR_METADATA: &[ErrorMetadata] = &[
    // System errors
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the source that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging system initialization failure",
        "Initialize logging once, before the first scan",
    ),
    // Lexical errors
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "Character is not part of any token the registry knows",
        "Remove the character or register a token type that uses it",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "String literal not properly terminated",
        "Add the closing quote character",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::Low,
        false,
        true,
        "Number literal is malformed",
        "Use single separators between digits, e.g. 1_000.5",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::Low,
        false,
        true,
        "Identifier exceeds maximum allowed length",
        "Shorten the identifier",
    ),
    ErrorMetadata::new(
        "E024",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "String literal exceeds maximum size limit",
        "Split the string into smaller parts",
    ),
    ErrorMetadata::new(
        "E025",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Reserved token used",
        "Avoid tokens reserved for future language versions",
    ),
    ErrorMetadata::new(
        "E026",
        "Lexical",
        Severity::Low,
        false,
        true,
        "Comment exceeds maximum allowed length",
        "Split the comment across several comments",
    ),
    ErrorMetadata::new(
        "E027",
        "Lexical",
        Severity::High,
        false,
        true,
        "Source produces too many tokens",
        "Split the script into smaller sources",
    ),
    ErrorMetadata::new(
        "E028",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "Char literal not properly terminated",
        "Char literals hold exactly one character between delimiters",
    ),
    ErrorMetadata::new(
        "E029",
        "Lexical",
        Severity::Low,
        false,
        true,
        "Number separator found outside of a number",
        "Remove the separator or place it between digits",
    ),
    ErrorMetadata::new(
        "E030",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "Input ended in the middle of a multi-character token",
        "Complete the token using one of the listed continuations",
    ),
    ErrorMetadata::new(
        "E032",
        "Lexical",
        Severity::Critical,
        false,
        true,
        "Null sentinel character read during scanning",
        "Remove NUL bytes from the source; otherwise file a bug report",
    ),
    // Registry errors
    ErrorMetadata::new(
        "E060",
        "Registry",
        Severity::High,
        false,
        true,
        "Two token types share the same name",
        "Give every token type a unique name",
    ),
    ErrorMetadata::new(
        "E061",
        "Registry",
        Severity::High,
        false,
        true,
        "Two token types spell the same character sequence",
        "Remove one of the duplicated symbols",
    ),
    ErrorMetadata::new(
        "E062",
        "Registry",
        Severity::High,
        false,
        true,
        "Symbol text is empty or starts with an identifier character",
        "Symbols must start with a punctuation character",
    ),
    ErrorMetadata::new(
        "E063",
        "Registry",
        Severity::High,
        false,
        true,
        "Comment rule references an unregistered symbol",
        "Register the comment delimiters as symbols first",
    ),
    ErrorMetadata::new(
        "E064",
        "Registry",
        Severity::High,
        false,
        true,
        "Special characters collide with each other or with whitespace",
        "Pick distinct quote, char, separator and delimiter characters",
    ),
    ErrorMetadata::new(
        "E065",
        "Registry",
        Severity::High,
        false,
        true,
        "Keyword or literal word is not a valid identifier",
        "Keywords must start alphabetic and contain only identifier characters",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| ERROR_METADATA.iter().map(|m| (m.code, m)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    if let Some(metadata) = get_error_metadata(code) {
        return metadata.category;
    }
    if code.starts_with('I') {
        "Success"
    } else {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            lexical::UNEXPECTED_CHARACTER,
            lexical::UNTERMINATED_STRING,
            lexical::MALFORMED_NUMBER,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::STRING_TOO_LARGE,
            lexical::RESERVED_TOKEN,
            lexical::COMMENT_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            lexical::UNTERMINATED_CHAR,
            lexical::DANGLING_NUMBER_SEPARATOR,
            lexical::UNEXPECTED_END_OF_TOKEN,
            lexical::NULL_CHARACTER,
            registry::DUPLICATE_TOKEN_TYPE,
            registry::DUPLICATE_TOKEN_SHAPE,
            registry::INVALID_SYMBOL,
            registry::UNKNOWN_COMMENT_TOKEN,
            registry::CONFLICTING_SPECIAL_CHARACTER,
            registry::INVALID_KEYWORD,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_reserved_token_is_not_fatal() {
        let code = lexical::RESERVED_TOKEN.as_str();
        assert!(is_recoverable(code));
        assert!(!requires_halt(code));
        assert_eq!(get_severity(code), Severity::Low);
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_category(success::TOKENIZATION_COMPLETE.as_str()), "Success");
        assert_eq!(get_severity("X999"), Severity::Medium);
    }
}
