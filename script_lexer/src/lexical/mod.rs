//! Lexical analysis driven by a token registry
//!
//! The [`Scanner`] walks the source once, character by character, and
//! dispatches on the registry's character classes: blanks are skipped,
//! quote and char delimiters start literals, digits start numbers, letters
//! start identifiers, and everything else is resolved against the token
//! graph with longest-match backtracking. Comments are collected beside the
//! token sequence, never inside it.

pub mod analyzer;
mod comments;
mod cursor;
pub mod error;
mod identifiers;
mod literals;
mod resolution;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::registry::{TokenCategory, TokenRegistry};
use std::sync::Arc;

pub use analyzer::{LexWarning, LexicalMetrics, ScanOutput, Scanner};
pub use error::{LexError, LexErrorKind};

// ============================================================================
// MODULE API
// ============================================================================

/// Scan `source` with a one-off scanner
pub fn scan(source: &str, registry: Arc<TokenRegistry>) -> Result<ScanOutput, LexError> {
    Scanner::new(registry).scan(source)
}

/// Scan with custom runtime preferences (resource limits stay compile-time)
pub fn scan_with_preferences(
    source: &str,
    registry: Arc<TokenRegistry>,
    preferences: LexicalPreferences,
) -> Result<ScanOutput, LexError> {
    Scanner::with_preferences(registry, preferences).scan(source)
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

const LEXICAL_ERROR_CODES: [crate::logging::Code; 12] = [
    codes::lexical::UNEXPECTED_CHARACTER,
    codes::lexical::UNTERMINATED_STRING,
    codes::lexical::MALFORMED_NUMBER,
    codes::lexical::IDENTIFIER_TOO_LONG,
    codes::lexical::STRING_TOO_LARGE,
    codes::lexical::RESERVED_TOKEN,
    codes::lexical::COMMENT_TOO_LONG,
    codes::lexical::TOO_MANY_TOKENS,
    codes::lexical::UNTERMINATED_CHAR,
    codes::lexical::DANGLING_NUMBER_SEPARATOR,
    codes::lexical::UNEXPECTED_END_OF_TOKEN,
    codes::lexical::NULL_CHARACTER,
];

/// Check that every lexical code has metadata and the limits are usable
pub fn validate_tokenization() -> Result<(), String> {
    for code in &LEXICAL_ERROR_CODES {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_STRING_SIZE == 0 {
        return Err("MAX_STRING_SIZE cannot be zero".to_string());
    }
    if MAX_IDENTIFIER_LENGTH == 0 {
        return Err("MAX_IDENTIFIER_LENGTH cannot be zero".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }
    if MAX_COMMENT_LENGTH == 0 {
        return Err("MAX_COMMENT_LENGTH cannot be zero".to_string());
    }
    if MAX_REPORTED_CONTINUATIONS == 0 {
        return Err("MAX_REPORTED_CONTINUATIONS cannot be zero".to_string());
    }

    Ok(())
}

/// Validate the module and log the active limits (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    validate_tokenization()?;

    crate::log_debug!("Lexical security limits initialized",
        "max_string_size" => MAX_STRING_SIZE,
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_comment_length" => MAX_COMMENT_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_reported_continuations" => MAX_REPORTED_CONTINUATIONS
    );

    Ok(())
}

/// Information about compile-time security limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityLimits {
    pub max_string_size: usize,
    pub max_identifier_length: usize,
    pub max_comment_length: usize,
    pub max_token_count: usize,
    pub max_reported_continuations: usize,
}

/// Get the current compile-time security limits (for reporting/debugging)
pub fn get_security_limits() -> SecurityLimits {
    SecurityLimits {
        max_string_size: MAX_STRING_SIZE,
        max_identifier_length: MAX_IDENTIFIER_LENGTH,
        max_comment_length: MAX_COMMENT_LENGTH,
        max_token_count: MAX_TOKEN_COUNT,
        max_reported_continuations: MAX_REPORTED_CONTINUATIONS,
    }
}

// ============================================================================
// ANALYSIS HELPERS
// ============================================================================

/// Token distribution of a scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub symbols: usize,
    pub literals: usize,
    pub comments: usize,
    pub warnings: usize,
}

impl TokenCounts {
    /// Tokens other than the end-of-file marker
    pub fn significant_tokens(&self) -> usize {
        self.keywords + self.identifiers + self.symbols + self.literals
    }

    pub fn has_content(&self) -> bool {
        self.significant_tokens() > 0 || self.comments > 0
    }
}

/// Count tokens by category
pub fn get_token_counts(output: &ScanOutput) -> TokenCounts {
    let mut counts = TokenCounts {
        comments: output.comments.len(),
        warnings: output.warnings.len(),
        ..Default::default()
    };

    for token in &output.tokens {
        counts.total += 1;
        match token.token_type.category() {
            TokenCategory::Keyword => counts.keywords += 1,
            TokenCategory::Identifier => counts.identifiers += 1,
            TokenCategory::Symbol => counts.symbols += 1,
            TokenCategory::Literal(_) => counts.literals += 1,
            TokenCategory::EndOfFile => {}
        }
    }

    counts
}
