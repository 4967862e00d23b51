//! Core scanner implementation
//!
//! A [`Scanner`] turns source text into tokens and comments using the grammar
//! held by its [`TokenRegistry`]. Each call to [`Scanner::scan`] runs a fresh
//! [`ScanSession`] that owns the cursor and the output being built; the
//! scanner itself keeps only the registry, preferences, the keyword table and
//! the metrics of the last scan.

use super::cursor::Cursor;
use super::error::{LexError, LexErrorKind};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::registry::{TokenCategory, TokenCharacter, TokenRegistry, TokenType};
use crate::tokens::{Comment, Literal, Token};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success, log_warning};
use std::collections::HashMap;
use std::sync::Arc;

/// Result of a successful scan
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Tokens in source order, ending with exactly one end-of-file token
    pub tokens: Vec<Token>,
    /// Comments in source order
    pub comments: Vec<Comment>,
    pub warnings: Vec<LexWarning>,
}

impl ScanOutput {
    /// Tokens without the trailing end-of-file token
    pub fn significant_tokens(&self) -> &[Token] {
        match self.tokens.split_last() {
            Some((last, rest)) if last.is_eof() => rest,
            _ => &self.tokens,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Non-fatal diagnostic: a reserved token type was used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexWarning {
    pub token_type: String,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl LexWarning {
    pub fn code(&self) -> crate::logging::Code {
        codes::lexical::RESERVED_TOKEN
    }

    pub fn message(&self) -> String {
        format!(
            "Reserved token used: {} '{}' at line {}, column {}",
            self.token_type, self.lexeme, self.line, self.column
        )
    }
}

/// Per-scan metrics, shaped by runtime preferences
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub source_chars: usize,
    pub lines: u32,
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub symbol_tokens: usize,
    pub literal_tokens: usize,
    pub comment_count: usize,
    pub reserved_uses: usize,
    pub backtracks: usize,
    pub max_string_length: usize,
    pub max_comment_length: usize,

    // Only filled when symbol tracking is enabled
    pub symbol_usage: HashMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.token_type.category() {
            TokenCategory::Keyword => self.keyword_tokens += 1,
            TokenCategory::Identifier => self.identifier_tokens += 1,
            TokenCategory::Literal(_) => self.literal_tokens += 1,
            TokenCategory::Symbol => {
                self.symbol_tokens += 1;

                if preferences.track_symbol_usage {
                    *self
                        .symbol_usage
                        .entry(token.kind().to_string())
                        .or_insert(0) += 1;
                }
            }
            TokenCategory::EndOfFile => {}
        }
    }

    pub(crate) fn record_string_length(&mut self, length: usize, preferences: &LexicalPreferences) {
        self.max_string_length = self.max_string_length.max(length);

        if preferences.log_string_statistics {
            log_debug!("String literal processed",
                "length" => length,
                "max_so_far" => self.max_string_length
            );
        }
    }

    pub(crate) fn record_comment(&mut self, length: usize) {
        self.comment_count += 1;
        self.max_comment_length = self.max_comment_length.max(length);
    }

    pub(crate) fn record_backtrack(&mut self) {
        self.backtracks += 1;
    }

    pub(crate) fn record_reserved(&mut self) {
        self.reserved_uses += 1;
    }
}

/// Word lookups derived from the registry at the start of every scan
#[derive(Debug, Clone, Default)]
pub(crate) struct KeywordTable {
    keywords: HashMap<String, Arc<TokenType>>,
    literals: HashMap<String, Arc<TokenType>>,
}

impl KeywordTable {
    pub(crate) fn from_registry(registry: &TokenRegistry) -> Self {
        let keywords = registry
            .keyword_types()
            .map(|t| (t.keyword_spelling(), Arc::clone(t)))
            .collect();
        let literals = registry
            .literal_types()
            .filter_map(|t| t.lexeme().map(|text| (text.to_string(), Arc::clone(t))))
            .collect();

        Self { keywords, literals }
    }

    pub(crate) fn keyword(&self, text: &str) -> Option<&Arc<TokenType>> {
        self.keywords.get(text)
    }

    pub(crate) fn literal(&self, text: &str) -> Option<&Arc<TokenType>> {
        self.literals.get(text)
    }

    pub(crate) fn len(&self) -> usize {
        self.keywords.len() + self.literals.len()
    }
}

/// Registry-driven scanner
///
/// Scanning takes `&mut self`, so one scanner never runs two scans at once.
/// Share the registry, not the scanner, to scan on several threads.
pub struct Scanner {
    registry: Arc<TokenRegistry>,
    preferences: LexicalPreferences,
    keywords: KeywordTable,
    metrics: LexicalMetrics,
}

impl Scanner {
    pub fn new(registry: Arc<TokenRegistry>) -> Self {
        Self::with_preferences(registry, LexicalPreferences::default())
    }

    pub fn with_preferences(registry: Arc<TokenRegistry>, preferences: LexicalPreferences) -> Self {
        Self {
            registry,
            preferences,
            keywords: KeywordTable::default(),
            metrics: LexicalMetrics::default(),
        }
    }

    /// Scan `source` into tokens and comments
    pub fn scan(&mut self, source: &str) -> Result<ScanOutput, LexError> {
        self.metrics = LexicalMetrics::default();
        self.keywords = KeywordTable::from_registry(&self.registry);

        log_debug!("Starting lexical analysis",
            "char_count" => source.chars().count(),
            "token_types" => self.registry.token_types().len(),
            "words" => self.keywords.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let mut session = ScanSession {
            registry: &self.registry,
            keywords: &self.keywords,
            preferences: &self.preferences,
            metrics: &mut self.metrics,
            cursor: Cursor::new(source),
            output: ScanOutput::default(),
        };

        match session.run() {
            Ok(()) => {
                let output = session.output;
                self.log_completion(&output);
                Ok(output)
            }
            Err(error) => {
                let tokens_processed = session.output.tokens.len();
                self.log_failure(&error, tokens_processed);
                Err(error)
            }
        }
    }

    pub fn registry(&self) -> &Arc<TokenRegistry> {
        &self.registry
    }

    /// Swap the grammar; the next scan picks it up
    pub fn set_registry(&mut self, registry: Arc<TokenRegistry>) {
        self.registry = registry;
    }

    /// Metrics of the most recent scan
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    fn log_completion(&self, output: &ScanOutput) {
        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "token_count" => output.tokens.len(),
            "comments" => output.comments.len(),
            "warnings" => output.warnings.len(),
            "keywords" => self.metrics.keyword_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "symbols" => self.metrics.symbol_tokens,
            "literals" => self.metrics.literal_tokens,
            "backtracks" => self.metrics.backtracks,
            "lines" => self.metrics.lines
        );
    }

    fn log_failure(&self, error: &LexError, tokens_processed: usize) {
        let message = if self.preferences.include_position_in_errors {
            format!(
                "Lexical analysis failed at line {}, column {}: {}",
                error.line,
                error.column,
                error.message()
            )
        } else {
            format!("Lexical analysis failed: {}", error.message())
        };

        log_error!(error.error_code(), &message,
            "phase" => error.phase(),
            "line" => error.line,
            "column" => error.column,
            "tokens_processed" => tokens_processed
        );
    }
}

/// State of one scan: cursor plus the output built so far
pub(super) struct ScanSession<'s> {
    pub(super) registry: &'s TokenRegistry,
    pub(super) keywords: &'s KeywordTable,
    pub(super) preferences: &'s LexicalPreferences,
    pub(super) metrics: &'s mut LexicalMetrics,
    pub(super) cursor: Cursor,
    pub(super) output: ScanOutput,
}

impl ScanSession<'_> {
    /// Scan every token, then append EOF at the final line with the
    /// end-of-input character offset as its column
    fn run(&mut self) -> Result<(), LexError> {
        while !self.cursor.is_at_end() {
            self.cursor.mark_start();
            self.scan_token()?;
        }

        self.cursor.mark_start();
        self.metrics.source_chars = self.cursor.len();
        self.metrics.lines = self.cursor.line();

        let eof = Token::new(
            Arc::clone(self.registry.eof_type()),
            "",
            None,
            self.cursor.line(),
            self.cursor.start() as u32,
        );
        self.output.tokens.push(eof);

        Ok(())
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let registry = self.registry;
        let classifier = registry.classifier();

        let Some(ch) = self.cursor.advance() else {
            return Ok(());
        };

        match classifier.classify(ch) {
            TokenCharacter::Space | TokenCharacter::CarriageReturn | TokenCharacter::Tab => Ok(()),
            // Line and column were already updated by the cursor
            TokenCharacter::Newline => Ok(()),
            TokenCharacter::Null => Err(self.error(LexErrorKind::NullCharacter)),
            TokenCharacter::Char(c) if c == registry.quote() => self.scan_string(),
            TokenCharacter::Char(c) if c == registry.char_delimiter() => self.scan_char(),
            TokenCharacter::Char(c) if c == registry.number_separator() => {
                Err(self.error(LexErrorKind::DanglingNumberSeparator { separator: c }))
            }
            TokenCharacter::Char(c)
                if classifier.is_standalone(c) || !classifier.is_alphanumeric(c) =>
            {
                self.resolve_symbol(c)
            }
            TokenCharacter::Char(c) if classifier.is_digit(c) => self.scan_number(),
            TokenCharacter::Char(c) if classifier.is_alpha(c) => self.scan_identifier(),
            TokenCharacter::Char(c) => {
                Err(self.error(LexErrorKind::UnexpectedCharacter { character: c }))
            }
        }
    }

    /// Error positioned at the start of the token being scanned
    pub(super) fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.cursor.start_line(), self.cursor.start_column())
    }

    /// Emit a token spanning from the token start to the cursor
    pub(super) fn add_token(
        &mut self,
        token_type: Arc<TokenType>,
        literal: Option<Literal>,
    ) -> Result<(), LexError> {
        if self.output.tokens.len() >= MAX_TOKEN_COUNT {
            return Err(self.error(LexErrorKind::TooManyTokens {
                count: self.output.tokens.len() + 1,
            }));
        }

        if token_type.is_reserved() {
            self.warn_reserved(&token_type);
        }

        let token = Token::new(
            token_type,
            self.cursor.lexeme(),
            literal,
            self.cursor.start_line(),
            self.cursor.start_column(),
        );
        self.metrics.record_token(&token, self.preferences);
        self.output.tokens.push(token);
        Ok(())
    }

    pub(super) fn add_comment(&mut self, text: String) {
        self.metrics.record_comment(text.chars().count());
        let comment = Comment::new(self.cursor.start_line(), self.cursor.start_column(), text);
        self.output.comments.push(comment);
    }

    fn warn_reserved(&mut self, token_type: &TokenType) {
        let warning = LexWarning {
            token_type: token_type.name().to_string(),
            lexeme: self.cursor.lexeme(),
            line: self.cursor.start_line(),
            column: self.cursor.start_column(),
        };

        log_warning!(code = warning.code(), &warning.message(),
            span = Span::new(self.cursor.start_position(), self.cursor.position()),
            "token" => token_type.name()
        );

        self.metrics.record_reserved();
        self.output.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use assert_matches::assert_matches;

    fn registry() -> Arc<TokenRegistry> {
        Arc::new(
            RegistryBuilder::new()
                .standalone(['(', ')'])
                .identifier_char('_')
                .symbol("LEFT_PAREN", "(")
                .symbol("RIGHT_PAREN", ")")
                .symbol("EQUAL", "=")
                .symbol("EQUAL_EQUAL", "==")
                .symbol("FAT_ARROW", "=>")
                .symbol("PLUS", "+")
                .symbol("PLUS_PLUS", "++")
                .symbol("SLASH", "/")
                .symbol("SLASH_SLASH", "//")
                .reserved_symbol("HASH", "#")
                .line_comment("SLASH_SLASH")
                .keyword("LET")
                .reserved_keyword("GOTO")
                .literal_word("TRUE", "true")
                .build()
                .unwrap(),
        )
    }

    fn kinds(output: &ScanOutput) -> Vec<&str> {
        output.tokens.iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_whitespace_only_yields_eof() {
        let mut scanner = Scanner::new(registry());
        for source in ["", "   ", " \t\r\n  \n"] {
            let output = scanner.scan(source).unwrap();
            assert_eq!(kinds(&output), vec!["EOF"]);
            assert!(output.comments.is_empty());
        }
    }

    #[test]
    fn test_eof_position() {
        let mut scanner = Scanner::new(registry());
        let output = scanner.scan("a\nbc").unwrap();
        let eof = output.tokens.last().unwrap();
        assert_eq!(eof.line, 2);
        assert_eq!(eof.column, 4);
        assert_eq!(output.significant_tokens().len(), 2);
    }

    #[test]
    fn test_dispatch_mix() {
        let mut scanner = Scanner::new(registry());
        let output = scanner.scan("let x = (1 + y) // done").unwrap();
        assert_eq!(
            kinds(&output),
            vec![
                "LET",
                "IDENTIFIER",
                "EQUAL",
                "LEFT_PAREN",
                "NUMBER",
                "PLUS",
                "IDENTIFIER",
                "RIGHT_PAREN",
                "EOF"
            ]
        );
        assert_eq!(output.comments, vec![Comment::new(1, 16, " done")]);
    }

    #[test]
    fn test_null_character_rejected() {
        let mut scanner = Scanner::new(registry());
        let error = scanner.scan("a \0").unwrap_err();
        assert_matches!(error.kind, LexErrorKind::NullCharacter);
        assert_eq!((error.line, error.column), (1, 2));
    }

    #[test]
    fn test_dangling_separator_rejected() {
        let mut scanner = Scanner::new(registry());
        let error = scanner.scan("x = _1").unwrap_err();
        assert_matches!(
            error.kind,
            LexErrorKind::DanglingNumberSeparator { separator: '_' }
        );
        assert_eq!(error.column, 4);
    }

    #[test]
    fn test_reserved_tokens_warn_but_emit() {
        let mut scanner = Scanner::new(registry());
        let output = scanner.scan("goto #").unwrap();

        assert_eq!(kinds(&output), vec!["GOTO", "HASH", "EOF"]);
        assert_eq!(output.warnings.len(), 2);
        assert_eq!(output.warnings[0].token_type, "GOTO");
        assert_eq!(output.warnings[1].column, 5);
        assert_eq!(output.warnings[1].code(), codes::lexical::RESERVED_TOKEN);
        assert_eq!(scanner.metrics().reserved_uses, 2);
    }

    #[test]
    fn test_metrics_follow_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            track_symbol_usage: true,
            ..Default::default()
        };
        let mut scanner = Scanner::with_preferences(registry(), preferences);
        scanner.scan("a + b + true\n").unwrap();

        let metrics = scanner.metrics();
        assert_eq!(metrics.total_tokens, 5);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.literal_tokens, 1);
        assert_eq!(metrics.symbol_usage.get("PLUS"), Some(&2));
        assert_eq!(metrics.lines, 2);

        scanner.set_preferences(LexicalPreferences {
            collect_detailed_metrics: false,
            ..Default::default()
        });
        scanner.scan("a + b").unwrap();
        assert_eq!(scanner.metrics().total_tokens, 3);
        assert_eq!(scanner.metrics().symbol_tokens, 0);
    }

    #[test]
    fn test_registry_swap_takes_effect_next_scan() {
        let mut scanner = Scanner::new(registry());
        assert_eq!(kinds(&scanner.scan("let").unwrap())[0], "LET");

        let plain = Arc::new(RegistryBuilder::new().build().unwrap());
        scanner.set_registry(plain);
        assert_eq!(kinds(&scanner.scan("let").unwrap())[0], "IDENTIFIER");
    }
}
