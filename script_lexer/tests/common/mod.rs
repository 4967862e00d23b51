use script_lexer::{RegistryBuilder, TokenRegistry};
use std::sync::Arc;

/// A small C-like scripting grammar used across the integration tests
pub fn script_registry() -> Arc<TokenRegistry> {
    let registry = RegistryBuilder::new()
        .standalone(['(', ')', '{', '}', ',', ';'])
        .identifier_char('_')
        .symbol("LEFT_PAREN", "(")
        .symbol("RIGHT_PAREN", ")")
        .symbol("LEFT_BRACE", "{")
        .symbol("RIGHT_BRACE", "}")
        .symbol("COMMA", ",")
        .symbol("SEMICOLON", ";")
        .symbol("DOT", ".")
        .symbol("MINUS", "-")
        .symbol("ARROW", "->")
        .symbol("PLUS", "+")
        .symbol("PLUS_PLUS", "++")
        .symbol("PLUS_EQUAL", "+=")
        .symbol("STAR", "*")
        .symbol("SLASH", "/")
        .symbol("SLASH_SLASH", "//")
        .symbol("SLASH_STAR", "/*")
        .symbol("STAR_SLASH", "*/")
        .symbol("EQUAL", "=")
        .symbol("EQUAL_EQUAL", "==")
        .symbol("FAT_ARROW", "=>")
        .symbol("BANG", "!")
        .symbol("BANG_EQUAL", "!=")
        .symbol("LESS", "<")
        .symbol("LESS_EQUAL", "<=")
        .symbol("SHIFT_LEFT_ASSIGN", "<<=")
        .reserved_symbol("AT", "@")
        .line_comment("SLASH_SLASH")
        .block_comment("SLASH_STAR", Some("STAR_SLASH"))
        .keyword("LET")
        .keyword("FN")
        .keyword("IF")
        .keyword("ELSE")
        .keyword("RETURN")
        .keyword("WHILE")
        .reserved_keyword("ASYNC")
        .literal_word("TRUE", "true")
        .literal_word("FALSE", "false")
        .literal_word("NULL", "null")
        .build()
        .expect("fixture registry is valid");

    Arc::new(registry)
}
