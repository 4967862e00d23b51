//! Longest-match symbol resolution over the token graph

use super::analyzer::ScanSession;
use super::error::{LexError, LexErrorKind};
use crate::config::compile_time::lexical::MAX_REPORTED_CONTINUATIONS;
use crate::log_debug;
use crate::registry::{CommentStyle, NodeId, TokenCharacter, TokenType};
use std::sync::Arc;

impl ScanSession<'_> {
    /// Resolve the symbol starting with `first`, which has already been consumed
    pub(super) fn resolve_symbol(&mut self, first: char) -> Result<(), LexError> {
        let registry = self.registry;
        let graph = registry.graph();

        let Some(root) = graph.root_for(TokenCharacter::from_char(first)) else {
            return Err(self.error(LexErrorKind::UnexpectedCharacter { character: first }));
        };

        let mut node = root;
        if !registry.classifier().is_standalone(first) {
            while let Some(next) = self.cursor.peek() {
                match graph.child_matching(node, TokenCharacter::from_char(next)) {
                    Some(child) => {
                        self.cursor.advance();
                        node = child;
                    }
                    None => break,
                }
            }
        }

        let resolved = match graph.node(node).token_type() {
            Some(token_type) => Arc::clone(token_type),
            None => self.backtrack(node)?,
        };

        self.emit_symbol(resolved)
    }

    /// Fall back to the nearest ancestor of `stop` that resolves a type,
    /// returning the characters consumed past it to the input
    fn backtrack(&mut self, stop: NodeId) -> Result<Arc<TokenType>, LexError> {
        let graph = self.registry.graph();

        let fallback = graph.ancestors(stop).find_map(|id| {
            let node = graph.node(id);
            node.token_type().map(|t| (node.depth(), Arc::clone(t)))
        });

        let Some((depth, token_type)) = fallback else {
            return Err(self.unexpected_end_of_token(stop));
        };

        let overshoot = graph.node(stop).depth() - depth;
        self.cursor.rewind(overshoot);
        self.metrics.record_backtrack();

        log_debug!("Backtracked to shorter token",
            "token" => token_type.name(),
            "released_chars" => overshoot,
            "line" => self.cursor.start_line()
        );

        Ok(token_type)
    }

    fn unexpected_end_of_token(&self, stop: NodeId) -> LexError {
        let continuations = self
            .registry
            .graph()
            .reachable_types(stop, MAX_REPORTED_CONTINUATIONS)
            .iter()
            .map(|t| t.to_string())
            .collect();

        self.error(LexErrorKind::UnexpectedEndOfToken {
            text: self.cursor.lexeme(),
            continuations,
        })
    }

    /// Emit a resolved symbol, or scan a comment if it opens one
    fn emit_symbol(&mut self, token_type: Arc<TokenType>) -> Result<(), LexError> {
        let registry = self.registry;

        match registry.comment_rule_for(&token_type).map(|rule| &rule.style) {
            Some(CommentStyle::Line) | Some(CommentStyle::Block { close: None }) => {
                self.scan_line_comment()
            }
            Some(CommentStyle::Block { close: Some(close) }) => self.scan_block_comment(close),
            None => self.add_token(token_type, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexical::{LexErrorKind, Scanner};
    use crate::registry::RegistryBuilder;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    fn scan_kinds(builder: RegistryBuilder, source: &str) -> Vec<String> {
        let mut scanner = Scanner::new(Arc::new(builder.build().unwrap()));
        scanner
            .scan(source)
            .unwrap()
            .tokens
            .iter()
            .map(|t| t.lexeme.clone())
            .collect()
    }

    fn equals_family() -> RegistryBuilder {
        RegistryBuilder::new()
            .symbol("EQUAL", "=")
            .symbol("EQUAL_EQUAL", "==")
            .symbol("FAT_ARROW", "=>")
    }

    #[test]
    fn test_longest_match() {
        assert_eq!(scan_kinds(equals_family(), "==="), vec!["==", "=", ""]);
        assert_eq!(scan_kinds(equals_family(), "=>=="), vec!["=>", "==", ""]);
    }

    #[test]
    fn test_adjacent_operators_split() {
        let builder = RegistryBuilder::new()
            .symbol("EQUAL", "=")
            .symbol("PLUS_PLUS", "++");
        assert_eq!(scan_kinds(builder, "1=++1"), vec!["1", "=", "++", "1", ""]);
    }

    #[test]
    fn test_backtrack_to_ancestor() {
        let builder = RegistryBuilder::new()
            .symbol("MINUS", "-")
            .symbol("LONG_ARROW", "->>")
            .symbol("GREATER", ">");
        let mut scanner = Scanner::new(Arc::new(builder.build().unwrap()));

        let output = scanner.scan("->x").unwrap();
        let lexemes: Vec<&str> = output.tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["-", ">", "x", ""]);
        assert_eq!(output.tokens[1].column, 1);
        assert_eq!(output.tokens[2].column, 2);
        assert_eq!(scanner.metrics().backtracks, 1);

        let output = scanner.scan("->>").unwrap();
        assert_eq!(output.tokens[0].kind(), "LONG_ARROW");
    }

    #[test]
    fn test_unexpected_end_of_token_lists_continuations() {
        let builder = RegistryBuilder::new()
            .symbol("ARROW", "->")
            .symbol("ARROW_EQ", "->=");
        let mut scanner = Scanner::new(Arc::new(builder.build().unwrap()));

        let error = scanner.scan("a -x").unwrap_err();
        assert_eq!((error.line, error.column), (1, 2));
        assert_matches!(
            &error.kind,
            LexErrorKind::UnexpectedEndOfToken { text, continuations }
                if text == "-" && continuations.len() == 2
        );
        assert!(error.message().contains("ARROW '->'"));
        assert!(error.message().contains("ARROW_EQ '->='"));
    }

    #[test]
    fn test_unknown_character() {
        let mut scanner = Scanner::new(Arc::new(equals_family().build().unwrap()));
        let error = scanner.scan("a\n  @").unwrap_err();
        assert_matches!(error.kind, LexErrorKind::UnexpectedCharacter { character: '@' });
        assert_eq!((error.line, error.column), (2, 2));
    }

    #[test]
    fn test_standalone_never_extends() {
        let builder = RegistryBuilder::new()
            .standalone(['!'])
            .symbol("BANG", "!");
        assert_eq!(scan_kinds(builder, "!!"), vec!["!", "!", ""]);
    }
}
