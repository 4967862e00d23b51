//! Character classification for registry-driven scanning
//!
//! Raw `char`s are mapped to [`TokenCharacter`] values. The handful of shared
//! characters every language agrees on (whitespace, newline, the null
//! sentinel) get their own variants; everything else is carried as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Symbolic view of a single source character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenCharacter {
    Space,
    CarriageReturn,
    Tab,
    Newline,
    /// Null sentinel; never valid in scanned source
    Null,
    /// Any language-specific character
    Char(char),
}

impl TokenCharacter {
    /// Classify a raw character
    pub fn from_char(ch: char) -> Self {
        match ch {
            ' ' => Self::Space,
            '\r' => Self::CarriageReturn,
            '\t' => Self::Tab,
            '\n' => Self::Newline,
            '\0' => Self::Null,
            other => Self::Char(other),
        }
    }

    /// The raw character this value stands for
    pub fn as_char(&self) -> char {
        match self {
            Self::Space => ' ',
            Self::CarriageReturn => '\r',
            Self::Tab => '\t',
            Self::Newline => '\n',
            Self::Null => '\0',
            Self::Char(ch) => *ch,
        }
    }

    /// Whitespace that is skipped without affecting line tracking
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Space | Self::CarriageReturn | Self::Tab)
    }

    /// One of the shared characters rather than a language character
    pub fn is_shared(&self) -> bool {
        !matches!(self, Self::Char(_))
    }
}

impl From<char> for TokenCharacter {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

impl fmt::Display for TokenCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => write!(f, "<space>"),
            Self::CarriageReturn => write!(f, "<cr>"),
            Self::Tab => write!(f, "<tab>"),
            Self::Newline => write!(f, "<newline>"),
            Self::Null => write!(f, "<null>"),
            Self::Char(ch) => write!(f, "{}", ch),
        }
    }
}

/// Character predicates used by the scanner
///
/// Digits are ASCII only, since number text is parsed as `f64`. Alphabetic
/// characters follow Unicode. `identifier_extras` may continue an identifier
/// but never start one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClassifier {
    standalone: BTreeSet<char>,
    identifier_extras: BTreeSet<char>,
}

impl CharacterClassifier {
    pub fn new(standalone: BTreeSet<char>, identifier_extras: BTreeSet<char>) -> Self {
        Self {
            standalone,
            identifier_extras,
        }
    }

    pub fn classify(&self, ch: char) -> TokenCharacter {
        TokenCharacter::from_char(ch)
    }

    pub fn is_digit(&self, ch: char) -> bool {
        ch.is_ascii_digit()
    }

    pub fn is_alpha(&self, ch: char) -> bool {
        ch.is_alphabetic()
    }

    pub fn is_alphanumeric(&self, ch: char) -> bool {
        self.is_alpha(ch) || self.is_digit(ch)
    }

    /// Alphanumeric or a registered identifier continuation character
    pub fn continues_identifier(&self, ch: char) -> bool {
        self.is_alphanumeric(ch) || self.identifier_extras.contains(&ch)
    }

    /// A character that never combines with a following character
    pub fn is_standalone(&self, ch: char) -> bool {
        self.standalone.contains(&ch)
    }

    pub fn is_line_separator(&self, ch: char) -> bool {
        TokenCharacter::from_char(ch) == TokenCharacter::Newline
    }

    pub fn standalone_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.standalone.iter().copied()
    }

    pub fn identifier_extras(&self) -> impl Iterator<Item = char> + '_ {
        self.identifier_extras.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_characters() {
        assert_eq!(TokenCharacter::from_char(' '), TokenCharacter::Space);
        assert_eq!(TokenCharacter::from_char('\r'), TokenCharacter::CarriageReturn);
        assert_eq!(TokenCharacter::from_char('\t'), TokenCharacter::Tab);
        assert_eq!(TokenCharacter::from_char('\n'), TokenCharacter::Newline);
        assert_eq!(TokenCharacter::from_char('\0'), TokenCharacter::Null);
        assert_eq!(TokenCharacter::from_char('+'), TokenCharacter::Char('+'));

        assert!(TokenCharacter::Tab.is_blank());
        assert!(!TokenCharacter::Newline.is_blank());
        assert!(TokenCharacter::Null.is_shared());
        assert!(!TokenCharacter::Char('x').is_shared());
    }

    #[test]
    fn test_round_trip_to_char() {
        for ch in [' ', '\r', '\t', '\n', '\0', 'a', '€'] {
            assert_eq!(TokenCharacter::from_char(ch).as_char(), ch);
        }
    }

    #[test]
    fn test_classifier_predicates() {
        let classifier = CharacterClassifier::new(
            ['(', ')'].into_iter().collect(),
            ['_'].into_iter().collect(),
        );

        assert!(classifier.is_digit('7'));
        assert!(!classifier.is_digit('x'));
        assert!(classifier.is_alpha('é'));
        assert!(classifier.is_alphanumeric('9'));
        assert!(!classifier.is_alphanumeric('_'));
        assert!(classifier.continues_identifier('_'));
        assert!(classifier.is_standalone('('));
        assert!(!classifier.is_standalone('+'));
        assert!(classifier.is_line_separator('\n'));
        assert!(!classifier.is_line_separator('\r'));
    }
}
