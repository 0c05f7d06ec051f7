use crate::diagnostic::{Diagnostic, Level};
use crate::source::Range;
use crate::version::Version;
use thiserror::Error;

/// The three ways lexing can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Nothing in the grammar matches at the cursor.
    Lexical,
    /// The pattern matched, but the selected grammar version forbids it.
    Version,
    /// Bracket nesting is violated.
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected {}", quote_char(.character))]
    UnexpectedCharacter { character: char, location: Range },

    #[error("cannot lex Python {requested}")]
    UnsupportedVersion { requested: Version },

    #[error("in Python 3, long integer literals were removed")]
    DeprecatedLongIntegerSuffix { location: Range },

    #[error("in Python 3, decimal literals must not start with a zero")]
    InvalidLeadingZeroDecimal { location: Range },

    #[error("invalid digit '{digit}' in octal literal")]
    InvalidOctalDigit { digit: char, location: Range },

    #[error("mismatched '{delimiter}'")]
    MismatchedBracket {
        delimiter: char,
        opener: char,
        opener_location: Range,
        closer_location: Range,
    },

    #[error("unmatched '{delimiter}'")]
    UnmatchedBracket { delimiter: char, location: Range },
}

impl LexError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LexError::UnexpectedCharacter { .. } => ErrorClass::Lexical,
            LexError::UnsupportedVersion { .. }
            | LexError::DeprecatedLongIntegerSuffix { .. }
            | LexError::InvalidLeadingZeroDecimal { .. }
            | LexError::InvalidOctalDigit { .. } => ErrorClass::Version,
            LexError::MismatchedBracket { .. } | LexError::UnmatchedBracket { .. } => {
                ErrorClass::Structural
            }
        }
    }

    /// Primary source location.  `UnsupportedVersion` is raised before any
    /// source is looked at, so it has none.
    pub fn location(&self) -> Option<Range> {
        match self {
            LexError::UnexpectedCharacter { location, .. }
            | LexError::DeprecatedLongIntegerSuffix { location }
            | LexError::InvalidLeadingZeroDecimal { location }
            | LexError::InvalidOctalDigit { location, .. }
            | LexError::UnmatchedBracket { location, .. } => Some(*location),
            LexError::MismatchedBracket {
                closer_location, ..
            } => Some(*closer_location),
            LexError::UnsupportedVersion { .. } => None,
        }
    }

    /// Convert into a located diagnostic.  Returns `None` for errors with no
    /// source location.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        let diag = match self {
            LexError::UnexpectedCharacter {
                character,
                location,
            } => Diagnostic::new(Level::Fatal, "unexpected {character}", *location)
                .with_arg("character", quote_char(character)),
            LexError::UnsupportedVersion { .. } => return None,
            LexError::DeprecatedLongIntegerSuffix { location } => Diagnostic::new(
                Level::Error,
                "in Python 3, long integer literals were removed",
                *location,
            ),
            LexError::InvalidLeadingZeroDecimal { location } => Diagnostic::new(
                Level::Error,
                "in Python 3, decimal literals must not start with a zero",
                *location,
            ),
            LexError::InvalidOctalDigit { digit, location } => Diagnostic::new(
                Level::Error,
                "invalid digit '{digit}' in octal literal",
                *location,
            )
            .with_arg("digit", digit.to_string()),
            LexError::MismatchedBracket {
                delimiter,
                opener,
                opener_location,
                closer_location,
            } => {
                let note =
                    Diagnostic::new(Level::Note, "'{delimiter}' opened here", *opener_location)
                        .with_arg("delimiter", opener.to_string());
                Diagnostic::new(Level::Fatal, "mismatched '{delimiter}'", *closer_location)
                    .with_arg("delimiter", delimiter.to_string())
                    .with_note(note)
            }
            LexError::UnmatchedBracket {
                delimiter,
                location,
            } => Diagnostic::new(Level::Fatal, "unmatched '{delimiter}'", *location)
                .with_arg("delimiter", delimiter.to_string()),
        };
        Some(diag)
    }
}

/// Quote a character the way it would appear in source, escaping anything
/// unprintable.
fn quote_char(c: &char) -> String {
    format!("'{}'", c.escape_debug())
}
