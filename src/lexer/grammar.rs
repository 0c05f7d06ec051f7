use crate::error::LexError;
use crate::lexer::pattern::TokenPattern;
use crate::lexer::vocabulary::Vocabulary;
use crate::version::Version;
use tracing::debug;

/// Everything version-specific the scanner needs: the reserved vocabulary
/// and the pattern compiled from it.
///
/// Building one means compiling a regex, so callers lexing many buffers
/// under the same version should build it once and share it behind an
/// `Arc`.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) vocabulary: Vocabulary,
    pub(crate) pattern: TokenPattern,
}

impl Grammar {
    pub fn new(version: Version) -> Result<Self, LexError> {
        let vocabulary = Vocabulary::for_version(version)?;
        let pattern = TokenPattern::compile(&vocabulary);
        debug!(
            %version,
            reserved = vocabulary.len(),
            pattern_len = pattern.as_str().len(),
            "compiled grammar"
        );
        Ok(Self {
            vocabulary,
            pattern,
        })
    }

    pub fn version(&self) -> Version {
        self.vocabulary.version()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn pattern(&self) -> &TokenPattern {
        &self.pattern
    }
}
