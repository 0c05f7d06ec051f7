//! Reserved words and operator symbols for every supported grammar revision.
//!
//! Only the 2.6 set is spelled out.  Every other revision is a diff against
//! an earlier one, so the table reads as a changelog of the grammar.

use crate::error::LexError;
use crate::version::Version;
use std::collections::BTreeSet;

const BASE_2_6: &[&str] = &[
    "!=", "%", "%=", "&", "&=", "(", ")", "*", "**", "**=", "*=", "+", "+=", ",", "-", "-=", ".",
    "/", "//", "//=", "/=", ":", ";", "<", "<<", "<<=", "<=", "<>", "=", "==", ">", ">=", ">>",
    ">>=", "@", "[", "]", "^", "^=", "`", "and", "as", "assert", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "exec", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "not", "or", "pass", "print", "raise", "return", "try",
    "while", "with", "yield", "{", "|", "|=", "}", "~",
];

struct Revision {
    version: Version,
    /// `None` only for the base revision.
    parent: Option<Version>,
    removed: &'static [&'static str],
    added: &'static [&'static str],
}

const REVISIONS: &[Revision] = &[
    Revision {
        version: Version::new(2, 6),
        parent: None,
        removed: &[],
        added: BASE_2_6,
    },
    Revision {
        version: Version::new(2, 7),
        parent: Some(Version::new(2, 6)),
        removed: &[],
        added: &[],
    },
    Revision {
        version: Version::new(3, 0),
        parent: Some(Version::new(2, 6)),
        removed: &["<>", "`", "exec", "print"],
        added: &["->", "...", "False", "None", "nonlocal", "True"],
    },
    // `<>` comes back after 3.0 dropped it.  Kept as found.
    Revision {
        version: Version::new(3, 1),
        parent: Some(Version::new(3, 0)),
        removed: &[],
        added: &["<>"],
    },
    Revision {
        version: Version::new(3, 2),
        parent: Some(Version::new(3, 1)),
        removed: &[],
        added: &[],
    },
    Revision {
        version: Version::new(3, 3),
        parent: Some(Version::new(3, 1)),
        removed: &[],
        added: &[],
    },
    Revision {
        version: Version::new(3, 4),
        parent: Some(Version::new(3, 1)),
        removed: &[],
        added: &[],
    },
];

/// Every grammar revision a [`Vocabulary`] can be built for, oldest first.
pub fn supported_versions() -> impl Iterator<Item = Version> {
    REVISIONS.iter().map(|r| r.version)
}

/// The immutable set of keywords and operators of one grammar revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    version: Version,
    entries: BTreeSet<&'static str>,
}

impl Vocabulary {
    pub fn for_version(version: Version) -> Result<Self, LexError> {
        let entries = resolve(version).ok_or(LexError::UnsupportedVersion { requested: version })?;
        Ok(Self { version, entries })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains(text)
    }

    /// The table's own copy of `text`, if reserved.
    pub fn get(&self, text: &str) -> Option<&'static str> {
        self.entries.get(text).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries spelled with letters, e.g. `lambda`.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().filter(|e| is_keyword(e))
    }

    /// Entries spelled with punctuation, e.g. `**=`.
    pub fn operators(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().filter(|e| !is_keyword(e))
    }
}

pub(crate) fn is_keyword(entry: &str) -> bool {
    entry.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Walk the parent chain of `version` and replay every diff from the base.
fn resolve(version: Version) -> Option<BTreeSet<&'static str>> {
    let mut chain = Vec::new();
    let mut cursor = Some(version);
    while let Some(v) = cursor {
        let revision = REVISIONS.iter().find(|r| r.version == v)?;
        chain.push(revision);
        cursor = revision.parent;
    }

    let mut entries = BTreeSet::new();
    for revision in chain.iter().rev() {
        for removed in revision.removed {
            entries.remove(removed);
        }
        entries.extend(revision.added.iter().copied());
    }
    Some(entries)
}
