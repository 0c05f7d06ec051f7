//! Builds the single regular expression that drives the scanner.
//!
//! Every match has exactly one populated category group; the scanner only
//! has to look at which one it is.  The regex engine picks the first
//! alternative that matches rather than the longest, so the alternatives are
//! ordered by hand:
//!
//! - floats before integers, since `1.5` and `1e3` start like `1`;
//! - `0o`/`0x`/`0b` before the bare digit run;
//! - triple quotes before single quotes;
//! - vocabulary entries sorted longest first, so `<<=` wins over `<<`;
//! - keywords before identifiers, each keyword bounded by `\b` so that
//!   `andx` falls through to the identifier case.

use crate::lexer::literal::Radix;
use crate::lexer::vocabulary::{Vocabulary, is_keyword};
use crate::source::Range;
use regex::{Captures, Regex};

/// Which alternative of the pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// A line terminator; `continued` is set when a `\` preceded it.
    Newline { continued: bool },
    Comment,
    /// `imaginary` is set when a `j`/`J` suffix follows.
    Float { imaginary: bool },
    ImaginaryInt,
    /// `suffix` is the range of a trailing `l`/`L`.
    Int { radix: Radix, suffix: Option<Range> },
    /// `prefix` is the range of the string flags in front of the quote.
    StringStart { prefix: Range },
    Reserved,
    Ident,
}

/// One successful application of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch {
    pub category: Category,
    /// Everything consumed, leading whitespace included.
    pub consumed: Range,
    /// The token proper, without leading whitespace.
    pub token: Range,
    /// The part the category cares about: the digits of a number (without
    /// base prefix or suffix), the quote of a string opener, the text of a
    /// comment, keyword or identifier.
    pub body: Range,
}

#[derive(Debug, Clone)]
pub struct TokenPattern {
    regex: Regex,
}

impl TokenPattern {
    pub fn compile(vocabulary: &Vocabulary) -> Self {
        let source = pattern_source(vocabulary);
        let regex = Regex::new(&source).expect("token pattern is assembled from escaped literals");
        Self { regex }
    }

    /// Apply the pattern to `source` at `offset`.  Returns `None` when no
    /// category matches there.
    pub fn match_at(&self, source: &str, offset: usize) -> Option<RawMatch> {
        let caps = self.regex.captures(&source[offset..])?;
        let span = |name: &str| {
            caps.name(name)
                .map(|m| Range::new(offset + m.start(), offset + m.end()))
        };
        let whole = caps.get(0)?;
        let consumed = Range::new(offset + whole.start(), offset + whole.end());
        let token = span("token")?;
        let (category, body) = classify(&caps, &span)?;
        Some(RawMatch {
            category,
            consumed,
            token,
            body,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn classify(
    caps: &Captures<'_>,
    span: &dyn Fn(&str) -> Option<Range>,
) -> Option<(Category, Range)> {
    if let Some(body) = span("newline") {
        let continued = caps.name("continuation").is_some();
        return Some((Category::Newline { continued }, body));
    }
    if let Some(body) = span("comment") {
        return Some((Category::Comment, body));
    }
    if let Some(body) = span("float") {
        let imaginary = caps.name("float_imag").is_some();
        return Some((Category::Float { imaginary }, body));
    }
    if let Some(body) = span("imag_int") {
        return Some((Category::ImaginaryInt, body));
    }
    let suffix = span("long");
    for (group, radix) in [
        ("dec", Radix::Decimal),
        ("oct", Radix::Octal),
        ("hex", Radix::Hexadecimal),
        ("bin", Radix::Binary),
        ("bare", Radix::LegacyOctal),
    ] {
        if let Some(body) = span(group) {
            return Some((Category::Int { radix, suffix }, body));
        }
    }
    if let Some(body) = span("quote") {
        let prefix = span("prefix")?;
        return Some((Category::StringStart { prefix }, body));
    }
    if let Some(body) = span("reserved") {
        return Some((Category::Reserved, body));
    }
    if let Some(body) = span("ident") {
        return Some((Category::Ident, body));
    }
    None
}

fn pattern_source(vocabulary: &Vocabulary) -> String {
    let mut reserved: Vec<&str> = vocabulary.iter().collect();
    // Stable sort keeps the table's order among entries of equal length.
    reserved.sort_by_key(|e| std::cmp::Reverse(e.len()));

    let keywords = reserved
        .iter()
        .copied()
        .filter(|e| is_keyword(e))
        .collect::<Vec<_>>()
        .join("|");
    let operators = reserved
        .iter()
        .copied()
        .filter(|e| !is_keyword(e))
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    let alternatives = [
        r"(?P<continuation>\\)?(?P<newline>\n|\r\n|\r)".to_string(),
        r"(?P<comment>#[^\r\n]*)".to_string(),
        concat!(
            r"(?P<float>(?:[0-9]*\.[0-9]+|[0-9]+\.?)[eE][+-]?[0-9]+",
            r"|[0-9]*\.[0-9]+",
            r"|[0-9]+\.)",
            r"(?P<float_imag>[jJ])?",
        )
        .to_string(),
        r"(?P<imag_int>[0-9]+)[jJ]".to_string(),
        concat!(
            r"(?:(?P<dec>[1-9][0-9]*)",
            r"|0[oO](?P<oct>[0-7]+)",
            r"|0[xX](?P<hex>[0-9A-Fa-f]+)",
            r"|0[bB](?P<bin>[01]+)",
            r"|(?P<bare>[0-9]+))",
            r"(?P<long>[lL])?",
        )
        .to_string(),
        r#"(?P<prefix>[BbUu]?[Rr]?)(?P<quote>"""|"|'''|')"#.to_string(),
        format!(r"(?P<reserved>(?:{keywords})\b|{operators})"),
        r"(?P<ident>[A-Za-z_][A-Za-z0-9_]*)".to_string(),
    ];

    format!(r"^[ \t\f]*(?P<token>{})", alternatives.join("|"))
}
