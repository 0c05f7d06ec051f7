use crate::lexer::literal::{Complex, Number};
use crate::source::Range;
use num_bigint::BigInt;
use std::fmt;

/// Opening delimiter of a string literal.  The body is scanned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    Single,
    Double,
    TripleSingle,
    TripleDouble,
}

impl Quote {
    pub fn from_delimiter(delimiter: &str) -> Option<Self> {
        match delimiter {
            "'" => Some(Quote::Single),
            "\"" => Some(Quote::Double),
            "'''" => Some(Quote::TripleSingle),
            "\"\"\"" => Some(Quote::TripleDouble),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quote::Single => "'",
            Quote::Double => "\"",
            Quote::TripleSingle => "'''",
            Quote::TripleDouble => "\"\"\"",
        }
    }

    pub fn is_triple(self) -> bool {
        matches!(self, Quote::TripleSingle | Quote::TripleDouble)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Newline,
    /// Reserved for indentation tracking; never produced by [`Lexer`](super::Lexer).
    Indent,
    /// Reserved for indentation tracking; never produced by [`Lexer`](super::Lexer).
    Dedent,
    /// A keyword or operator.  The vocabulary entry is the kind.
    Reserved(&'static str),
    Quote(Quote),
    Float,
    Int,
    Complex,
    Ident,
}

impl TokenKind {
    /// The textual tag: `newline`, `int`, `<<=`, `'''`, …
    pub fn as_str(&self) -> &'static str {
        match *self {
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Reserved(text) => text,
            TokenKind::Quote(q) => q.as_str(),
            TokenKind::Float => "float",
            TokenKind::Int => "int",
            TokenKind::Complex => "complex",
            TokenKind::Ident => "ident",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue<'src> {
    None,
    Int(BigInt),
    Float(f64),
    Complex(Complex),
    Ident(&'src str),
    /// Lowercased string prefix flags, e.g. `"br"`; empty for a plain quote.
    Prefix(String),
}

impl From<Number> for TokenValue<'_> {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => TokenValue::Int(i),
            Number::Float(f) => TokenValue::Float(f),
            Number::Complex(c) => TokenValue::Complex(c),
        }
    }
}

impl fmt::Display for TokenValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::None => Ok(()),
            TokenValue::Int(i) => write!(f, "{i}"),
            TokenValue::Float(x) => write!(f, "{x:?}"),
            TokenValue::Complex(c) => write!(f, "{c}"),
            TokenValue::Ident(name) => f.write_str(name),
            TokenValue::Prefix(flags) => f.write_str(flags),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    /// The token itself, without surrounding whitespace.
    pub range: Range,
    pub kind: TokenKind,
    pub value: TokenValue<'src>,
}

impl<'src> Token<'src> {
    pub fn new(range: Range, kind: TokenKind, value: TokenValue<'src>) -> Self {
        Self { range, kind, value }
    }

    pub fn is_reserved(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Reserved(r) if r == text)
    }
}

/// A comment seen while scanning, `#` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment<'src> {
    pub range: Range,
    pub text: &'src str,
}
