//! The scanning loop.
//!
//! Each step applies the grammar's pattern at the cursor and acts on the
//! category that matched.  Line breaks inside brackets or after a `\`, and
//! comments, do not produce tokens; the loop just carries on from the end of
//! the match.

use crate::error::LexError;
use crate::lexer::brackets::BracketTracker;
use crate::lexer::grammar::Grammar;
use crate::lexer::literal::Numeral;
use crate::lexer::pattern::{Category, RawMatch};
use crate::lexer::token::{Comment, Quote, Token, TokenKind, TokenValue};
use crate::source::{Buffer, Range};
use crate::version::Version;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct Lexer<'src> {
    buffer: &'src Buffer,
    grammar: Arc<Grammar>,
    /// Byte offset where the next match is attempted.
    offset: usize,
    /// Tokens produced ahead of time, handed out before scanning resumes.
    queue: VecDeque<Token<'src>>,
    comments: Vec<Comment<'src>>,
    brackets: BracketTracker,
    /// Set once the iterator has yielded an error.
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(buffer: &'src Buffer, version: Version) -> Result<Self, LexError> {
        Ok(Self::with_grammar(buffer, Arc::new(Grammar::new(version)?)))
    }

    pub fn with_grammar(buffer: &'src Buffer, grammar: Arc<Grammar>) -> Self {
        Self {
            buffer,
            grammar,
            offset: 0,
            queue: VecDeque::new(),
            comments: Vec::new(),
            brackets: BracketTracker::new(),
            failed: false,
        }
    }

    /// Return the next token, or `Ok(None)` once the whole buffer has been
    /// consumed.
    pub fn next_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        if let Some(token) = self.queue.pop_front() {
            return Ok(Some(token));
        }
        self.lex().inspect_err(|err| debug!(offset = self.offset, %err, "lex error"))
    }

    pub fn buffer(&self) -> &'src Buffer {
        self.buffer
    }

    pub fn version(&self) -> Version {
        self.grammar.version()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Every comment seen so far, in source order.
    pub fn comments(&self) -> &[Comment<'src>] {
        &self.comments
    }

    pub fn brackets(&self) -> &BracketTracker {
        &self.brackets
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty() && self.offset == self.buffer.len()
    }

    fn lex(&mut self) -> Result<Option<Token<'src>>, LexError> {
        let source = self.buffer.source();
        loop {
            if self.offset == source.len() {
                return Ok(None);
            }
            let Some(m) = self.grammar.pattern.match_at(source, self.offset) else {
                return self.no_match(source);
            };
            self.offset = m.consumed.end;

            match m.category {
                Category::Newline { continued } => {
                    // Implicit joining inside brackets, explicit after `\`.
                    if continued || !self.brackets.is_empty() {
                        continue;
                    }
                    return Ok(Some(emit(m.body, TokenKind::Newline, TokenValue::None)));
                }
                Category::Comment => {
                    let text = slice(source, m.body);
                    trace!(range = %m.body, text, "comment");
                    self.comments.push(Comment {
                        range: m.body,
                        text,
                    });
                }
                _ => return self.classify(source, m).map(Some),
            }
        }
    }

    fn classify(&mut self, source: &'src str, m: RawMatch) -> Result<Token<'src>, LexError> {
        let version = self.version();
        let body = slice(source, m.body);
        let token = match m.category {
            Category::Float { imaginary } => {
                let value = Numeral::Float {
                    text: body,
                    imaginary,
                }
                .decode(version)?;
                let kind = if imaginary {
                    TokenKind::Complex
                } else {
                    TokenKind::Float
                };
                emit(m.token, kind, value.into())
            }
            Category::ImaginaryInt => {
                let value = Numeral::ImaginaryInt { digits: body }.decode(version)?;
                emit(m.token, TokenKind::Complex, value.into())
            }
            Category::Int { radix, suffix } => {
                let value = Numeral::Int {
                    radix,
                    digits: body,
                    digits_range: m.body,
                    long_suffix: suffix,
                }
                .decode(version)?;
                emit(m.token, TokenKind::Int, value.into())
            }
            Category::StringStart { prefix } => {
                let quote = Quote::from_delimiter(body)
                    .expect("pattern only matches the four quote delimiters");
                let flags = slice(source, prefix).to_lowercase();
                emit(m.token, TokenKind::Quote(quote), TokenValue::Prefix(flags))
            }
            Category::Reserved => {
                let symbol = self
                    .grammar
                    .vocabulary
                    .get(body)
                    .expect("pattern only matches vocabulary entries");
                self.brackets.track(symbol, m.token)?;
                emit(m.token, TokenKind::Reserved(symbol), TokenValue::None)
            }
            Category::Ident => emit(m.token, TokenKind::Ident, TokenValue::Ident(body)),
            Category::Newline { .. } | Category::Comment => {
                unreachable!("handled by the scanning loop")
            }
        };
        Ok(token)
    }

    /// Nothing matched.  Trailing whitespace simply ends the input; anything
    /// else is reported at the first character that is not whitespace.
    fn no_match(&mut self, source: &str) -> Result<Option<Token<'src>>, LexError> {
        let rest = source[self.offset..].trim_start_matches([' ', '\t', '\x0c']);
        let Some(character) = rest.chars().next() else {
            self.offset = source.len();
            return Ok(None);
        };
        let at = source.len() - rest.len();
        Err(LexError::UnexpectedCharacter {
            character,
            location: Range::new(at, at + character.len_utf8()),
        })
    }
}

fn emit<'src>(range: Range, kind: TokenKind, value: TokenValue<'src>) -> Token<'src> {
    trace!(%range, %kind, "token");
    Token::new(range, kind, value)
}

fn slice(source: &str, range: Range) -> &str {
    &source[range.begin..range.end]
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    /// Yields tokens until the input ends or the first error, which is
    /// yielded once before the iterator stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token().transpose();
        self.failed = matches!(item, Some(Err(_)));
        item
    }
}

impl FusedIterator for Lexer<'_> {}

/// Lex a whole buffer, stopping at the first error.
pub fn tokenize(buffer: &Buffer, version: Version) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(buffer, version)?.collect()
}
