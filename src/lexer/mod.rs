//! Version-aware Python tokenizer.
//!
//! Produces [`Token`]s borrowing `&'src str` slices from a
//! [`Buffer`](crate::source::Buffer).  The reserved vocabulary, and with it
//! the token pattern, is chosen by grammar [`Version`](crate::version::Version).
//!
//! Handles:
//! - Keywords and operators of Python 2.6 through 3.4
//! - Integer, float and imaginary literals, decoded to exact values
//! - Implicit line continuation inside `(`, `[`, `{`
//! - Explicit line continuation via trailing `\`
//! - Comments (collected on the side, never tokens)
//! - String openers: prefix flags and quote style only; the body is left to
//!   the caller
//!
//! # Usage
//! ```
//! use pylexer::lexer::{Lexer, TokenKind};
//! use pylexer::source::Buffer;
//! use pylexer::version::Version;
//!
//! let buf = Buffer::new("<stdin>", "x = 1\n");
//! let kinds: Vec<TokenKind> = Lexer::new(&buf, Version::new(3, 4))
//!     .unwrap()
//!     .map(|t| t.unwrap().kind)
//!     .collect();
//! assert_eq!(kinds.len(), 4);
//! ```

pub mod brackets;
pub mod grammar;
pub mod literal;
pub mod pattern;
pub mod scan;
pub mod token;
pub mod vocabulary;

pub use brackets::{Bracket, BracketTracker};
pub use grammar::Grammar;
pub use literal::{Complex, Number, Radix};
pub use scan::{Lexer, tokenize};
pub use token::{Comment, Quote, Token, TokenKind, TokenValue};
pub use vocabulary::{Vocabulary, supported_versions};
