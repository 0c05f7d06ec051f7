pub mod diagnostic;
pub mod discovery;
pub mod dump;
pub mod error;
pub mod lexer;
pub mod source;
pub mod version;
