//! Lex many files at once and turn the results into serializable records.
//!
//! Files are lexed in parallel with rayon.  One [`Grammar`] is compiled up
//! front and shared by every lexer, so the pattern is built once per run
//! rather than once per file.

use crate::diagnostic::Level;
use crate::lexer::{Comment, Grammar, Lexer, Token, TokenValue};
use crate::source::Buffer;
use crate::version::Version;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord {
    pub line: usize,
    pub col: usize,
    pub begin: usize,
    pub end: usize,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub line: usize,
    pub col: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub line: usize,
    pub col: usize,
    pub level: Level,
    pub message: String,
    /// Human-readable rendering, notes included.
    pub rendered: Vec<String>,
}

/// Everything lexed from one file.  Tokens and comments up to the first
/// error are kept even when lexing failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDump {
    pub file: String,
    pub tokens: Vec<TokenRecord>,
    pub comments: Vec<CommentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

impl FileDump {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

// ── public entry points ──────────────────────────────────────────────────────

/// Lex every file under `version`, in parallel.  Fails only on I/O errors or
/// an unsupported version; lexing errors are recorded per file.
pub fn dump_files(files: &[PathBuf], version: Version) -> Result<Vec<FileDump>> {
    let grammar = Arc::new(Grammar::new(version)?);
    files
        .par_iter()
        .map(|path| -> Result<FileDump> {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let buffer = Buffer::new(path.to_string_lossy(), source);
            Ok(dump_buffer(&buffer, Arc::clone(&grammar)))
        })
        .collect()
}

/// Lex one buffer until it is exhausted or the first error.
pub fn dump_buffer(buffer: &Buffer, grammar: Arc<Grammar>) -> FileDump {
    let mut lexer = Lexer::with_grammar(buffer, grammar);
    let mut tokens = Vec::new();
    let mut error = None;

    loop {
        match lexer.next_token() {
            Ok(Some(token)) => tokens.push(token_record(buffer, &token)),
            Ok(None) => break,
            Err(err) => {
                error = Some(match err.to_diagnostic() {
                    Some(diag) => {
                        let (line, col) = buffer.line_col(diag.location.begin);
                        ErrorRecord {
                            line,
                            col,
                            level: diag.level,
                            message: diag.message(),
                            rendered: diag.render(buffer),
                        }
                    }
                    None => ErrorRecord {
                        line: 1,
                        col: 1,
                        level: Level::Fatal,
                        message: err.to_string(),
                        rendered: vec![format!("{}: {err}", buffer.name())],
                    },
                });
                break;
            }
        }
    }

    debug!(
        file = buffer.name(),
        tokens = tokens.len(),
        comments = lexer.comments().len(),
        failed = error.is_some(),
        "lexed"
    );

    FileDump {
        file: buffer.name().to_string(),
        comments: lexer
            .comments()
            .iter()
            .map(|c| comment_record(buffer, c))
            .collect(),
        tokens,
        error,
    }
}

// ── record conversion ────────────────────────────────────────────────────────

fn token_record(buffer: &Buffer, token: &Token<'_>) -> TokenRecord {
    let (line, col) = buffer.line_col(token.range.begin);
    let value = match &token.value {
        TokenValue::None => None,
        other => Some(other.to_string()),
    };
    TokenRecord {
        line,
        col,
        begin: token.range.begin,
        end: token.range.end,
        kind: token.kind.as_str(),
        value,
    }
}

fn comment_record(buffer: &Buffer, comment: &Comment<'_>) -> CommentRecord {
    let (line, col) = buffer.line_col(comment.range.begin);
    CommentRecord {
        line,
        col,
        text: comment.text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn grammar() -> Arc<Grammar> {
        Arc::new(Grammar::new(Version::new(3, 4)).unwrap())
    }

    #[test]
    fn test_dump_buffer_records() {
        let buf = Buffer::new("m.py", "x = 0x1F  # hex\n");
        let dump = dump_buffer(&buf, grammar());
        assert!(!dump.failed());
        let kinds: Vec<&str> = dump.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, ["ident", "=", "int", "newline"]);
        assert_eq!(dump.tokens[2].value.as_deref(), Some("31"));
        assert_eq!((dump.tokens[2].line, dump.tokens[2].col), (1, 5));
        assert_eq!(
            dump.comments,
            [CommentRecord {
                line: 1,
                col: 11,
                text: "# hex".to_string()
            }]
        );
    }

    #[test]
    fn test_dump_buffer_keeps_tokens_before_error() {
        let buf = Buffer::new("m.py", "a = (1,\n  2]\n");
        let dump = dump_buffer(&buf, grammar());
        let error = dump.error.as_ref().unwrap();
        assert_eq!((error.line, error.col), (2, 4));
        assert_eq!(error.message, "mismatched ']'");
        assert_eq!(error.level, Level::Fatal);
        assert!(error.rendered.iter().any(|l| l.contains("'(' opened here")));
        assert_eq!(dump.tokens.len(), 6);
    }

    #[test]
    fn test_dump_buffer_carriage_return_lines() {
        let buf = Buffer::new("m.py", "a\rb\rc\r");
        let dump = dump_buffer(&buf, grammar());
        let positions: Vec<(usize, usize)> = dump.tokens.iter().map(|t| (t.line, t.col)).collect();
        assert_eq!(positions, [(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)]);

        let buf = Buffer::new("m.py", "x = (1,\r  2]\r");
        let error = dump_buffer(&buf, grammar()).error.unwrap();
        assert_eq!((error.line, error.col), (2, 4));
        assert_eq!(error.rendered[0], "m.py:2:4: fatal: mismatched ']'");
        assert_eq!(error.rendered[1], "  2]");
    }

    #[test]
    fn test_dump_large_buffer_positions() {
        let lines = 200_000;
        let buf = Buffer::new("big.py", "x = a + b * c\n".repeat(lines));
        let dump = dump_buffer(&buf, grammar());
        assert!(!dump.failed());
        assert_eq!(dump.tokens.len(), lines * 8);
        let last = dump.tokens.last().unwrap();
        assert_eq!((last.line, last.col, last.kind), (lines, 14, "newline"));
    }

    #[test]
    fn test_dump_files_in_parallel() {
        let dir = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in 0..8 {
            let path = dir.path().join(format!("m{i}.py"));
            fs::write(&path, format!("v{i} = {i}\n")).unwrap();
            files.push(path);
        }
        let dumps = dump_files(&files, Version::new(2, 7)).unwrap();
        assert_eq!(dumps.len(), 8);
        for (i, dump) in dumps.iter().enumerate() {
            assert!(dump.file.ends_with(&format!("m{i}.py")));
            assert_eq!(dump.tokens[0].value.as_deref(), Some(format!("v{i}").as_str()));
        }
    }

    #[test]
    fn test_dump_files_unsupported_version() {
        assert!(dump_files(&[], Version::new(3, 9)).is_err());
    }

    #[test]
    fn test_dump_files_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = dump_files(&[dir.path().join("gone.py")], Version::default()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_json_shape() {
        let buf = Buffer::new("m.py", "pass\n");
        let json = serde_json::to_value(dump_buffer(&buf, grammar())).unwrap();
        assert_eq!(json["file"], "m.py");
        assert_eq!(json["tokens"][0]["kind"], "pass");
        assert!(json["tokens"][0].get("value").is_none());
        assert!(json.get("error").is_none());
    }
}
