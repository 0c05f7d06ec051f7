//! Structured diagnostics: a severity, a message template with named
//! arguments, a primary source range, and any number of attached notes.

use crate::source::{Buffer, Range};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Note,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Note => "note",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    /// Message template; `{name}` is replaced by the argument called `name`.
    pub reason: &'static str,
    pub arguments: Vec<(&'static str, String)>,
    pub location: Range,
    pub notes: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(level: Level, reason: &'static str, location: Range) -> Self {
        Self {
            level,
            reason,
            arguments: Vec::new(),
            location,
            notes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.arguments.push((name, value.into()));
        self
    }

    pub fn with_note(mut self, note: Diagnostic) -> Self {
        self.notes.push(note);
        self
    }

    /// The reason with every `{name}` placeholder substituted.
    pub fn message(&self) -> String {
        self.arguments
            .iter()
            .fold(self.reason.to_string(), |msg, (name, value)| {
                msg.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Render as `file:line:col: level: message`, then the offending source
    /// line with a caret underline, then every note in the same shape.
    pub fn render(&self, buffer: &Buffer) -> Vec<String> {
        let (line, col) = buffer.line_col(self.location.begin);
        let text = buffer.line_text(line);

        // Underline at least one column, and never past the end of the line.
        let width = buffer
            .slice(self.location)
            .split(['\r', '\n'])
            .next()
            .map_or(0, |s| s.chars().count())
            .max(1);

        let mut out = vec![
            format!(
                "{}:{}:{}: {}: {}",
                buffer.name(),
                line,
                col,
                self.level,
                self.message()
            ),
            text.to_string(),
            format!("{}{}", " ".repeat(col - 1), "^".repeat(width)),
        ];
        for note in &self.notes {
            out.extend(note.render(buffer));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_substitutes_arguments() {
        let d = Diagnostic::new(Level::Fatal, "mismatched '{delimiter}'", Range::new(1, 2))
            .with_arg("delimiter", "]");
        assert_eq!(d.message(), "mismatched ']'");
        assert_eq!(d.to_string(), "fatal: mismatched ']'");
    }

    #[test]
    fn test_message_without_arguments() {
        let d = Diagnostic::new(Level::Error, "no placeholders", Range::new(0, 1));
        assert_eq!(d.message(), "no placeholders");
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Note.to_string(), "note");
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Error.to_string(), "error");
        assert_eq!(Level::Fatal.to_string(), "fatal");
    }

    #[test]
    fn test_render_with_note() {
        let buf = Buffer::new("src/foo.py", "x = (1,\n  2]\n");
        let note = Diagnostic::new(Level::Note, "'{delimiter}' opened here", Range::new(4, 5))
            .with_arg("delimiter", "(");
        let d = Diagnostic::new(Level::Fatal, "mismatched '{delimiter}'", Range::new(11, 12))
            .with_arg("delimiter", "]")
            .with_note(note);
        assert_eq!(
            d.render(&buf),
            vec![
                "src/foo.py:2:4: fatal: mismatched ']'",
                "  2]",
                "   ^",
                "src/foo.py:1:5: note: '(' opened here",
                "x = (1,",
                "    ^",
            ]
        );
    }
}
