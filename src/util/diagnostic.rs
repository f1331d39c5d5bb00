//! Terminal rendering of resolution errors.
//!
//! A diagnostic is a headline plus the paths, notes and fixes that go with
//! it, laid out the way rustc lays out its own.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self, color: bool) -> &'static str {
        match (self, color) {
            (Severity::Error, false) => "error",
            (Severity::Warning, false) => "warning",
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Rendered as `note:` lines
    pub context: Vec<String>,
    /// Rendered as `help:` lines
    pub suggestions: Vec<String>,
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(message)
        }
    }

    pub fn with_context(mut self, note: impl Into<String>) -> Self {
        self.context.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, help: impl Into<String>) -> Self {
        self.suggestions.push(help.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    pub fn format(&self, color: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}: {}", self.severity.label(color), self.message);
        if let Some(path) = &self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for note in &self.context {
            let _ = writeln!(out, "   = note: {}", note);
        }
        let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
        for suggestion in &self.suggestions {
            let _ = writeln!(out, "   = {}: {}", help, suggestion);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
