//! The core diagnostic type.

use std::{fmt, ops::Range};

use crate::error::{DiagnosticCode, Severity};

/// A byte range into the ingested source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Returns the byte offset the span starts at
    pub fn start(self) -> usize {
        self.start
    }

    /// Returns the span length in bytes
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true for an empty span
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Builds a single-byte span from a 1-based line and column, as reported
    /// by the JSON parser. Positions past the end of `src` are clamped.
    pub fn from_line_column(src: &str, line: usize, column: usize) -> Self {
        let line_start: usize = src
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let start = (line_start + column.saturating_sub(1)).min(src.len());
        let end = (start + 1).min(src.len());
        Self::new(start..end)
    }
}

/// A single error or warning raised while loading a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    message: String,
    span: Option<Span>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<DiagnosticCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source location, if known.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            span: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[W100]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_code() {
        let diag = Diagnostic::error("unexpected end of input").with_code(DiagnosticCode::E001);
        assert_eq!(diag.to_string(), "error[E001]: unexpected end of input");
    }

    #[test]
    fn test_display_without_code() {
        let diag = Diagnostic::warning("odd block");
        assert_eq!(diag.to_string(), "warning: odd block");
    }

    #[test]
    fn test_span_from_line_column() {
        let src = "{\n  \"title\": 1,\n}";
        let span = Span::from_line_column(src, 2, 3);
        assert_eq!(span.start(), 4);
        assert_eq!(&src[span.start()..span.start() + span.len()], "\"");
    }

    #[test]
    fn test_span_clamped_past_end() {
        let span = Span::from_line_column("{}", 9, 9);
        assert_eq!(span.start(), 2);
        assert!(span.is_empty());
    }
}
