//! Diagnostic codes.
//!
//! - `E0xx` - Document errors (nothing could be loaded)
//! - `W1xx` - Block recovery warnings

use std::fmt;

/// Codes for categorizing ingest diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Malformed JSON.
    ///
    /// The input is not syntactically valid JSON.
    E001,

    /// Invalid document shape.
    ///
    /// The JSON is valid but a required field is missing or has the wrong
    /// type (for example a block without a `position`).
    E002,

    /// Block type reclassified.
    ///
    /// A block carried an unknown `type` and its kind was inferred from the
    /// shape of its content.
    W100,

    /// Unrecognizable block content.
    ///
    /// A block's content did not match its type, or no type could be
    /// inferred; default content was substituted.
    W101,
}

impl DiagnosticCode {
    /// Returns a short description of what the code means.
    pub fn description(self) -> &'static str {
        match self {
            Self::E001 => "malformed JSON",
            Self::E002 => "invalid document shape",
            Self::W100 => "block type reclassified",
            Self::W101 => "unrecognizable block content",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
