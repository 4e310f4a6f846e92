//! Error returned when a document cannot be loaded.

use std::fmt;

use thiserror::Error;

use crate::error::Diagnostic;

/// One or more fatal diagnostics produced while loading a document.
#[derive(Debug, Clone, Error)]
pub struct IngestError {
    diagnostics: Vec<Diagnostic>,
}

impl IngestError {
    /// Returns every diagnostic carried by the error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl From<Diagnostic> for IngestError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for IngestError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diagnostics.as_slice() {
            [] => write!(f, "failed to load document"),
            [single] => write!(f, "{single}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}
