//! Error types for Tessera operations.
//!
//! This module provides the main error type [`TesseraError`] which wraps
//! the error conditions that can occur while loading, editing and exporting
//! a newsletter.

use std::io;

use thiserror::Error;

use tessera_core::error::IngestError;

/// The main error type for Tessera operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render them with source spans.
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: IngestError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<serde_json::Error> for TesseraError {
    fn from(error: serde_json::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TesseraError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: IngestError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
