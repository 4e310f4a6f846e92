//! Diagnostics produced while ingesting documents.
//!
//! Loading a document never aborts on recoverable problems: unknown block
//! types are reclassified and reported as warnings, while malformed input
//! (invalid JSON, missing required fields) becomes an [`IngestError`].
//!
//! # Example
//!
//! ```
//! # use tessera_core::error::{Diagnostic, DiagnosticCode, Span};
//! let diag = Diagnostic::warning("block `b1` has unknown type `hero`")
//!     .with_code(DiagnosticCode::W100)
//!     .with_span(Span::new(10..24))
//!     .with_help("treated as an image block because it has a `src`");
//! assert!(diag.severity().is_warning());
//! ```

mod code;
mod diagnostic;
mod ingest_error;
mod severity;

pub use code::DiagnosticCode;
pub use diagnostic::{Diagnostic, Span};
pub use ingest_error::IngestError;
pub use severity::Severity;
