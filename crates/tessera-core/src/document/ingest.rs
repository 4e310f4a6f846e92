//! Loading documents from their JSON wire form.
//!
//! Ingest is the only way into a [`Document`]: it parses the JSON, converts
//! every raw block into a typed one and collects the recovery warnings
//! produced along the way. Geometry is *not* repaired here; that is the
//! template validator's job.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Deserialize;
use serde_json::error::Category;

use crate::{
    document::{Document, DocumentStatus, GlobalStyles, block::RawBlock},
    error::{Diagnostic, DiagnosticCode, IngestError, Span},
};

/// A loaded document together with the warnings raised while loading it.
#[derive(Debug, Clone)]
pub struct Ingested {
    document: Document,
    warnings: Vec<Diagnostic>,
}

impl Ingested {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Recovery warnings, one per repaired block
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Splits into the document and its warnings.
    pub fn into_parts(self) -> (Document, Vec<Diagnostic>) {
        (self.document, self.warnings)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
    #[serde(default)]
    global_styles: GlobalStyles,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

/// Parses a document from JSON.
///
/// # Errors
///
/// Returns an [`IngestError`] carrying an `E001` diagnostic for malformed
/// JSON or an `E002` diagnostic when the JSON does not describe a document.
/// Unknown block types are not errors; they come back as warnings.
///
/// # Examples
///
/// ```
/// # use tessera_core::document::ingest::parse_document;
/// let src = r#"{
///     "title": "Weekly",
///     "blocks": [{
///         "id": "b1", "type": "header", "content": {"text": "Hi"},
///         "position": {"x": 100, "y": 30, "width": 400, "height": 80}
///     }]
/// }"#;
/// let ingested = parse_document(src).unwrap();
/// assert_eq!(ingested.document().blocks().len(), 1);
/// assert!(ingested.warnings().is_empty());
/// ```
pub fn parse_document(src: &str) -> Result<Ingested, IngestError> {
    debug!(bytes = src.len(); "Parsing document JSON");

    let raw: RawDocument = serde_json::from_str(src).map_err(|err| json_diagnostic(src, &err))?;

    let mut warnings = Vec::new();
    let blocks = raw
        .blocks
        .into_iter()
        .map(|raw_block| {
            let (block, warning) = raw_block.into_block();
            warnings.extend(warning);
            block
        })
        .collect();

    let document = Document {
        title: raw.title,
        subject: raw.subject,
        status: raw.status,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        global_styles: raw.global_styles,
        blocks,
    };

    info!(
        blocks = document.blocks().len(),
        warnings = warnings.len();
        "Document loaded"
    );

    Ok(Ingested { document, warnings })
}

fn json_diagnostic(src: &str, err: &serde_json::Error) -> Diagnostic {
    let span = Span::from_line_column(src, err.line(), err.column());
    match err.classify() {
        Category::Data => Diagnostic::error(format!("invalid document: {err}"))
            .with_code(DiagnosticCode::E002)
            .with_span(span)
            .with_help("every block needs an `id` and a `position` with x, y, width and height"),
        Category::Io | Category::Syntax | Category::Eof => {
            Diagnostic::error(format!("malformed JSON: {err}"))
                .with_code(DiagnosticCode::E001)
                .with_span(span)
        }
    }
}
