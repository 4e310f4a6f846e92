//! Tessera - a free-form block layout engine for email newsletters.
//!
//! Loading, interactive layout and HTML export of newsletter documents.
//! Blocks (headers, text, images, buttons and dividers) sit at absolute
//! positions on a bounded canvas; the layout engines keep them inside the
//! canvas, within their size limits and clear of each other.

pub mod config;
pub mod editor;
pub mod export;
pub mod layout;

mod error;

pub use tessera_core::{canvas, color, document, geometry, identifier};
pub use tessera_core::{
    canvas::Canvas,
    document::{Block, BlockContent, BlockKind, Document},
    error::{Diagnostic, DiagnosticCode, IngestError, Severity, Span},
    geometry::{Point, Rect, Size},
    identifier::BlockId,
};

pub use error::TesseraError;

use log::{debug, info, trace};

use config::AppConfig;
use editor::{Editor, Session};
use export::StandardRenderer;
use layout::ValidationReport;

/// A document ready for editing, with what was repaired while loading it.
#[derive(Debug, Clone)]
pub struct Loaded {
    document: Document,
    warnings: Vec<Diagnostic>,
    report: ValidationReport,
}

impl Loaded {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Recovery warnings raised while reading blocks
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Blocks whose geometry was repaired
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Builder for loading, editing and rendering newsletters.
///
/// # Examples
///
/// ```
/// use tessera::{NewsletterBuilder, config::AppConfig};
///
/// let source = r#"{
///     "title": "Weekly",
///     "blocks": [{
///         "id": "intro", "type": "header", "content": {"text": "Hello"},
///         "position": {"x": 100, "y": 30, "width": 400, "height": 80}
///     }]
/// }"#;
///
/// let builder = NewsletterBuilder::new(AppConfig::default());
/// let loaded = builder.load(source).expect("valid document");
/// let html = builder.render_html(loaded.document());
/// assert!(html.contains("Hello"));
/// ```
#[derive(Debug, Default)]
pub struct NewsletterBuilder {
    config: AppConfig,
}

impl NewsletterBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON document and repair its geometry.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Parse`] for malformed JSON or JSON that does
    /// not describe a document. Unknown block types are recovered and come
    /// back as warnings on the [`Loaded`] document.
    pub fn load(&self, source: &str) -> Result<Loaded, TesseraError> {
        info!("Loading document");

        let (document, warnings) = document::ingest::parse_document(source)
            .map_err(|err| TesseraError::new_parse_error(err, source))?
            .into_parts();
        let (document, report) =
            layout::validate_with_report(&document, self.config.layout().snap_to_grid());

        debug!(
            warnings = warnings.len(),
            adjusted = report.adjustments().len();
            "Document loaded successfully"
        );
        trace!(document:?; "Loaded document");

        Ok(Loaded {
            document,
            warnings,
            report,
        })
    }

    /// Render a document to HTML. Never fails; see [`export::serialize_with`].
    pub fn render_html(&self, document: &Document) -> String {
        info!(blocks = document.blocks().len(); "Rendering HTML");
        let renderer = StandardRenderer::from_config(self.config.style());
        export::serialize_with(&renderer, document)
    }

    /// Serialize a document back to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Export`] if serialization fails.
    pub fn to_json(&self, document: &Document) -> Result<String, TesseraError> {
        Ok(serde_json::to_string_pretty(document)?)
    }

    /// Create an editor configured from the layout settings.
    pub fn editor(&self) -> Editor {
        Editor::from_config(self.config.layout())
    }

    /// Start an editing session with undo history over `document`.
    pub fn session(&self, document: Document) -> Session {
        let layout = self.config.layout();
        Session::with_history_limit(
            self.editor(),
            document,
            layout.snap_to_grid(),
            layout.history_limit(),
        )
    }
}
