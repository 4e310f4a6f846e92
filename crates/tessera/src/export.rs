//! Export of documents to email-ready HTML.
//!
//! This module provides the [`Renderer`] trait that turns a [`Document`] into
//! an HTML string, and the infallible [`serialize`] entry points built on top
//! of it.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON document
//!     ↓ ingest
//! Document
//!     ↓ validate
//! Document (geometry repaired)
//!     ↓ export (this module)
//! HTML string
//! ```
//!
//! # Available Backends
//!
//! - [`html::StandardRenderer`] - absolutely positioned blocks with a
//!   responsive single-column fallback
//!
//! When a renderer fails, a minimal built-in template is produced instead,
//! so serialization itself never fails.

pub mod html;

mod fallback;

use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use tessera_core::document::Document;

pub use html::{StandardRenderer, normalize_href};

/// Abstraction for HTML rendering backends.
pub trait Renderer {
    /// Renders the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the document cannot be rendered faithfully,
    /// for example because a style holds an unparsable color.
    fn render(&self, document: &Document) -> Result<String, RenderError>;

    /// Whether the fallback template should carry the tracking pixel.
    fn tracking_pixel(&self) -> bool {
        true
    }
}

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A style holds a value that is not a CSS color.
    #[error("invalid color `{value}` in {context}: {reason}")]
    InvalidColor {
        value: String,
        context: String,
        reason: String,
    },

    #[error("formatting failed: {0}")]
    Format(#[from] fmt::Error),
}

/// Renders `document` with the [`StandardRenderer`].
///
/// # Examples
///
/// ```
/// # use tessera::{Document, export::serialize};
/// let html = serialize(&Document::new("Weekly"));
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains("max-width: 600px"));
/// ```
pub fn serialize(document: &Document) -> String {
    serialize_with(&StandardRenderer::default(), document)
}

/// Renders `document` with `renderer`, substituting the minimal template if
/// the renderer fails.
pub fn serialize_with<R: Renderer + ?Sized>(renderer: &R, document: &Document) -> String {
    match renderer.render(document) {
        Ok(html) => {
            debug!(bytes = html.len(); "Document rendered");
            html
        }
        Err(err) => {
            warn!(err:%; "Renderer failed, using the fallback template");
            fallback::render(document, renderer.tracking_pixel())
        }
    }
}
