//! Document model types.
//!
//! A [`Document`] owns its [`Block`]s exclusively; blocks have no identity
//! outside their document. Block order in the list is insertion order, which
//! doubles as z-order for overlapping selection and as the stacking order of
//! the responsive HTML fallback. It is not a geometric order.
//!
//! # Organization
//!
//! - [`block`] - [`Block`], [`BlockKind`], [`BlockContent`] and the wire form
//! - [`styles`] - [`BlockStyles`], [`GlobalStyles`], [`TextAlign`]
//! - [`ingest`] - loading a document from JSON with recovery diagnostics

pub mod block;
pub mod ingest;
pub mod styles;

pub use block::*;
pub use styles::*;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{canvas::Canvas, geometry::Rect, identifier::BlockId};

/// Delivery state of a newsletter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Sent,
    Scheduled,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Sent => write!(f, "sent"),
            Self::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// A newsletter: metadata, global styles and the blocks on its canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    title: String,
    subject: String,
    status: DocumentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    global_styles: GlobalStyles,
    blocks: Vec<Block>,
}

impl Document {
    /// Creates an empty draft stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            subject: String::new(),
            status: DocumentStatus::Draft,
            created_at: now,
            updated_at: now,
            global_styles: GlobalStyles::default(),
            blocks: Vec::new(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_global_styles(mut self, global_styles: GlobalStyles) -> Self {
        self.global_styles = global_styles;
        self
    }

    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    /// Replaces the block list (builder style).
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn global_styles(&self) -> &GlobalStyles {
        &self.global_styles
    }

    /// Blocks in insertion order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// The canvas implied by the current global styles.
    pub fn canvas(&self, snap_to_grid: bool) -> Canvas {
        Canvas::from_global_styles(&self.global_styles, snap_to_grid)
    }

    /// Finds a block by id
    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    /// Finds a block by id for mutation
    pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|block| block.id() == id)
    }

    /// Returns the index of a block in insertion order
    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == id)
    }

    /// Rectangles of every block except `id`, in insertion order.
    pub fn other_rects(&self, id: &BlockId) -> Vec<Rect> {
        self.blocks
            .iter()
            .filter(|block| block.id() != id)
            .map(Block::position)
            .collect()
    }

    /// Appends a block on top of the z-order.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Removes and returns a block; `None` if no block has that id.
    pub fn remove_block(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.index_of(id)?;
        Some(self.blocks.remove(index))
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn set_status(&mut self, status: DocumentStatus) {
        self.status = status;
    }

    /// Replaces the global styles; the canvas follows on the next operation.
    pub fn set_global_styles(&mut self, global_styles: GlobalStyles) {
        self.global_styles = global_styles;
    }

    /// Records a modification time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
