//! Repair of stored geometry.
//!
//! Documents written by older editors, or by hand, may carry sizes outside
//! the block limits or blocks hanging off the canvas. Validation fits every
//! block back into the limits and onto the canvas. It does not separate
//! overlapping blocks. Validation is idempotent.

use log::{info, warn};

use tessera_core::{
    canvas::{Canvas, PLACEMENT_MARGIN},
    document::Document,
    geometry::Rect,
    identifier::BlockId,
};

/// One block whose rectangle was changed by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    block_id: BlockId,
    before: Rect,
    after: Rect,
}

impl Adjustment {
    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn before(&self) -> Rect {
        self.before
    }

    pub fn after(&self) -> Rect {
        self.after
    }
}

/// Blocks changed by a validation pass, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    adjustments: Vec<Adjustment>,
}

impl ValidationReport {
    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    /// Returns true if no block had to move or resize
    pub fn is_clean(&self) -> bool {
        self.adjustments.is_empty()
    }
}

/// Returns a copy of `document` with every block fitted onto its canvas.
///
/// # Examples
///
/// ```
/// # use tessera::{Block, BlockContent, BlockKind, Document, Rect, layout::validate};
/// let doc = Document::new("Weekly").with_blocks(vec![
///     Block::new("a", BlockContent::placeholder(BlockKind::Text))
///         .with_position(Rect::new(500, 10, 900, 20)),
/// ]);
/// let fixed = validate(&doc, false);
/// assert_eq!(fixed.blocks()[0].position(), Rect::new(90, 30, 480, 80));
/// ```
pub fn validate(document: &Document, snap_to_grid: bool) -> Document {
    validate_with_report(document, snap_to_grid).0
}

/// Like [`validate`], also reporting which blocks were changed.
pub fn validate_with_report(document: &Document, snap_to_grid: bool) -> (Document, ValidationReport) {
    let canvas = document.canvas(snap_to_grid);
    let mut fixed = document.clone();
    let mut report = ValidationReport::default();

    for block in fixed.blocks_mut() {
        let before = block.position();
        let after = fit_rect(before, canvas);
        if after != before {
            warn!(
                block_id = block.id().as_str(),
                x = before.x(),
                y = before.y(),
                width = before.width(),
                height = before.height();
                "Repairing block geometry"
            );
            block.set_position(after);
            report.adjustments.push(Adjustment {
                block_id: block.id().clone(),
                before,
                after,
            });
        }
    }

    if !report.is_clean() {
        info!(adjusted = report.adjustments.len(); "Document geometry repaired");
    }
    (fixed, report)
}

fn fit_rect(rect: Rect, canvas: Canvas) -> Rect {
    let size = canvas.constrain_size(rect.size());
    canvas.place(rect.with_size(size), PLACEMENT_MARGIN)
}

#[cfg(test)]
mod tests {
    use tessera_core::document::{Block, BlockContent, BlockKind, GlobalStyles};

    use super::*;

    fn doc(rects: &[Rect]) -> Document {
        let blocks = rects
            .iter()
            .enumerate()
            .map(|(i, rect)| {
                Block::new(BlockId::generated(i as u64), BlockContent::placeholder(BlockKind::Header))
                    .with_position(*rect)
            })
            .collect();
        Document::new("t").with_blocks(blocks)
    }

    #[test]
    fn test_valid_document_is_untouched() {
        let original = doc(&[Rect::new(100, 30, 400, 80)]);
        let (fixed, report) = validate_with_report(&original, false);
        assert!(report.is_clean());
        assert_eq!(fixed, original);
    }

    #[test]
    fn test_off_canvas_block_is_pulled_back() {
        let original = doc(&[Rect::new(-100, 900, 200, 100)]);
        let (fixed, report) = validate_with_report(&original, false);
        assert_eq!(fixed.blocks()[0].position(), Rect::new(30, 670, 200, 100));
        assert_eq!(report.adjustments().len(), 1);
        assert_eq!(report.adjustments()[0].before(), Rect::new(-100, 900, 200, 100));
    }

    #[test]
    fn test_negative_size_is_raised_to_minimum() {
        let original = doc(&[Rect::new(100, 100, -50, -5)]);
        let fixed = validate(&original, false);
        assert_eq!(fixed.blocks()[0].position().size(), Rect::new(0, 0, 160, 80).size());
    }

    #[test]
    fn test_is_idempotent_with_snapping() {
        let original = doc(&[Rect::new(13, 777, 333, 91), Rect::new(590, -4, 10, 999)])
            .with_global_styles(GlobalStyles::default().with_content_size(610, 790));
        let once = validate(&original, true);
        let twice = validate(&once, true);
        assert_eq!(once, twice);
    }
}
