//! Pointer-driven repositioning of a block.
//!
//! Each pointer move is computed from scratch: the target origin is clamped
//! into the canvas, nudged by the configured [`ForceModel`], re-clamped and
//! snapped, and finally pushed clear of every other block. When collisions
//! cannot be resolved the block stays where the previous frame left it.

use log::{debug, trace};

use tessera_core::{
    canvas::{Canvas, HARD_MARGIN},
    document::Document,
    geometry::{self, Point, Rect},
    identifier::BlockId,
};

use crate::layout::forces::{ForceModel, MagneticForces};

/// Upper bound on collision resolution passes per frame.
const MAX_RESOLUTION_PASSES: usize = 8;

/// An in-progress drag of a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    block_id: BlockId,
    grab_offset: Point,
}

impl DragSession {
    /// Starts dragging `id` from pointer position `pointer`.
    ///
    /// Returns `None` if the document has no such block.
    pub fn begin(document: &Document, id: &BlockId, pointer: Point) -> Option<Self> {
        let block = document.block(id)?;
        Some(Self {
            block_id: id.clone(),
            grab_offset: pointer.sub_point(block.position().origin()),
        })
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    /// Offset from the block's origin to the point where it was grabbed
    pub fn grab_offset(&self) -> Point {
        self.grab_offset
    }

    /// Block origin requested by a pointer at `pointer`.
    pub fn target_origin(&self, pointer: Point) -> Point {
        pointer.sub_point(self.grab_offset)
    }
}

/// Computes block positions during a drag.
#[derive(Debug)]
pub struct DragEngine {
    forces: Box<dyn ForceModel>,
    margin: i32,
    max_passes: usize,
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new(Box::new(MagneticForces::default()))
    }
}

impl DragEngine {
    pub fn new(forces: Box<dyn ForceModel>) -> Self {
        Self {
            forces,
            margin: HARD_MARGIN,
            max_passes: MAX_RESOLUTION_PASSES,
        }
    }

    /// Set the number of collision resolution passes per frame
    pub fn set_max_passes(&mut self, passes: usize) -> &mut Self {
        self.max_passes = passes.max(1);
        self
    }

    /// Returns the rectangle a block at `current` moves to when the pointer
    /// asks for `target`.
    ///
    /// `others` holds the rectangles of every other block. If `current` was
    /// collision-free, so is the result.
    pub fn compute(&self, current: Rect, target: Point, others: &[Rect], canvas: Canvas) -> Rect {
        let clamped = geometry::clamp_rect(current.with_origin(target), canvas.size(), self.margin);
        let force = self.forces.displacement(clamped, others, canvas);
        let placed = canvas.place(clamped.translate(force.round()), self.margin);

        match self.resolve_collisions(placed, others, canvas) {
            Ok(resolved) => resolved,
            Err(best_effort) => {
                if self.is_clear(current, others) {
                    debug!(
                        x = placed.x(),
                        y = placed.y();
                        "Collision resolution did not converge, keeping previous position"
                    );
                    current
                } else {
                    best_effort
                }
            }
        }
    }

    /// Applies a pointer move to the document.
    ///
    /// Returns false if the dragged block no longer exists.
    pub fn drag_to(
        &self,
        document: &mut Document,
        session: &DragSession,
        pointer: Point,
        canvas: Canvas,
    ) -> bool {
        let others = document.other_rects(session.block_id());
        let Some(block) = document.block_mut(session.block_id()) else {
            return false;
        };

        let next = self.compute(block.position(), session.target_origin(pointer), &others, canvas);
        trace!(block_id = session.block_id().as_str(), x = next.x(), y = next.y(); "Drag frame");
        block.set_position(next);
        true
    }

    fn is_clear(&self, rect: Rect, others: &[Rect]) -> bool {
        others
            .iter()
            .all(|&other| !geometry::overlap(rect, other, self.margin).is_overlapping())
    }

    /// Pushes `rect` clear of every overlapping rectangle.
    ///
    /// Returns `Err` with the last attempt when the passes run out.
    fn resolve_collisions(&self, mut rect: Rect, others: &[Rect], canvas: Canvas) -> Result<Rect, Rect> {
        for _ in 0..self.max_passes {
            let mut moved = false;
            for &other in others {
                if geometry::overlap(rect, other, self.margin).is_overlapping() {
                    rect = self.push_clear(rect, other, canvas);
                    moved = true;
                }
            }
            if !moved {
                return Ok(rect);
            }
        }

        if self.is_clear(rect, others) {
            Ok(rect)
        } else {
            Err(rect)
        }
    }

    /// Moves `rect` along the cheapest separating translation, preferring
    /// ones that keep it on the canvas.
    fn push_clear(&self, rect: Rect, other: Rect, canvas: Canvas) -> Rect {
        let candidates = geometry::separating_translations(rect, other, self.margin)
            .map(|translation| rect.translate(self.align_to_grid(rect, translation, canvas)));

        let in_bounds = candidates
            .iter()
            .copied()
            .filter(|candidate| candidate.is_within(canvas.size(), self.margin))
            .min_by_key(|candidate| candidate.origin().sub_point(rect.origin()).magnitude());

        in_bounds.unwrap_or_else(|| {
            let cheapest = candidates
                .into_iter()
                .min_by_key(|candidate| candidate.origin().sub_point(rect.origin()).magnitude())
                .unwrap_or(rect);
            canvas.place(cheapest, self.margin)
        })
    }

    /// Rounds a separating translation outwards so the moved rectangle stays
    /// on the grid without re-entering the margin.
    fn align_to_grid(&self, rect: Rect, translation: Point, canvas: Canvas) -> Point {
        if !canvas.snap_to_grid() {
            return translation;
        }
        let grid = canvas.grid_size();
        let align = |start: i32, delta: i32| match delta.signum() {
            1 => geometry::snap_up(start + delta, grid) - start,
            -1 => geometry::snap_down(start + delta, grid) - start,
            _ => 0,
        };
        Point::new(align(rect.x(), translation.x()), align(rect.y(), translation.y()))
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::document::{Block, BlockContent, BlockKind};

    use super::*;
    use crate::layout::forces::RigidForces;

    fn rigid() -> DragEngine {
        DragEngine::new(Box::new(RigidForces))
    }

    #[test]
    fn test_free_move_follows_pointer() {
        let engine = rigid();
        let canvas = Canvas::new(600, 800);
        let next = engine.compute(Rect::new(100, 100, 200, 100), Point::new(150, 300), &[], canvas);
        assert_eq!(next, Rect::new(150, 300, 200, 100));
    }

    #[test]
    fn test_clamps_into_canvas() {
        let engine = rigid();
        let canvas = Canvas::new(600, 800);
        let next = engine.compute(Rect::new(100, 100, 200, 100), Point::new(-50, 900), &[], canvas);
        assert_eq!(next, Rect::new(20, 680, 200, 100));
    }

    #[test]
    fn test_snaps_when_enabled() {
        let engine = rigid();
        let canvas = Canvas::new(600, 800).with_snap_to_grid(true);
        let next = engine.compute(Rect::new(100, 100, 200, 100), Point::new(133, 247), &[], canvas);
        assert_eq!(next.origin(), Point::new(140, 240));
    }

    #[test]
    fn test_rigid_drop_onto_neighbor_is_pushed_clear() {
        let engine = rigid();
        let canvas = Canvas::new(600, 800);
        let neighbor = Rect::new(100, 100, 200, 100);
        let next = engine.compute(Rect::new(100, 400, 200, 100), Point::new(100, 100), &[neighbor], canvas);
        assert!(!geometry::overlap(next, neighbor, HARD_MARGIN).is_overlapping());
        // Moving down by 120 is the cheapest in-bounds separation.
        assert_eq!(next, Rect::new(100, 220, 200, 100));
    }

    #[test]
    fn test_grid_aligned_push_stays_on_grid() {
        let engine = rigid();
        let canvas = Canvas::new(600, 800).with_snap_to_grid(true);
        let neighbor = Rect::new(100, 100, 200, 100);
        let next = engine.compute(Rect::new(100, 400, 200, 100), Point::new(100, 120), &[neighbor], canvas);
        assert!(!geometry::overlap(next, neighbor, HARD_MARGIN).is_overlapping());
        assert_eq!(next.y() % 20, 0);
    }

    #[test]
    fn test_single_pass_in_crowded_canvas_never_overlaps() {
        let mut engine = rigid();
        engine.set_max_passes(1);
        let canvas = Canvas::new(400, 300);
        let current = Rect::new(20, 180, 160, 80);
        let others = [
            Rect::new(20, 20, 160, 80),
            Rect::new(220, 20, 160, 80),
            Rect::new(220, 180, 160, 80),
        ];
        let next = engine.compute(current, Point::new(30, 30), &others, canvas);
        for other in others {
            assert!(!geometry::overlap(next, other, HARD_MARGIN).is_overlapping());
        }
    }

    #[test]
    fn test_drag_session_keeps_grab_offset() {
        let doc = Document::new("t").with_blocks(vec![
            Block::new("a", BlockContent::placeholder(BlockKind::Header))
                .with_position(Rect::new(100, 100, 200, 80)),
        ]);
        let session = DragSession::begin(&doc, &"a".into(), Point::new(130, 120)).unwrap();
        assert_eq!(session.grab_offset(), Point::new(30, 20));
        assert_eq!(session.target_origin(Point::new(230, 420)), Point::new(200, 400));
        assert!(DragSession::begin(&doc, &"missing".into(), Point::new(0, 0)).is_none());
    }
}
