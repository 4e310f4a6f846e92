//! Placement of newly added blocks.
//!
//! The allocator tries a fixed sequence of strategies and returns the first
//! candidate that lies on the canvas and keeps [`PLACEMENT_MARGIN`] clear of
//! every existing block. The last strategy always answers, even when its
//! candidate runs past the canvas bottom.

use std::fmt;

use log::debug;

use tessera_core::{
    canvas::{Canvas, PLACEMENT_MARGIN},
    geometry::{self, Rect, Size},
};

/// Vertical or horizontal clearance between a new block and the block it is
/// placed next to.
const CLEARANCE: i32 = 40;

/// Extra room a vertical gap needs beyond the block height.
const GAP_SLACK: i32 = 20;

/// How a placement was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Centered below the lowest block
    BelowLowest,
    /// Centered in a vertical gap between two blocks
    Gap,
    /// To the right of an existing block
    SideBySide,
    /// In the free half of a two-column layout
    TwoColumn,
    /// Below the lowest block without bounds checking
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BelowLowest => "below-lowest",
            Self::Gap => "gap",
            Self::SideBySide => "side-by-side",
            Self::TwoColumn => "two-column",
            Self::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// The rectangle chosen for a new block and the strategy that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    rect: Rect,
    strategy: Strategy,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

/// Finds space for new blocks.
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    margin: i32,
}

impl Default for Allocator {
    fn default() -> Self {
        Self {
            margin: PLACEMENT_MARGIN,
        }
    }
}

impl Allocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses a rectangle for a block of `requested` size.
    ///
    /// The size is first fitted into the canvas limits. Every strategy but
    /// [`Strategy::Fallback`] yields a rectangle within the canvas; all of
    /// them keep the margin clear of `blocks`.
    pub fn allocate(&self, blocks: &[Rect], canvas: Canvas, requested: Size) -> Placement {
        let size = canvas.constrain_size(requested);

        let placement = Some(self.lowest_candidate(blocks, canvas, size))
            .filter(|rect| self.fits(*rect, blocks, canvas))
            .map(|rect| (rect, Strategy::BelowLowest))
            .or_else(|| self.in_gap(blocks, canvas, size).map(|rect| (rect, Strategy::Gap)))
            .or_else(|| self.side_by_side(blocks, canvas, size).map(|rect| (rect, Strategy::SideBySide)))
            .or_else(|| self.two_column(blocks, canvas, size).map(|rect| (rect, Strategy::TwoColumn)))
            .map(|(rect, strategy)| Placement { rect, strategy })
            .unwrap_or_else(|| Placement {
                rect: self.lowest_candidate(blocks, canvas, size),
                strategy: Strategy::Fallback,
            });

        debug!(
            strategy:% = placement.strategy,
            x = placement.rect.x(),
            y = placement.rect.y(),
            width = placement.rect.width(),
            height = placement.rect.height();
            "Placed new block"
        );
        placement
    }

    fn fits(&self, rect: Rect, blocks: &[Rect], canvas: Canvas) -> bool {
        rect.is_within(canvas.size(), self.margin)
            && blocks
                .iter()
                .all(|&block| !geometry::overlap(rect, block, self.margin).is_overlapping())
    }

    fn candidate(&self, x: i32, y: i32, size: Size, canvas: Canvas) -> Rect {
        Rect::new(canvas.snap(x), canvas.snap(y), size.width(), size.height())
    }

    fn centered_x(&self, canvas: Canvas, size: Size) -> i32 {
        (canvas.width() - size.width()) / 2
    }

    fn lowest_candidate(&self, blocks: &[Rect], canvas: Canvas, size: Size) -> Rect {
        let y = blocks
            .iter()
            .map(|block| block.bottom().saturating_add(CLEARANCE))
            .max()
            .unwrap_or(self.margin);
        self.candidate(self.centered_x(canvas, size), y, size, canvas)
    }

    fn in_gap(&self, blocks: &[Rect], canvas: Canvas, size: Size) -> Option<Rect> {
        let mut sorted = blocks.to_vec();
        sorted.sort_by_key(|block| block.y());

        sorted.windows(2).find_map(|pair| {
            let (upper, lower) = (pair[0], pair[1]);
            let gap = lower.y().saturating_sub(upper.bottom());
            if gap.saturating_sub(2 * CLEARANCE) < size.height() + GAP_SLACK {
                return None;
            }
            let rect = self.candidate(
                self.centered_x(canvas, size),
                upper.bottom().saturating_add(CLEARANCE),
                size,
                canvas,
            );
            self.fits(rect, blocks, canvas).then_some(rect)
        })
    }

    fn side_by_side(&self, blocks: &[Rect], canvas: Canvas, size: Size) -> Option<Rect> {
        let mut sorted = blocks.to_vec();
        sorted.sort_by_key(|block| block.x());

        sorted.iter().find_map(|block| {
            let x = block.right().saturating_add(CLEARANCE);
            if (canvas.width() - self.margin).saturating_sub(x) < size.width() {
                return None;
            }
            let rect = self.candidate(x, block.y(), size, canvas);
            self.fits(rect, blocks, canvas).then_some(rect)
        })
    }

    fn two_column(&self, blocks: &[Rect], canvas: Canvas, size: Size) -> Option<Rect> {
        let middle = canvas.width() / 2;
        let column = canvas.constrain_size(
            size.with_width(size.width().min(middle - self.margin - CLEARANCE / 2)),
        );

        let left_taken = blocks.iter().any(|block| block.x() < middle);
        let right_taken = blocks.iter().any(|block| block.right() > middle);

        let x = if !left_taken {
            self.margin
        } else if !right_taken {
            canvas.width() - self.margin - column.width()
        } else {
            return None;
        };

        let rect = self.candidate(x, self.margin, column, canvas);
        self.fits(rect, blocks, canvas).then_some(rect)
    }
}
