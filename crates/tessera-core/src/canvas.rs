//! Canvas bounds and block size constraints.
//!
//! The canvas is not persisted: it is derived from the document's global
//! styles (content width and height) plus the editor's snap setting, and it
//! is recomputed whenever those change. Every size limit is therefore a
//! function of the *current* canvas.

use crate::{
    document::GlobalStyles,
    geometry::{self, Rect, Size},
};

/// Spacing of the snapping grid, in pixels.
pub const GRID_SIZE: i32 = 20;

/// Smallest width a block may have.
pub const MIN_BLOCK_WIDTH: i32 = 160;

/// Largest width a block may have on a wide enough canvas.
pub const MAX_BLOCK_WIDTH: i32 = 480;

/// Smallest height a block may have.
pub const MIN_BLOCK_HEIGHT: i32 = 80;

/// Largest height a block may have on a tall enough canvas.
pub const MAX_BLOCK_HEIGHT: i32 = 350;

/// Space a maximal block leaves free on the canvas, split across both sides.
pub const CANVAS_INSET: i32 = 60;

/// Clearance enforced between blocks and to the canvas edge while dragging
/// and resizing.
pub const HARD_MARGIN: i32 = 20;

/// Clearance used when placing new blocks and when repairing loaded ones.
pub const PLACEMENT_MARGIN: i32 = 30;

/// Inclusive range a block dimension must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    min: i32,
    max: i32,
}

impl Limits {
    /// Creates a range; a `max` below `min` is raised to `min`.
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn min(self) -> i32 {
        self.min
    }

    pub fn max(self) -> i32 {
        self.max
    }

    /// Returns true if `value` lies in the range
    pub fn contains(self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The bounded area blocks are placed within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    grid_size: i32,
    snap_to_grid: bool,
}

impl Canvas {
    /// Creates a canvas of the given size with snapping disabled.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            grid_size: GRID_SIZE,
            snap_to_grid: false,
        }
    }

    /// Derives the canvas from a document's global styles.
    pub fn from_global_styles(styles: &GlobalStyles, snap_to_grid: bool) -> Self {
        Self::new(styles.content_width(), styles.content_height()).with_snap_to_grid(snap_to_grid)
    }

    /// Sets whether positions and sizes snap to the grid (builder style).
    pub fn with_snap_to_grid(mut self, snap_to_grid: bool) -> Self {
        self.snap_to_grid = snap_to_grid;
        self
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn height(self) -> i32 {
        self.height
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn grid_size(self) -> i32 {
        self.grid_size
    }

    pub fn snap_to_grid(self) -> bool {
        self.snap_to_grid
    }

    /// Width range for blocks: `160 ..= min(width - 60, 480)`.
    pub fn width_limits(self) -> Limits {
        Limits::new(
            MIN_BLOCK_WIDTH,
            (self.width - CANVAS_INSET).min(MAX_BLOCK_WIDTH),
        )
    }

    /// Height range for blocks: `80 ..= min(height - 60, 350)`.
    pub fn height_limits(self) -> Limits {
        Limits::new(
            MIN_BLOCK_HEIGHT,
            (self.height - CANVAS_INSET).min(MAX_BLOCK_HEIGHT),
        )
    }

    /// Snaps `value` to the grid when snapping is enabled.
    pub fn snap(self, value: i32) -> i32 {
        if self.snap_to_grid {
            geometry::snap(value, self.grid_size)
        } else {
            value
        }
    }

    /// Clamps `value` into `[lo, hi]`, snapping inside the range when enabled.
    pub fn fit(self, value: i32, lo: i32, hi: i32) -> i32 {
        if self.snap_to_grid {
            geometry::snap_within(value, lo, hi, self.grid_size)
        } else {
            geometry::clamp_range(value, lo, hi)
        }
    }

    /// Fits a size into the block limits, snapping when enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessera_core::{canvas::Canvas, geometry::Size};
    /// let canvas = Canvas::new(600, 800);
    /// assert_eq!(canvas.constrain_size(Size::new(700, 20)), Size::new(480, 80));
    /// ```
    pub fn constrain_size(self, size: Size) -> Size {
        let width = self.width_limits();
        let height = self.height_limits();
        Size::new(
            self.fit(size.width(), width.min(), width.max()),
            self.fit(size.height(), height.min(), height.max()),
        )
    }

    /// Moves a rectangle inside the canvas, keeping `margin` clear on every
    /// side, snapping the position when enabled.
    pub fn place(self, rect: Rect, margin: i32) -> Rect {
        rect.with_x(self.fit(rect.x(), margin, self.width - rect.width() - margin))
            .with_y(self.fit(rect.y(), margin, self.height - rect.height() - margin))
    }
}
