//! Geometric primitives for block placement on the canvas.
//!
//! This module provides the integer rectangle math every layout engine in
//! Tessera builds on: overlap tests, clamping into canvas bounds, grid
//! snapping and the minimal translations that separate two rectangles.
//!
//! # Overview
//!
//! - [`Point`] - An integer position (or translation) in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - A block rectangle anchored at its top-left corner
//! - [`Vector`] - A fractional displacement, used to accumulate forces
//! - [`Overlap`] - Per-axis overlap extents between two rectangles
//!
//! # Coordinate System
//!
//! Tessera uses the same coordinate system as CSS absolute positioning:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the canvas at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! All stored coordinates are whole pixels, so every function here is exact
//! integer arithmetic except [`snap`], which rounds half away from zero.

use serde::{Deserialize, Serialize};

/// An integer point or translation in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::Point;
/// let pointer = Point::new(250, 140);
/// let grab = Point::new(30, 20);
///
/// let origin = pointer.sub_point(grab);
/// assert_eq!(origin.x(), 220);
/// assert_eq!(origin.y(), 120);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns the larger of the absolute coordinate values.
    pub fn magnitude(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }
}

/// A fractional two-dimensional displacement.
///
/// Forces are accumulated as vectors and only rounded back onto the pixel
/// grid once, after damping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    dx: f32,
    dy: f32,
}

impl Vector {
    /// Creates a new vector with the given components
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Returns the horizontal component
    pub fn dx(self) -> f32 {
        self.dx
    }

    /// Returns the vertical component
    pub fn dy(self) -> f32 {
        self.dy
    }

    /// Returns true if both components are zero
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Adds another vector component-wise
    pub fn add(self, other: Vector) -> Self {
        Self {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
        }
    }

    /// Multiplies both components by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            dx: self.dx * factor,
            dy: self.dy * factor,
        }
    }

    /// Rounds the vector to the nearest whole-pixel translation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessera_core::geometry::{Point, Vector};
    /// let force = Vector::new(4.2, -6.5);
    /// assert_eq!(force.round(), Point::new(4, -7));
    /// ```
    pub fn round(self) -> Point {
        Point::new(self.dx.round() as i32, self.dy.round() as i32)
    }
}

/// Width and height of a block or canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> i32 {
        self.height
    }

    /// Returns a new size with the given width
    pub fn with_width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    /// Returns a new size with the given height
    pub fn with_height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A block rectangle anchored at its top-left corner.
///
/// This is also the wire representation of a block position
/// (`{"x": .., "y": .., "width": .., "height": ..}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and dimensions
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a new rectangle from a top-left point and a size
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Returns the left edge
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the top edge
    pub fn y(self) -> i32 {
        self.y
    }

    /// Returns the width
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> i32 {
        self.height
    }

    /// Returns the right edge (`x + width`), saturating at `i32::MAX`
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Returns the bottom edge (`y + height`), saturating at `i32::MAX`
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns the top-left corner
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the dimensions
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the horizontal center
    pub fn center_x(self) -> f32 {
        self.x as f32 + self.width as f32 / 2.0
    }

    /// Returns the vertical center
    pub fn center_y(self) -> f32 {
        self.y as f32 + self.height as f32 / 2.0
    }

    pub fn with_x(mut self, x: i32) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: i32) -> Self {
        self.y = y;
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }

    /// Returns a rectangle with the same size at a new top-left corner
    pub fn with_origin(self, origin: Point) -> Self {
        Self::from_origin_size(origin, self.size())
    }

    /// Returns a rectangle with the same origin and a new size
    pub fn with_size(self, size: Size) -> Self {
        Self::from_origin_size(self.origin(), size)
    }

    /// Moves the rectangle by the given offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessera_core::geometry::{Point, Rect};
    /// let rect = Rect::new(100, 100, 200, 80);
    /// let moved = rect.translate(Point::new(-20, 40));
    /// assert_eq!(moved, Rect::new(80, 140, 200, 80));
    /// ```
    pub fn translate(self, offset: Point) -> Self {
        self.with_origin(self.origin().add_point(offset))
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expand(self, margin: i32) -> Self {
        Self::new(
            self.x.saturating_sub(margin),
            self.y.saturating_sub(margin),
            self.width.saturating_add(2 * margin),
            self.height.saturating_add(2 * margin),
        )
    }

    /// Returns true if this rectangle lies within `bounds` shrunk by `margin`
    pub fn is_within(self, bounds: Size, margin: i32) -> bool {
        self.x >= margin
            && self.y >= margin
            && self.right() <= bounds.width - margin
            && self.bottom() <= bounds.height - margin
    }
}

/// Overlap extents on each axis between two rectangles.
///
/// Both extents are zero when the rectangles are disjoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlap {
    dx: i32,
    dy: i32,
}

impl Overlap {
    /// Returns the horizontal overlap extent
    pub fn dx(self) -> i32 {
        self.dx
    }

    /// Returns the vertical overlap extent
    pub fn dy(self) -> i32 {
        self.dy
    }

    /// Returns true if the rectangles overlap
    pub fn is_overlapping(self) -> bool {
        self.dx > 0 && self.dy > 0
    }

    /// Returns the axis with the smaller overlap extent (horizontal on ties)
    pub fn min_axis(self) -> Axis {
        if self.dx <= self.dy {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Returns the overlap depth along the given axis
    pub fn depth(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        }
    }
}

/// Computes the overlap between `a` expanded by `margin` and `b`.
///
/// Two rectangles whose gap is exactly `margin` do not overlap.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::{overlap, Rect};
/// let a = Rect::new(0, 0, 100, 100);
/// let touching = Rect::new(120, 0, 100, 100);
/// let close = Rect::new(110, 50, 100, 100);
///
/// assert!(!overlap(a, touching, 20).is_overlapping());
///
/// let o = overlap(a, close, 20);
/// assert_eq!(o.dx(), 10);
/// assert_eq!(o.dy(), 70);
/// ```
pub fn overlap(a: Rect, b: Rect, margin: i32) -> Overlap {
    let expanded = a.expand(margin);
    let dx = expanded.right().min(b.right()).saturating_sub(expanded.x.max(b.x));
    let dy = expanded.bottom().min(b.bottom()).saturating_sub(expanded.y.max(b.y));

    if dx > 0 && dy > 0 {
        Overlap { dx, dy }
    } else {
        Overlap::default()
    }
}

/// Clips the rectangle position so it stays within `bounds` shrunk by `margin`.
///
/// The size is never changed. If the rectangle is too large to fit, it is
/// pinned to the leading margin.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::{clamp_rect, Rect, Size};
/// let canvas = Size::new(600, 800);
/// let clamped = clamp_rect(Rect::new(500, -40, 200, 100), canvas, 20);
/// assert_eq!(clamped, Rect::new(380, 20, 200, 100));
/// ```
pub fn clamp_rect(rect: Rect, bounds: Size, margin: i32) -> Rect {
    rect.with_x(clamp_range(
        rect.x,
        margin,
        bounds.width - rect.width - margin,
    ))
    .with_y(clamp_range(
        rect.y,
        margin,
        bounds.height - rect.height - margin,
    ))
}

/// Clamps `value` into `[lo, hi]`; when the range is empty, `lo` wins.
pub fn clamp_range(value: i32, lo: i32, hi: i32) -> i32 {
    value.min(hi).max(lo)
}

/// Rounds `value` to the nearest multiple of `grid_size`.
///
/// A non-positive grid size disables snapping.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::snap;
/// assert_eq!(snap(109, 20), 100);
/// assert_eq!(snap(110, 20), 120);
/// assert_eq!(snap(-9, 20), 0);
/// assert_eq!(snap(37, 0), 37);
/// ```
pub fn snap(value: i32, grid_size: i32) -> i32 {
    if grid_size <= 0 {
        return value;
    }
    (value as f64 / grid_size as f64).round() as i32 * grid_size
}

/// Rounds `value` up to a multiple of `grid_size`.
pub fn snap_up(value: i32, grid_size: i32) -> i32 {
    if grid_size <= 0 {
        return value;
    }
    value.div_euclid(grid_size) * grid_size + if value.rem_euclid(grid_size) > 0 {
        grid_size
    } else {
        0
    }
}

/// Rounds `value` down to a multiple of `grid_size`.
pub fn snap_down(value: i32, grid_size: i32) -> i32 {
    if grid_size <= 0 {
        return value;
    }
    value.div_euclid(grid_size) * grid_size
}

/// Snaps `value` to the grid while keeping it inside `[lo, hi]`.
///
/// The range is first narrowed to its grid-aligned interior so the result is
/// both a grid multiple and in range. When no grid multiple fits, the
/// rounded-up lower bound is returned. The function is idempotent.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::snap_within;
/// assert_eq!(snap_within(335, 80, 335, 20), 320);
/// assert_eq!(snap_within(30, 30, 500, 20), 40);
/// assert_eq!(snap_within(250, 160, 480, 20), 260);
/// ```
pub fn snap_within(value: i32, lo: i32, hi: i32, grid_size: i32) -> i32 {
    if grid_size <= 0 {
        return clamp_range(value, lo, hi);
    }
    let lo = snap_up(lo, grid_size);
    let hi = snap_down(hi, grid_size).max(lo);
    clamp_range(snap(value, grid_size), lo, hi)
}

/// Returns the four axis-aligned translations that move `a` clear of `b`.
///
/// After applying any of them, `a` and `b` are separated by at least
/// `margin`. The order is left, right, up, down.
pub fn separating_translations(a: Rect, b: Rect, margin: i32) -> [Point; 4] {
    [
        Point::new(b.x - margin - a.right(), 0),
        Point::new(b.right() + margin - a.x, 0),
        Point::new(0, b.y - margin - a.bottom()),
        Point::new(0, b.bottom() + margin - a.y),
    ]
}

/// Returns the smallest translation that moves `a` clear of `b`.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::{minimal_translation, Point, Rect};
/// let a = Rect::new(100, 100, 200, 100);
/// let b = Rect::new(100, 100, 200, 100);
/// // Clearing vertically (100 + 20) is cheaper than horizontally (200 + 20).
/// assert_eq!(minimal_translation(a, b, 20).magnitude(), 120);
/// ```
pub fn minimal_translation(a: Rect, b: Rect, margin: i32) -> Point {
    separating_translations(a, b, margin)
        .into_iter()
        .min_by_key(|translation| translation.magnitude())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(10, 20).add_point(Point::new(5, -5));
        assert_eq!(p, Point::new(15, 15));
        assert_eq!(p.sub_point(Point::new(15, 15)), Point::default());
        assert!(Point::default().is_zero());
        assert_eq!(Point::new(-30, 12).magnitude(), 30);
    }

    #[test]
    fn test_vector_scale_and_round() {
        let v = Vector::new(10.0, -3.0).add(Vector::new(2.0, 1.0)).scale(0.7);
        assert_eq!(v.round(), Point::new(8, -1));
        assert!(Vector::default().is_zero());
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert_eq!(rect.origin(), Point::new(10, 20));
        assert_eq!(rect.size(), Size::new(100, 50));
        assert_eq!(rect.center_x(), 60.0);
        assert_eq!(rect.center_y(), 45.0);
    }

    #[test]
    fn test_rect_expand() {
        let rect = Rect::new(10, 20, 100, 50).expand(5);
        assert_eq!(rect, Rect::new(5, 15, 110, 60));
    }

    #[test]
    fn test_rect_is_within() {
        let canvas = Size::new(600, 800);
        assert!(Rect::new(20, 20, 560, 760).is_within(canvas, 20));
        assert!(!Rect::new(19, 20, 100, 100).is_within(canvas, 20));
        assert!(!Rect::new(500, 20, 100, 100).is_within(canvas, 20));
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(300, 300, 100, 100);
        assert_eq!(overlap(a, b, 20), Overlap::default());
    }

    #[test]
    fn test_overlap_identical() {
        let a = Rect::new(100, 100, 200, 100);
        let o = overlap(a, a, 20);
        assert_eq!(o.dx(), 200);
        assert_eq!(o.dy(), 100);
        assert_eq!(o.min_axis(), Axis::Vertical);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(90, 30, 50, 200);
        assert_eq!(overlap(a, b, 20), overlap(b, a, 20));
    }

    #[test]
    fn test_overlap_within_margin_only() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(110, 0, 100, 100);
        assert!(!overlap(a, b, 0).is_overlapping());
        assert!(overlap(a, b, 20).is_overlapping());
    }

    #[test]
    fn test_clamp_rect_oversized_pins_to_margin() {
        let clamped = clamp_rect(Rect::new(50, 50, 700, 100), Size::new(600, 800), 20);
        assert_eq!(clamped.x(), 20);
        assert_eq!(clamped.y(), 50);
    }

    #[test]
    fn test_snap_helpers() {
        assert_eq!(snap_up(41, 20), 60);
        assert_eq!(snap_up(40, 20), 40);
        assert_eq!(snap_up(-5, 20), 0);
        assert_eq!(snap_down(59, 20), 40);
        assert_eq!(snap_down(-5, 20), -20);
    }

    #[test]
    fn test_snap_within_is_idempotent() {
        for value in [-50, 0, 31, 149, 150, 333, 999] {
            let once = snap_within(value, 30, 335, 20);
            assert_eq!(snap_within(once, 30, 335, 20), once);
            assert_eq!(once % 20, 0);
            assert!((40..=320).contains(&once));
        }
    }

    #[test]
    fn test_snap_within_empty_range() {
        assert_eq!(snap_within(100, 30, 10, 20), 40);
        assert_eq!(snap_within(100, 30, 10, 0), 30);
    }

    #[test]
    fn test_separating_translations_clear_the_margin() {
        let a = Rect::new(100, 100, 200, 100);
        let b = Rect::new(150, 120, 200, 100);
        for translation in separating_translations(a, b, 20) {
            let moved = a.translate(translation);
            assert!(!overlap(moved, b, 20).is_overlapping(), "{translation:?}");
        }
    }
}
