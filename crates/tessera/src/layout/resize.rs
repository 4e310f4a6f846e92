//! Handle-driven resizing of a block.
//!
//! A resize is always computed from the rectangle captured when the gesture
//! started plus the total pointer delta, so intermediate frames never
//! accumulate rounding. Edges on the opposite side of the dragged handle stay
//! anchored.

use std::{fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};

use tessera_core::{
    canvas::{Canvas, HARD_MARGIN, Limits},
    document::Document,
    geometry::{self, Point, Rect},
    identifier::BlockId,
};

/// One of the eight resize handles around a block, named by compass
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
        ResizeHandle::Ne,
        ResizeHandle::Nw,
        ResizeHandle::Se,
        ResizeHandle::Sw,
    ];

    /// Returns true if the handle drags the left edge
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Returns true if the handle drags the right edge
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Returns true if the handle drags the top edge
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Returns true if the handle drags the bottom edge
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }
}

impl FromStr for ResizeHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|handle| handle.as_str() == s)
            .ok_or_else(|| format!("unknown resize handle `{s}`"))
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-progress resize of a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    block_id: BlockId,
    handle: ResizeHandle,
    start_rect: Rect,
    start_pointer: Point,
}

impl ResizeSession {
    /// Starts resizing `id` with `handle` grabbed at `pointer`.
    ///
    /// Returns `None` if the document has no such block.
    pub fn begin(document: &Document, id: &BlockId, handle: ResizeHandle, pointer: Point) -> Option<Self> {
        let block = document.block(id)?;
        Some(Self {
            block_id: id.clone(),
            handle,
            start_rect: block.position(),
            start_pointer: pointer,
        })
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    /// The block's rectangle when the gesture started
    pub fn start_rect(&self) -> Rect {
        self.start_rect
    }

    /// Total pointer movement since the gesture started.
    pub fn delta(&self, pointer: Point) -> Point {
        pointer.sub_point(self.start_pointer)
    }
}

/// A pair of edges along one axis, tracked as start and length.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: i32,
    len: i32,
}

impl Span {
    fn end(self) -> i32 {
        self.start + self.len
    }
}

/// Computes block rectangles during a resize.
#[derive(Debug, Clone, Copy)]
pub struct ResizeEngine {
    margin: i32,
}

impl Default for ResizeEngine {
    fn default() -> Self {
        Self { margin: HARD_MARGIN }
    }
}

impl ResizeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rectangle for a resize of `start` by `delta` through
    /// `handle`.
    ///
    /// The size stays within the canvas limits, the block stays on the
    /// canvas, and growth towards a neighbor stops `margin` short of it
    /// (never below the minimum size).
    pub fn compute(
        &self,
        start: Rect,
        handle: ResizeHandle,
        delta: Point,
        others: &[Rect],
        canvas: Canvas,
    ) -> Rect {
        let width_limits = canvas.width_limits();
        let height_limits = canvas.height_limits();
        let horizontal = Span { start: start.x(), len: start.width() };
        let vertical = Span { start: start.y(), len: start.height() };

        let mut width = self.grow(
            horizontal,
            delta.x(),
            handle.moves_left(),
            handle.moves_right(),
            width_limits,
            canvas.width(),
            canvas,
        );
        let mut height = self.grow(
            vertical,
            delta.y(),
            handle.moves_top(),
            handle.moves_bottom(),
            height_limits,
            canvas.height(),
            canvas,
        );

        let anchor = |span: Span, leading: bool, len: i32| {
            if leading { span.end() - len } else { span.start }
        };

        for &other in others {
            let proposed = Rect::new(
                anchor(horizontal, handle.moves_left(), width),
                anchor(vertical, handle.moves_top(), height),
                width,
                height,
            );
            if !geometry::overlap(proposed, other, self.margin).is_overlapping() {
                continue;
            }

            let horizontal_only = proposed.with_y(start.y()).with_height(start.height());
            let vertical_only = proposed.with_x(start.x()).with_width(start.width());
            let by_width = geometry::overlap(horizontal_only, other, self.margin).is_overlapping();
            let by_height = geometry::overlap(vertical_only, other, self.margin).is_overlapping();
            let (clip_width, clip_height) = match (by_width, by_height) {
                (true, false) => (true, false),
                (false, true) => (false, true),
                _ => (true, true),
            };

            if clip_width {
                width = self.clip(horizontal, width, other.x(), other.right(), handle.moves_left(), handle.moves_right(), width_limits);
            }
            if clip_height {
                height = self.clip(vertical, height, other.y(), other.bottom(), handle.moves_top(), handle.moves_bottom(), height_limits);
            }
        }

        // Clipping may leave a moving edge off-grid; round it down within limits.
        if handle.moves_left() || handle.moves_right() {
            width = canvas.fit(width, width_limits.min(), width);
        }
        if handle.moves_top() || handle.moves_bottom() {
            height = canvas.fit(height, height_limits.min(), height);
        }

        Rect::new(
            anchor(horizontal, handle.moves_left(), width),
            anchor(vertical, handle.moves_top(), height),
            width,
            height,
        )
    }

    /// Applies a pointer move to the document.
    ///
    /// Returns false if the resized block no longer exists.
    pub fn resize_to(
        &self,
        document: &mut Document,
        session: &ResizeSession,
        pointer: Point,
        canvas: Canvas,
    ) -> bool {
        let others = document.other_rects(session.block_id());
        let Some(block) = document.block_mut(session.block_id()) else {
            return false;
        };

        let next = self.compute(session.start_rect(), session.handle(), session.delta(pointer), &others, canvas);
        trace!(
            block_id = session.block_id().as_str(),
            handle = session.handle().as_str(),
            width = next.width(),
            height = next.height();
            "Resize frame"
        );
        block.set_position(next);
        true
    }

    /// New length along one axis after moving the leading or trailing edge
    /// by `delta`, limited to the size range and the canvas.
    #[allow(clippy::too_many_arguments)]
    fn grow(
        &self,
        span: Span,
        delta: i32,
        leading: bool,
        trailing: bool,
        limits: Limits,
        extent: i32,
        canvas: Canvas,
    ) -> i32 {
        let len = if trailing {
            span.len + delta
        } else if leading {
            span.len - delta
        } else {
            return canvas.fit(span.len, limits.min(), limits.max());
        };

        let len = canvas.fit(len, limits.min(), limits.max());
        let room = if trailing {
            extent - self.margin - span.start
        } else {
            span.end() - self.margin
        };
        len.min(room).max(limits.min())
    }

    /// Shortens the moving edge so it stops `margin` short of a neighbor
    /// lying beyond it.
    #[allow(clippy::too_many_arguments)]
    fn clip(
        &self,
        span: Span,
        len: i32,
        other_start: i32,
        other_end: i32,
        leading: bool,
        trailing: bool,
        limits: Limits,
    ) -> i32 {
        if trailing && other_start >= span.end() {
            len.min(other_start - self.margin - span.start).max(limits.min())
        } else if leading && other_end <= span.start {
            len.min(span.end() - (other_end + self.margin)).max(limits.min())
        } else {
            len
        }
    }
}
