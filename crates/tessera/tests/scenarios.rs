//! End-to-end layout scenarios over the public engines.
//!
//! Scenarios quoting off-grid coordinates run with snapping disabled.

use tessera::{
    Block, BlockContent, BlockKind, Canvas, Document, Point, Rect,
    canvas::HARD_MARGIN,
    document::GlobalStyles,
    editor::{Editor, EditorState, Event},
    geometry,
    layout::{self, Allocator, DragEngine, ResizeEngine, ResizeHandle, Strategy},
};

fn block(id: &str, kind: BlockKind, rect: Rect) -> Block {
    Block::new(id, BlockContent::placeholder(kind)).with_position(rect)
}

#[test]
fn test_header_on_empty_canvas_is_centered_at_top() {
    let canvas = Canvas::new(600, 800);
    let placement = Allocator::new().allocate(&[], canvas, BlockKind::Header.default_size());

    assert_eq!(placement.rect(), Rect::new(100, 30, 400, 80));
    assert_eq!(placement.strategy(), Strategy::BelowLowest);
}

#[test]
fn test_text_block_fills_gap_between_blocks() {
    let canvas = Canvas::new(600, 800);
    let blocks = [Rect::new(100, 30, 400, 80), Rect::new(100, 600, 400, 80)];
    let placement = Allocator::new().allocate(&blocks, canvas, BlockKind::Text.default_size());

    assert_eq!(placement.strategy(), Strategy::Gap);
    assert_eq!(placement.rect().y(), 150);
    assert_eq!(placement.rect().x(), (600 - placement.rect().width()) / 2);
}

#[test]
fn test_stationary_drag_resolves_full_overlap() {
    let canvas = Canvas::new(600, 800);
    let a = Rect::new(100, 100, 200, 100);
    let b = Rect::new(100, 100, 200, 100);

    let next = DragEngine::default().compute(a, a.origin(), &[b], canvas);

    assert!(!geometry::overlap(next, b, HARD_MARGIN).is_overlapping());
    let moved = next.origin().sub_point(a.origin());
    // The cheapest separation clears the 100px height plus the margin.
    assert!(moved.magnitude() >= 100 + HARD_MARGIN, "moved only {moved:?}");
}

#[test]
fn test_stationary_drag_through_reducer() {
    let doc = Document::new("Weekly").with_blocks(vec![
        block("a", BlockKind::Text, Rect::new(100, 100, 200, 100)),
        block("b", BlockKind::Text, Rect::new(100, 100, 200, 100)),
    ]);
    let editor = Editor::default();
    let state = EditorState::new(doc, false);

    let grab = Point::new(150, 150);
    let state = editor.reduce(state, &Event::BeginDrag { id: "a".into(), pointer: grab });
    let state = editor.reduce(state, &Event::PointerMove { pointer: grab });
    let state = editor.reduce(state, &Event::PointerUp);

    let blocks = state.document().blocks();
    assert!(!geometry::overlap(blocks[0].position(), blocks[1].position(), HARD_MARGIN).is_overlapping());
}

#[test]
fn test_resize_stops_short_of_neighbor() {
    let canvas = Canvas::new(800, 800);
    let start = Rect::new(100, 100, 200, 100);
    let neighbor = Rect::new(start.x() + 220, 100, 200, 100);

    let next = ResizeEngine::new().compute(start, ResizeHandle::Se, Point::new(50, 50), &[neighbor], canvas);

    assert_eq!(next.width(), neighbor.x() - HARD_MARGIN - start.x());
    assert_eq!(next.height(), 150);
    assert!(!geometry::overlap(next, neighbor, HARD_MARGIN).is_overlapping());
}

#[test]
fn test_validate_clamps_oversized_width() {
    let doc = Document::new("Weekly")
        .with_global_styles(GlobalStyles::default().with_content_size(600, 800))
        .with_blocks(vec![block("wide", BlockKind::Text, Rect::new(0, 40, 700, 120))]);

    let fixed = layout::validate(&doc, false);

    assert_eq!(fixed.blocks()[0].position().width(), (600 - 60).min(480));
}
