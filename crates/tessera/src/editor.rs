//! Interactive editing of a document.
//!
//! Editing is an explicit reducer: [`Editor::reduce`] takes an
//! [`EditorState`] and an [`Event`] and returns the next state, with the
//! canvas invariants restored. It has no hidden state and no clock.
//! [`Session`] layers the undo history and modification timestamps on top.

mod history;

pub use history::History;

use chrono::Utc;
use log::{debug, info};

use tessera_core::{
    document::{Block, BlockContent, BlockKind, BlockStyles, Document, GlobalStyles},
    geometry::{Point, Size},
    identifier::BlockId,
};

use crate::{
    config::{DEFAULT_HISTORY_LIMIT, LayoutConfig},
    layout::{
        self, Allocator, DragEngine, DragSession, ResizeEngine, ResizeHandle, ResizeSession,
    },
};

/// The gesture currently in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

/// Everything the reducer needs to know about the editor.
#[derive(Debug, Clone)]
pub struct EditorState {
    document: Document,
    snap_to_grid: bool,
    interaction: Interaction,
    next_block_seq: u64,
}

impl EditorState {
    pub fn new(document: Document, snap_to_grid: bool) -> Self {
        let next_block_seq = document.blocks().len() as u64 + 1;
        Self {
            document,
            snap_to_grid,
            interaction: Interaction::Idle,
            next_block_seq,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Returns an unused block id and advances the sequence.
    fn next_block_id(&mut self) -> BlockId {
        loop {
            let id = BlockId::generated(self.next_block_seq);
            self.next_block_seq += 1;
            if self.document.block(&id).is_none() {
                return id;
            }
        }
    }
}

/// Input to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Adds a block of `kind`, placed by the allocator. Without a size the
    /// kind's default size is used.
    AddBlock { kind: BlockKind, size: Option<Size> },
    RemoveBlock { id: BlockId },
    /// Grabs a block at `pointer`.
    BeginDrag { id: BlockId, pointer: Point },
    /// Grabs one of a block's resize handles at `pointer`.
    BeginResize {
        id: BlockId,
        handle: ResizeHandle,
        pointer: Point,
    },
    /// Moves the pointer during a drag or resize.
    PointerMove { pointer: Point },
    /// Ends the current drag or resize.
    PointerUp,
    SetSnapToGrid(bool),
    /// Replaces the global styles; block geometry is revalidated against the
    /// new canvas.
    SetGlobalStyles(GlobalStyles),
    UpdateContent { id: BlockId, content: BlockContent },
    UpdateStyles { id: BlockId, styles: BlockStyles },
}

/// The pure state transition function and the engines it drives.
#[derive(Debug, Default)]
pub struct Editor {
    allocator: Allocator,
    drag: DragEngine,
    resize: ResizeEngine,
}

impl Editor {
    pub fn new(allocator: Allocator, drag: DragEngine, resize: ResizeEngine) -> Self {
        Self {
            allocator,
            drag,
            resize,
        }
    }

    /// Creates an editor whose drag engine uses the configured force model.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(
            Allocator::new(),
            DragEngine::new(config.force_model()),
            ResizeEngine::new(),
        )
    }

    /// Applies `event` to `state`.
    ///
    /// Events naming unknown blocks, and pointer events without a gesture in
    /// progress, leave the state unchanged.
    pub fn reduce(&self, mut state: EditorState, event: &Event) -> EditorState {
        let canvas = state.document.canvas(state.snap_to_grid);

        match event {
            Event::AddBlock { kind, size } => {
                let rects: Vec<_> = state.document.blocks().iter().map(Block::position).collect();
                let requested = size.unwrap_or_else(|| kind.default_size());
                let placement = self.allocator.allocate(&rects, canvas, requested);
                let id = state.next_block_id();
                info!(block_id = id.as_str(), kind = kind.as_str(); "Adding block");

                let order = state.document.blocks().len() as i64;
                let block = Block::new(id, BlockContent::placeholder(*kind))
                    .with_position(placement.rect())
                    .with_order(order);
                state.document.push_block(block);
            }
            Event::RemoveBlock { id } => {
                if state.document.remove_block(id).is_some() {
                    info!(block_id = id.as_str(); "Removed block");
                    if interaction_targets(&state.interaction, id) {
                        state.interaction = Interaction::Idle;
                    }
                }
            }
            Event::BeginDrag { id, pointer } => {
                if let Some(session) = DragSession::begin(&state.document, id, *pointer) {
                    debug!(block_id = id.as_str(); "Drag started");
                    state.interaction = Interaction::Dragging(session);
                }
            }
            Event::BeginResize { id, handle, pointer } => {
                if let Some(session) = ResizeSession::begin(&state.document, id, *handle, *pointer) {
                    debug!(block_id = id.as_str(), handle = handle.as_str(); "Resize started");
                    state.interaction = Interaction::Resizing(session);
                }
            }
            Event::PointerMove { pointer } => {
                let alive = match &state.interaction {
                    Interaction::Idle => true,
                    Interaction::Dragging(session) => {
                        self.drag.drag_to(&mut state.document, session, *pointer, canvas)
                    }
                    Interaction::Resizing(session) => {
                        self.resize.resize_to(&mut state.document, session, *pointer, canvas)
                    }
                };
                if !alive {
                    state.interaction = Interaction::Idle;
                }
            }
            Event::PointerUp => {
                state.interaction = Interaction::Idle;
            }
            Event::SetSnapToGrid(snap_to_grid) => {
                state.snap_to_grid = *snap_to_grid;
            }
            Event::SetGlobalStyles(global_styles) => {
                state.document.set_global_styles(global_styles.clone());
                state.document = layout::validate(&state.document, state.snap_to_grid);
            }
            Event::UpdateContent { id, content } => {
                if let Some(block) = state.document.block_mut(id) {
                    block.set_content(content.clone());
                }
            }
            Event::UpdateStyles { id, styles } => {
                if let Some(block) = state.document.block_mut(id) {
                    block.set_styles(styles.clone());
                }
            }
        }

        state
    }
}

fn interaction_targets(interaction: &Interaction, id: &BlockId) -> bool {
    match interaction {
        Interaction::Idle => false,
        Interaction::Dragging(session) => session.block_id() == id,
        Interaction::Resizing(session) => session.block_id() == id,
    }
}

/// Returns true if applying `event` in `state` completes an undoable step.
fn commits(state: &EditorState, event: &Event) -> bool {
    match event {
        Event::PointerUp => state.interaction != Interaction::Idle,
        Event::AddBlock { .. }
        | Event::RemoveBlock { .. }
        | Event::SetGlobalStyles(_)
        | Event::UpdateContent { .. }
        | Event::UpdateStyles { .. } => true,
        Event::BeginDrag { .. }
        | Event::BeginResize { .. }
        | Event::PointerMove { .. }
        | Event::SetSnapToGrid(_) => false,
    }
}

/// An editing session: the reducer plus undo history and timestamps.
#[derive(Debug)]
pub struct Session {
    editor: Editor,
    state: EditorState,
    history: History,
}

impl Session {
    pub fn new(editor: Editor, document: Document, snap_to_grid: bool) -> Self {
        Self::with_history_limit(editor, document, snap_to_grid, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(
        editor: Editor,
        document: Document,
        snap_to_grid: bool,
        history_limit: usize,
    ) -> Self {
        let history = History::new(document.clone(), history_limit);
        Self {
            editor,
            state: EditorState::new(document, snap_to_grid),
            history,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        self.state.document()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Applies `event`, recording a history entry when it completes a step
    /// that changed the document.
    pub fn dispatch(&mut self, event: Event) {
        let commit = commits(&self.state, &event);
        self.state = self.editor.reduce(self.state.clone(), &event);

        if commit && self.history.current() != self.state.document() {
            self.state.document.touch(Utc::now());
            self.history.commit(self.state.document.clone());
        }
    }

    /// Restores the previous committed document. Returns false at the start
    /// of the history.
    pub fn undo(&mut self) -> bool {
        let Some(document) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(document);
        true
    }

    /// Re-applies an undone step. Returns false at the end of the history.
    pub fn redo(&mut self) -> bool {
        let Some(document) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(document);
        true
    }

    fn restore(&mut self, document: Document) {
        debug!(version = self.history.version(); "Restoring document");
        self.state.document = document;
        self.state.interaction = Interaction::Idle;
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::{canvas::HARD_MARGIN, geometry::{self, Rect}};

    use super::*;

    fn empty_state() -> EditorState {
        EditorState::new(Document::new("Weekly"), false)
    }

    fn add(editor: &Editor, state: EditorState, kind: BlockKind) -> EditorState {
        editor.reduce(state, &Event::AddBlock { kind, size: None })
    }

    #[test]
    fn test_add_block_uses_allocator_and_fresh_ids() {
        let editor = Editor::default();
        let state = add(&editor, empty_state(), BlockKind::Header);
        let state = add(&editor, state, BlockKind::Button);

        let blocks = state.document().blocks();
        assert_eq!(blocks[0].id().as_str(), "block-1");
        assert_eq!(blocks[0].position(), Rect::new(100, 30, 400, 80));
        assert_eq!(blocks[1].id().as_str(), "block-2");
        assert_eq!(blocks[1].order(), Some(1));
        assert!(!geometry::overlap(blocks[0].position(), blocks[1].position(), 30).is_overlapping());
    }

    #[test]
    fn test_pointer_events_without_gesture_are_ignored() {
        let editor = Editor::default();
        let state = add(&editor, empty_state(), BlockKind::Text);
        let before = state.document().clone();

        let state = editor.reduce(state, &Event::PointerMove { pointer: Point::new(400, 400) });
        let state = editor.reduce(state, &Event::PointerUp);
        let state = editor.reduce(
            state,
            &Event::BeginDrag { id: "missing".into(), pointer: Point::new(0, 0) },
        );
        assert_eq!(state.document(), &before);
        assert_eq!(state.interaction(), &Interaction::Idle);
    }

    #[test]
    fn test_drag_moves_block_and_ends_on_pointer_up() {
        let editor = Editor::default();
        let state = add(&editor, empty_state(), BlockKind::Header);
        let id = state.document().blocks()[0].id().clone();

        let state = editor.reduce(state, &Event::BeginDrag { id: id.clone(), pointer: Point::new(110, 40) });
        assert!(matches!(state.interaction(), Interaction::Dragging(_)));
        let state = editor.reduce(state, &Event::PointerMove { pointer: Point::new(110, 350) });
        let state = editor.reduce(state, &Event::PointerUp);

        let rect = state.document().block(&id).unwrap().position();
        assert_eq!(rect.origin(), Point::new(100, 340));
        assert_eq!(state.interaction(), &Interaction::Idle);
    }

    #[test]
    fn test_removing_dragged_block_cancels_gesture() {
        let editor = Editor::default();
        let state = add(&editor, empty_state(), BlockKind::Header);
        let id = state.document().blocks()[0].id().clone();

        let state = editor.reduce(state, &Event::BeginDrag { id: id.clone(), pointer: Point::new(110, 40) });
        let state = editor.reduce(state, &Event::RemoveBlock { id });
        assert!(state.document().blocks().is_empty());
        assert_eq!(state.interaction(), &Interaction::Idle);
    }

    #[test]
    fn test_resize_gesture() {
        let editor = Editor::default();
        let state = add(&editor, empty_state(), BlockKind::Header);
        let id = state.document().blocks()[0].id().clone();

        let state = editor.reduce(
            state,
            &Event::BeginResize { id: id.clone(), handle: ResizeHandle::S, pointer: Point::new(300, 110) },
        );
        let state = editor.reduce(state, &Event::PointerMove { pointer: Point::new(300, 150) });
        let state = editor.reduce(state, &Event::PointerMove { pointer: Point::new(300, 170) });
        assert_eq!(state.document().block(&id).unwrap().position(), Rect::new(100, 30, 400, 140));
    }

    #[test]
    fn test_shrinking_canvas_revalidates_blocks() {
        let editor = Editor::default();
        let state = add(&editor, empty_state(), BlockKind::Header);
        let styles = GlobalStyles::default().with_content_size(300, 400);
        let state = editor.reduce(state, &Event::SetGlobalStyles(styles));

        let rect = state.document().blocks()[0].position();
        assert_eq!(rect.width(), 240);
        assert!(rect.is_within(Size::new(300, 400), 30));
    }

    #[test]
    fn test_session_undo_redo() {
        let mut session = Session::new(Editor::default(), Document::new("Weekly"), false);
        session.dispatch(Event::AddBlock { kind: BlockKind::Header, size: None });
        session.dispatch(Event::AddBlock { kind: BlockKind::Text, size: None });
        assert_eq!(session.history().version(), 2);

        assert!(session.undo());
        assert_eq!(session.document().blocks().len(), 1);
        assert!(session.redo());
        assert_eq!(session.document().blocks().len(), 2);
        assert!(!session.redo());
    }

    #[test]
    fn test_session_commits_once_per_drag() {
        let mut session = Session::new(Editor::default(), Document::new("Weekly"), false);
        session.dispatch(Event::AddBlock { kind: BlockKind::Header, size: None });
        let id = session.document().blocks()[0].id().clone();

        session.dispatch(Event::BeginDrag { id: id.clone(), pointer: Point::new(110, 40) });
        for y in [100, 200, 300] {
            session.dispatch(Event::PointerMove { pointer: Point::new(110, y) });
        }
        session.dispatch(Event::PointerUp);
        assert_eq!(session.history().version(), 2);

        assert!(session.undo());
        assert_eq!(session.document().block(&id).unwrap().position().y(), 30);
    }

    #[test]
    fn test_drag_never_overlaps_neighbor() {
        let editor = Editor::default();
        let state = add(&editor, empty_state(), BlockKind::Header);
        let state = add(&editor, state, BlockKind::Header);
        let first = state.document().blocks()[0].position();
        let id = state.document().blocks()[1].id().clone();

        let grab = state.document().blocks()[1].position().origin();
        let state = editor.reduce(state, &Event::BeginDrag { id: id.clone(), pointer: grab });
        let state = editor.reduce(state, &Event::PointerMove { pointer: first.origin() });

        let moved = state.document().block(&id).unwrap().position();
        assert!(!geometry::overlap(moved, first, HARD_MARGIN).is_overlapping());
    }
}
