//! Bounded undo/redo log of document snapshots.

use log::debug;

use tessera_core::document::Document;

/// Linear history of committed documents.
///
/// The entry under the cursor is the current document. Committing after an
/// undo discards the undone entries. When the log exceeds its limit the
/// oldest entry is dropped.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Document>,
    cursor: usize,
    limit: usize,
    dropped: usize,
}

impl History {
    /// Starts a history whose only entry is `initial`.
    ///
    /// A limit of zero is treated as one.
    pub fn new(initial: Document, limit: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: limit.max(1),
            dropped: 0,
        }
    }

    /// Records `document` as the newest entry.
    pub fn commit(&mut self, document: Document) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(document);
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
            self.dropped += excess;
        }
        self.cursor = self.snapshots.len() - 1;
        debug!(entries = self.snapshots.len(); "History commit");
    }

    /// The entry under the cursor
    pub fn current(&self) -> &Document {
        &self.snapshots[self.cursor]
    }

    /// Steps back one entry, returning the document to restore.
    pub fn undo(&mut self) -> Option<&Document> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Steps forward one entry, returning the document to restore.
    pub fn redo(&mut self) -> Option<&Document> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    /// Version of the current entry; the initial document is version 0.
    pub fn version(&self) -> usize {
        self.dropped + self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored entries, including the current one
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str) -> Document {
        Document::new(title)
    }

    #[test]
    fn test_undo_redo_walks_entries() {
        let mut history = History::new(doc("a"), 10);
        history.commit(doc("b"));
        history.commit(doc("c"));

        assert_eq!(history.undo().map(Document::title), Some("b"));
        assert_eq!(history.undo().map(Document::title), Some("a"));
        assert!(history.undo().is_none());
        assert_eq!(history.redo().map(Document::title), Some("b"));
    }

    #[test]
    fn test_commit_after_undo_drops_redo_branch() {
        let mut history = History::new(doc("a"), 10);
        history.commit(doc("b"));
        history.undo();
        history.commit(doc("c"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo().map(Document::title), Some("a"));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(doc("a"), 2);
        history.commit(doc("b"));
        history.commit(doc("c"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.version(), 2);
        assert_eq!(history.undo().map(Document::title), Some("b"));
        assert_eq!(history.version(), 1);
        assert!(!history.can_undo());
    }
}
