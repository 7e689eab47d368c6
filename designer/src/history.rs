//! Linear undo/redo history of whole-document snapshots.
//!
//! The history always holds at least one snapshot. Committing while the
//! cursor is behind the tail drops the redo branch. Undo past the first
//! snapshot and redo past the last are no-ops.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::doc::TemplateDocument;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<TemplateDocument>,
    index: usize,
}

impl History {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: TemplateDocument) -> Self {
        Self { snapshots: vec![initial], index: 0 }
    }

    /// Discard everything and start over from `doc`.
    pub fn reset(&mut self, doc: TemplateDocument) {
        self.snapshots.clear();
        self.snapshots.push(doc);
        self.index = 0;
    }

    /// Record `doc` as the newest snapshot, truncating any redo branch.
    pub fn commit(&mut self, doc: TemplateDocument) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(doc);
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns the restored snapshot, or `None` at
    /// the first entry.
    pub fn undo(&mut self) -> Option<&TemplateDocument> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Step forward one snapshot. Returns the restored snapshot, or `None` at
    /// the tail.
    pub fn redo(&mut self) -> Option<&TemplateDocument> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &TemplateDocument {
        &self.snapshots[self.index]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of snapshots held, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: a history holds at least its initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Cursor position in `0..len()`.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}
