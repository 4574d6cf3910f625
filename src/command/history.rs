use super::Command;

/// One undo/redo unit: the state to go back to and the state to go forward to
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub previous: Command,
    pub next: Command,
}

/// Manages the history of recorded snapshots for undo/redo functionality
///
/// Recording does not apply anything: the change has already happened when
/// the snapshot is taken. Undo applies `previous`, redo applies `next`.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Stack of snapshots that can be undone
    undo_stack: Vec<Snapshot>,
    /// Stack of snapshots that can be redone
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one undo/redo unit
    pub fn snapshot(&mut self, previous: Command, next: Command) {
        self.undo_stack.push(Snapshot { previous, next });
        // Clear redo stack when a new change is recorded
        self.redo_stack.clear();
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Snapshot> {
        self.undo_stack.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Snapshot> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_undone(&mut self, snapshot: Snapshot) {
        self.redo_stack.push(snapshot);
    }

    pub(crate) fn push_redone(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// The most recent snapshot, if any
    pub fn last(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
