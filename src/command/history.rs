use super::EditAction;
use crate::scene::{SceneGraph, SceneSnapshot};

/// One undo or redo point: the scene to restore and the edit it belongs to
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub action: EditAction,
    pub snapshot: SceneSnapshot,
}

/// Snapshot-based undo/redo over a [`SceneGraph`]
#[derive(Debug, Default)]
pub struct History {
    /// Scenes as they were before each committed edit
    undo_stack: Vec<HistoryEntry>,
    /// Scenes as they were before each undo
    redo_stack: Vec<HistoryEntry>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `before` as the undo point, drops the redo branch and makes `next` current
    pub fn commit(
        &mut self,
        scene: &mut SceneGraph,
        next: SceneSnapshot,
        before: SceneSnapshot,
        action: EditAction,
    ) {
        self.undo_stack.push(HistoryEntry {
            action,
            snapshot: before,
        });
        self.redo_stack.clear();
        scene.restore(next);
        log::info!(
            "Committed {} ({} elements, undo depth {})",
            action.label(),
            scene.len(),
            self.undo_stack.len()
        );
    }

    /// Restores the previous scene. Returns false when there is nothing to undo.
    pub fn undo(&mut self, scene: &mut SceneGraph) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };

        self.redo_stack.push(HistoryEntry {
            action: entry.action,
            snapshot: scene.snapshot(),
        });
        scene.restore(entry.snapshot);
        log::info!("Undo {}", entry.action.label());
        true
    }

    /// Re-applies the last undone edit. Returns false when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut SceneGraph) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };

        self.undo_stack.push(HistoryEntry {
            action: entry.action,
            snapshot: scene.snapshot(),
        });
        scene.restore(entry.snapshot);
        log::info!("Redo {}", entry.action.label());
        true
    }

    /// Returns true if there are edits that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }
}
