//! Linear undo/redo history over completed strokes and imported content
//!
//! Undo hides a node instead of destroying it, so redo is O(1) and never
//! re-extrudes geometry. Nodes are only destroyed when their entry is
//! discarded for good (a new record after undo) or the history is cleared.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scene::{NodeId, SceneNodes};
use crate::types::Chirality;

/// One reversible action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEntry {
    Stroke { node: NodeId, chirality: Chirality },
    Imported { node: NodeId },
}

impl HistoryEntry {
    pub fn node(&self) -> NodeId {
        match self {
            Self::Stroke { node, .. } | Self::Imported { node } => *node,
        }
    }
}

/// Undo and redo stacks (most recent at end)
///
/// Entries only move between the two stacks; none is dropped until a new
/// record discards the redo side or the history is cleared.
#[derive(Debug, Clone, Default)]
pub struct History {
    done: Vec<HistoryEntry>,
    undone: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed action.
    ///
    /// Entries waiting for redo are discarded and their nodes destroyed.
    pub fn record(&mut self, entry: HistoryEntry, scene: &mut SceneNodes) {
        for discarded in self.undone.drain(..) {
            scene.remove(discarded.node());
        }
        self.done.push(entry);
        debug!(
            "History::record: {:?} ({} undoable)",
            entry,
            self.done.len()
        );
    }

    /// Hide the most recent action. Returns the entry moved, if any.
    pub fn undo(&mut self, scene: &mut SceneNodes) -> Option<HistoryEntry> {
        let Some(entry) = self.done.pop() else {
            debug!("Undo: no entries available");
            return None;
        };
        scene.set_visible(entry.node(), false);
        self.undone.push(entry);
        debug!("Undo: {:?}", entry);
        Some(entry)
    }

    /// Show the most recently undone action. Returns the entry moved, if any.
    pub fn redo(&mut self, scene: &mut SceneNodes) -> Option<HistoryEntry> {
        let Some(entry) = self.undone.pop() else {
            debug!("Redo: no entries available");
            return None;
        };
        scene.set_visible(entry.node(), true);
        self.done.push(entry);
        debug!("Redo: {:?}", entry);
        Some(entry)
    }

    /// Destroy every referenced node and empty both stacks
    pub fn clear(&mut self, scene: &mut SceneNodes) {
        for entry in self.done.drain(..).chain(self.undone.drain(..)) {
            scene.remove(entry.node());
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.done.len()
    }

    pub fn redo_count(&self) -> usize {
        self.undone.len()
    }

    pub fn done(&self) -> &[HistoryEntry] {
        &self.done
    }

    pub fn undone(&self) -> &[HistoryEntry] {
        &self.undone
    }
}
